//! Monthly budget settings
//!
//! One record for the whole store, holding an optional spending ceiling for
//! each calendar month.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::month::Month;

/// Fixed identifier of the single settings record
pub const GLOBAL_SETTINGS_ID: &str = "global_settings";

fn default_settings_id() -> String {
    GLOBAL_SETTINGS_ID.to_string()
}

/// The singleton budget settings record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSettings {
    /// Always `global_settings`
    #[serde(default = "default_settings_id")]
    pub id: String,

    /// Budget per month, January first
    #[serde(default)]
    budgets: [Option<Money>; 12],
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            id: default_settings_id(),
            budgets: [None; 12],
        }
    }
}

impl BudgetSettings {
    /// Budget for `month`, if one has been set
    pub fn budget_for(&self, month: Month) -> Option<Money> {
        self.budgets[month.index()]
    }

    /// Set or overwrite the budget for `month`, returning the previous value
    pub fn set_budget(&mut self, month: Month, amount: Money) -> Option<Money> {
        self.budgets[month.index()].replace(amount)
    }

    /// All months that have a budget, in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (Month, Money)> + '_ {
        Month::all().filter_map(move |m| self.budget_for(m).map(|amount| (m, amount)))
    }

    /// Amount by which `spent` exceeds the budget for `month`
    ///
    /// `None` when no budget is set or spending is within it.
    pub fn overspend(&self, month: Month, spent: Money) -> Option<Money> {
        let budget = self.budget_for(month)?;
        if spent > budget {
            Some(spent - budget)
        } else {
            None
        }
    }
}
