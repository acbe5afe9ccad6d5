//! Yes/no confirmation prompts
//!
//! Destructive commands ask through the `Confirm` trait so the interactive
//! prompt can be swapped for a fixed answer.

use std::io::{self, BufRead, Stdin, Stdout, Write};

use crate::error::{ExpenseError, ExpenseResult};

/// Asks the user to confirm an action
pub trait Confirm {
    /// Show `prompt` and return whether the user agreed
    fn confirm(&mut self, prompt: &str) -> ExpenseResult<bool>;
}

/// `yes` or `y`, in any case, surrounding whitespace ignored
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

/// Prompts on a writer and reads one line of reply from a reader
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptConfirm<io::StdinLock<'static>, Stdout> {
    /// Prompt on stdout, read the reply from stdin
    pub fn stdin() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> ExpenseResult<bool> {
        write!(self.output, "{}", prompt)
            .and_then(|_| self.output.flush())
            .map_err(|e| ExpenseError::Io(format!("Failed to write prompt: {}", e)))?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .map_err(|e| ExpenseError::Io(format!("Failed to read answer: {}", e)))?;

        // End of input before any answer counts as "no"
        if read == 0 {
            writeln!(self.output).ok();
            return Ok(false);
        }

        Ok(is_affirmative(&answer))
    }
}

/// Answers every prompt the same way without asking
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> ExpenseResult<bool> {
        Ok(self.0)
    }
}
