//! Blocking yes/no confirmation for destructive actions.
//!
//! Reset and logout never proceed without a `true` from a `Confirm`.

pub const RESET_PROMPT: &str =
    "Are you sure you want to reset all statistics, including compromised credentials? \
     This cannot be undone.";

pub const LOGOUT_PROMPT: &str =
    "Are you sure you want to log out of the Phishing Attack Simulator?";

pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Any `FnMut(&str) -> bool` can answer a prompt.
impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Answers every prompt the same way. Used by `--yes` and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, prompt: &str) -> bool {
        log::debug!("auto-answering {:?} to: {prompt}", self.0);
        self.0
    }
}
