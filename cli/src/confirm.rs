//! Stdin confirmation prompt.

use std::io::{self, BufRead, Write};

use synthops_chain::CurrencyKey;
use synthops_core::Confirmation;

/// Asks the operator on stdin before a batch proceeds.
pub(crate) struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm_removal(&self, keys: &[CurrencyKey]) -> bool {
        let listed = keys
            .iter()
            .map(CurrencyKey::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        print!("Remove {listed} from the registry and local manifests? [y/N] ");
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        accepts(&answer)
    }
}

/// Only an explicit yes proceeds; anything else declines.
pub(crate) fn accepts(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::accepts;

    #[test]
    fn explicit_yes_accepts() {
        for answer in ["y", "Y", "yes", "YES", " yes \n"] {
            assert!(accepts(answer), "{answer:?} should accept");
        }
    }

    #[test]
    fn anything_else_declines() {
        for answer in ["", "n", "no", "yep", "ye", "q", "\n"] {
            assert!(!accepts(answer), "{answer:?} should decline");
        }
    }
}
