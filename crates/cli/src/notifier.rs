//! Notices and confirmations on the terminal.

use std::io::{self, BufRead, Write};

use shopfront_storefront::pages::Notifier;

/// Prints notices to stdout and reads confirmations from stdin.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for TerminalNotifier {
    #[allow(clippy::print_stdout)]
    fn notify(&self, message: &str) {
        println!("{message}");
    }

    #[allow(clippy::print_stdout)]
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(TerminalNotifier::new(true).confirm("Delete?"));
    }
}
