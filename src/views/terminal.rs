//! Terminal implementations of the view collaborators.

use super::{Notification, Notifier, Prompt};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Prints notifications to stderr; the terminal keeps them, so the duration is only logged.
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        debug!(duration_ms = notification.duration.as_millis() as u64, "notification");
        eprintln!("» {}", notification.message);
    }
}

/// Reads a y/n answer from stdin. `assume_yes` skips the question entirely.
#[derive(Debug, Default)]
pub struct StdinPrompt {
    pub assume_yes: bool,
}

impl Prompt for StdinPrompt {
    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = io::stderr();
        let _ = write!(stderr, "{} [y/N] ", question);
        let _ = stderr.flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
