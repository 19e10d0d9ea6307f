//! Spinner display while an external build tool runs

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner for one build step
pub struct StepProgress {
    pb: ProgressBar,
}

impl StepProgress {
    /// Start a spinner with the given message
    pub fn start(message: String) -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap();

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));

        Self { pb }
    }

    /// Clear the spinner after a completed step
    pub fn finish(self) {
        self.pb.finish_and_clear();
    }

    /// Leave the last message visible on error
    pub fn abandon(self) {
        self.pb.abandon();
    }
}
