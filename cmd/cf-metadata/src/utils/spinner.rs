use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner on stderr, cleared when dropped
pub struct Spinner(ProgressBar);

pub fn new(message: &str) -> Spinner {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Spinner(pb)
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}
