//! Batch progress display shared across worker threads

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Counts finished jobs for one stage of a run
///
/// The bar is internally reference counted, so workers can share a
/// `&ProgressManager` and report completions concurrently.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a bar for `total` jobs labelled with `stage`
    pub fn new(stage: &str, total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(BATCH_STYLE.clone());
        bar.set_message(stage.to_string());
        Self { bar }
    }

    /// Create a bar that tracks counts without drawing anything
    pub fn hidden(total: usize) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Record one finished job
    pub fn complete_job(&self) {
        self.bar.inc(1);
    }

    /// Number of jobs recorded so far
    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    /// Number of jobs expected
    pub fn total(&self) -> u64 {
        self.bar.length().unwrap_or(0)
    }

    /// Stop drawing and leave a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
