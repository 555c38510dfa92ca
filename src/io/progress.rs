//! Shared progress display for batch operations

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

// Every visible bar is drawn through this one stderr target
static DISPLAY: LazyLock<MultiProgress> = LazyLock::new(MultiProgress::new);

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] \
             {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over a known number of work units
///
/// Cloning is cheap and every clone advances the same bar, so one reporter
/// can be shared by all workers. A hidden reporter accepts the same calls
/// and draws nothing.
#[derive(Clone, Debug)]
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Visible bar labelled `prefix` over `total` units
    pub fn new(prefix: &str, total: usize) -> Self {
        let bar = DISPLAY.add(ProgressBar::new(total as u64));
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(prefix.to_string());
        Self { bar }
    }

    /// Reporter that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Visible unless `quiet` is set
    pub fn for_mode(prefix: &str, total: usize, quiet: bool) -> Self {
        if quiet {
            Self::hidden()
        } else {
            Self::new(prefix, total)
        }
    }

    /// Advance by one unit
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Units completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar, leaving `message` when visible
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::hidden()
    }
}

/// Run `write` with all visible bars cleared, then redraw them
///
/// Terminal output produced inside `write` does not tear a bar.
pub fn suspend_bars<R>(write: impl FnOnce() -> R) -> R {
    DISPLAY.suspend(write)
}
