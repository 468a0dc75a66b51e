//! Console progress bar
//!
//! Renders the analysis progress scale with indicatif on stderr.

use crate::core::progress::ProgressSink;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use parking_lot::Mutex;
use std::time::Duration;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {wide_msg}";

/// Progress sink backed by an indicatif bar
///
/// The bar is created by `set_total`; updates arriving earlier are ignored.
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    draw_target: fn() -> ProgressDrawTarget,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            draw_target: ProgressDrawTarget::stderr,
        }
    }

    /// Reporter that never draws, used where no terminal is available
    pub fn hidden() -> Self {
        Self {
            bar: Mutex::new(None),
            draw_target: ProgressDrawTarget::hidden,
        }
    }

    /// Current bar position, if the bar exists
    pub fn position(&self) -> Option<u64> {
        self.bar.lock().as_ref().map(ProgressBar::position)
    }

    pub fn is_finished(&self) -> bool {
        self.bar
            .lock()
            .as_ref()
            .map(ProgressBar::is_finished)
            .unwrap_or(false)
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
    }
}

impl ProgressSink for ProgressReporter {
    fn set_total(&self, total: u64) {
        let bar = ProgressBar::with_draw_target(Some(total), (self.draw_target)());
        bar.set_style(Self::style());
        bar.enable_steady_tick(Duration::from_millis(120));
        *self.bar.lock() = Some(bar);
    }

    fn update(&self, current: u64, description: &str) {
        if let Some(bar) = self.bar.lock().as_ref() {
            bar.set_position(current);
            bar.set_message(description.to_string());
        }
    }

    fn complete(&self) {
        if let Some(bar) = self.bar.lock().as_ref() {
            bar.finish_and_clear();
        }
    }
}

// Analysis can fail before `complete`; the bar must not outlive the run.
impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.get_mut().as_ref() {
            if !bar.is_finished() {
                bar.finish_and_clear();
            }
        }
    }
}
