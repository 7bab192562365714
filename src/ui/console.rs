use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};

use super::{Phase, Ui};

/// Line-oriented reporter: one progress bar per stage, messages through `log`
pub struct ConsoleUi {
    bar: Option<ProgressBar>,
    style: ProgressStyle,
}

impl ConsoleUi {
    pub fn new() -> Self {
        let style = ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40.cyan/blue}] {pos}/{len} rows")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");

        Self { bar: None, style }
    }

    /// Run `f` with the bar hidden so log lines are not drawn over it
    fn suspend<F: FnOnce()>(&self, f: F) {
        match &self.bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}

impl Default for ConsoleUi {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        self.clear_progress();
        info!("{}", phase);
    }

    fn set_info(&mut self, info: impl Into<String>) {
        let info = info.into();
        self.suspend(|| info!("{}", info));
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        let bar = self.bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(total);
            bar.set_style(self.style.clone());
            bar
        });
        if bar.length() != Some(total) {
            bar.set_length(total);
        }
        bar.set_message(label.into());
        bar.set_position(current);
    }

    fn clear_progress(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.suspend(|| info!("{}", message));
    }

    fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.suspend(|| warn!("{}", message));
    }

    fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.suspend(|| error!("{}", message));
    }
}
