use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};
use mascii::Observer;

static STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::with_template("{wide_msg} {bar:30} {pos:>3}% ({elapsed})")
        .expect("invalid progress template")
});

/// Draws load and build progress on stderr.
#[derive(Debug)]
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(100).with_style(STYLE.clone())
        };
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Observer for ProgressObserver {
    fn progress_changed(&mut self, percent: u8) {
        self.bar.set_position(u64::from(percent));
    }

    fn event_occurred(&mut self, message: &str) {
        tracing::info!("{message}");
        self.bar.set_message(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_progress_across_phases() {
        let mut observer = ProgressObserver::new(true);
        observer.event_occurred("Reading File");
        observer.progress_changed(100);
        assert_eq!(observer.bar.position(), 100);

        observer.event_occurred("Building DAG Tree");
        observer.progress_changed(40);
        assert_eq!(observer.bar.position(), 40);
        assert_eq!(observer.bar.message(), "Building DAG Tree");
    }
}
