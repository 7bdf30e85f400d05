//! Progress and status notifications for long-running operations.
//!
//! Loading a scene and building its hierarchy are synchronous and may take a
//! while for large files. Callers that run them on a worker thread observe
//! them through an [`Observer`]; the operations never depend on what the
//! observer does with a notification.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    mpsc::Sender,
};

/// Receives progress and status notifications, and may request early
/// termination.
///
/// Every method has a no-op default so implementors only override what they
/// care about. `()` is the silent observer.
pub trait Observer {
    /// Called with the completed percentage (0–100) whenever it changes.
    fn progress_changed(&mut self, _percent: u8) {}

    /// Called with a human-readable phase or status message.
    fn event_occurred(&mut self, _message: &str) {}

    /// Polled once per record boundary. Returning `true` aborts the
    /// operation with a `Cancelled` error.
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Observer for () {}

/// A notification forwarded by a [`ChannelObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The completed percentage changed.
    Progress(u8),
    /// A phase or status message.
    Event(String),
}

/// Forwards notifications over a channel, for callers that run an operation
/// on a background thread.
///
/// Cancellation is requested through the shared flag returned by
/// [`ChannelObserver::cancel_handle`].
#[derive(Debug)]
pub struct ChannelObserver {
    sender: Sender<Notification>,
    cancelled: Arc<AtomicBool>,
}

impl ChannelObserver {
    /// Creates an observer forwarding to `sender`.
    #[must_use]
    pub fn new(sender: Sender<Notification>) -> Self {
        Self {
            sender,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a handle which, when set to `true`, cancels the observed
    /// operation at the next record boundary.
    #[must_use]
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }
}

impl Observer for ChannelObserver {
    fn progress_changed(&mut self, percent: u8) {
        // a dropped receiver only means nobody is listening any more
        let _ = self.sender.send(Notification::Progress(percent));
    }

    fn event_occurred(&mut self, message: &str) {
        let _ = self.sender.send(Notification::Event(message.to_string()));
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Emits a percentage only when it differs from the last one emitted.
#[derive(Debug, Default)]
pub(crate) struct ProgressTracker {
    last: Option<u8>,
}

impl ProgressTracker {
    /// Reports `done / total` as a percentage, rounding up when `round_up`
    /// is set and down otherwise.
    pub(crate) fn report(
        &mut self,
        observer: &mut dyn Observer,
        done: u64,
        total: u64,
        round_up: bool,
    ) {
        if total == 0 {
            return;
        }
        let scaled = done.saturating_mul(100);
        let percent = if round_up {
            scaled.div_ceil(total)
        } else {
            scaled / total
        };
        let percent = u8::try_from(percent.min(100)).unwrap_or(100);

        if self.last != Some(percent) {
            self.last = Some(percent);
            observer.progress_changed(percent);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::mpsc;

    use super::*;

    /// Records every notification it receives.
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub(crate) progress: Vec<u8>,
        pub(crate) events: Vec<String>,
        pub(crate) cancel: bool,
    }

    impl Observer for Recorder {
        fn progress_changed(&mut self, percent: u8) {
            self.progress.push(percent);
        }

        fn event_occurred(&mut self, message: &str) {
            self.events.push(message.to_string());
        }

        fn is_cancelled(&self) -> bool {
            self.cancel
        }
    }

    #[test]
    fn tracker_only_emits_changes() {
        let mut recorder = Recorder::default();
        let mut tracker = ProgressTracker::default();
        for done in [1, 1, 2, 3, 3, 4] {
            tracker.report(&mut recorder, done, 4, false);
        }
        assert_eq!(recorder.progress, vec![25, 50, 75, 100]);
    }

    #[test]
    fn tracker_rounds_up_when_asked() {
        let mut recorder = Recorder::default();
        let mut tracker = ProgressTracker::default();
        tracker.report(&mut recorder, 1, 3, true);
        assert_eq!(recorder.progress, vec![34]);
    }

    #[test]
    fn tracker_ignores_empty_totals() {
        let mut recorder = Recorder::default();
        ProgressTracker::default().report(&mut recorder, 0, 0, true);
        assert!(recorder.progress.is_empty());
    }

    #[test]
    fn channel_observer_forwards_and_cancels() {
        let (sender, receiver) = mpsc::channel();
        let mut observer = ChannelObserver::new(sender);

        observer.event_occurred("Reading File");
        observer.progress_changed(42);
        assert!(!observer.is_cancelled());

        observer.cancel_handle().store(true, Ordering::Relaxed);
        assert!(observer.is_cancelled());

        let received: Vec<_> = receiver.try_iter().collect();
        assert_eq!(
            received,
            vec![
                Notification::Event("Reading File".to_string()),
                Notification::Progress(42)
            ]
        );
    }
}
