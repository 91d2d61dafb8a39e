//! Progress reporting for scans.

use crate::events::{Event, EventSender, ScanEvent, ScanProgress};

/// Receives scan progress as a fraction in `[0, 1]` plus a stage label.
///
/// Fractions arrive in non-decreasing order and stop once the scan has
/// finished or failed.
pub trait ProgressSink {
    fn report(&mut self, fraction: f64, message: &str);
}

impl<F> ProgressSink for F
where
    F: FnMut(f64, &str),
{
    fn report(&mut self, fraction: f64, message: &str) {
        self(fraction, message)
    }
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _fraction: f64, _message: &str) {}
}

impl ProgressSink for EventSender {
    fn report(&mut self, fraction: f64, message: &str) {
        self.send(Event::Scan(ScanEvent::Progress(ScanProgress {
            fraction,
            message: message.to_string(),
        })));
    }
}
