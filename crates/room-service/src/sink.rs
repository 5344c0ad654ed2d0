//! Notification sinks.
//!
//! Rendered lines (join announcements, delivered messages) go through a
//! `NotificationSink` instead of straight to stdout, so tests can assert on
//! output without capturing process-wide streams.

use std::io::Write;
use tracing::info;

/// Destination for human-readable output lines.
pub trait NotificationSink: Send + Sync {
    /// Emit one line.
    fn notify(&self, line: &str);
}

/// Writes each line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl NotificationSink for StdoutSink {
    fn notify(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout is not a room error; drop the line.
        let _ = writeln!(stdout, "{line}");
    }
}

/// Emits each line as an `info` event on the `room.sink` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, line: &str) {
        info!(target: "room.sink", line = %line, "notification");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sinks_are_object_safe() {
        let sinks: Vec<Box<dyn NotificationSink>> =
            vec![Box::new(StdoutSink), Box::new(TracingSink)];
        for sink in &sinks {
            sink.notify("Alice joined the room.");
        }
    }
}
