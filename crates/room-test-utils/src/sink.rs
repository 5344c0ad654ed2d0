//! In-memory notification sink.

use room_service::NotificationSink;
use std::sync::Mutex;

/// Stores every notified line.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.lock().unwrap().iter().any(|l| l == line)
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}
