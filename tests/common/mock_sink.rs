//! Mock Action Sink for Testing
//!
//! Records every line handed to it.

use keyforward::{ActionSink, ForwardError, ForwardResult};
use std::sync::{Arc, Mutex};

/// Sink that records sent lines
#[derive(Debug, Clone)]
pub struct MockSink {
    /// All lines that were "sent"
    pub lines: Arc<Mutex<Vec<String>>>,
    /// Simulate failure on the next send
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Get all sent lines
    pub fn get_lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSink for MockSink {
    fn send_line(&mut self, line: &str) -> ForwardResult<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(ForwardError::Transport("Mock sink failure".to_string()));
        }
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}
