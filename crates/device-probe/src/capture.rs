//! Normalizing `getevent -tt` logs into capture files.
//!
//! A log line looks like
//! `[   12345.678901] /dev/input/event2: 0003 0035 000001f4`; the capture
//! line keeps the event and turns the bracketed timestamp into an integer.

use retouch_common::error::{RetouchError, RetouchResult};
use retouch_event_model::device::Device;
use retouch_event_model::event::Event;

/// Selects and rewrites log lines for one touch node.
#[derive(Debug, Clone)]
pub struct CaptureNormalizer {
    node: String,
}

impl CaptureNormalizer {
    pub fn new(node: impl Into<String>) -> Self {
        Self { node: node.into() }
    }

    /// Whether a log line is an event from this node.
    pub fn accepts(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        !trimmed.starts_with("add device")
            && line
                .split_whitespace()
                .any(|token| token.strip_suffix(':') == Some(self.node.as_str()))
    }

    /// Rewrite one log line; `None` if it belongs to another node.
    pub fn normalize_line(&self, line: &str, line_no: usize) -> RetouchResult<Option<Event>> {
        if !self.accepts(line) {
            return Ok(None);
        }

        let mut tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&"[") {
            tokens.remove(0);
        }
        if tokens.len() != 5 {
            return Err(RetouchError::malformed(
                line_no,
                format!("expected [time] node: type code value, got {:?}", line.trim()),
            ));
        }

        let time = capture_time(tokens[0]).ok_or_else(|| {
            RetouchError::malformed(line_no, format!("invalid timestamp {:?}", tokens[0]))
        })?;
        let event_line = format!("{time} {} {} {}", tokens[2], tokens[3], tokens[4]);
        Ok(Some(Event::parse_line(&event_line, line_no)?))
    }

    /// Rewrite a whole log, keeping only this node's events.
    pub fn normalize(&self, log: &str) -> RetouchResult<Vec<Event>> {
        let mut events = Vec::new();
        for (idx, line) in log.lines().enumerate() {
            if let Some(event) = self.normalize_line(line, idx + 1)? {
                events.push(event);
            }
        }
        tracing::info!(node = %self.node, events = events.len(), "Normalized capture log");
        Ok(events)
    }
}

/// Bracketed `getevent -tt` timestamp as an integer: punctuation removed,
/// scaled by 1000.
pub fn capture_time(raw: &str) -> Option<u64> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, '.' | '[' | ']' | '-' | ':'))
        .collect();
    digits.parse::<u64>().ok()?.checked_mul(1000)
}

/// Comment block describing the capture device, written ahead of events.
pub fn capture_header(device: &Device) -> String {
    format!(
        "# Default Display: {}\n\
         # Current Display: {}\n\
         # App Display: {}\n\
         # Rotated: {}\n\
         # Default Touchscreen: {}\n\
         # Current Touchscreen: {}\n\
         # App Touchscreen: {}\n\
         # Menu Touchscreen: {}\n\
         #\n\
         # Time Type Code Value\n",
        device.init_display,
        device.cur_display,
        device.app_display,
        device.rotated,
        device.init_touch,
        device.cur_touch,
        device.app_touch,
        device.menu_touch,
    )
}
