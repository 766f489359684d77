//! Replay artifact serialization.
//!
//! The replay tool expects a record count on the first line, then one
//! `time,device,type,code,value` record per line, all decimal.

use std::fmt;

use retouch_event_model::event::Event;

/// A translated event stream bound to the target's input device node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayArtifact {
    device_id: u32,
    events: Vec<Event>,
}

impl ReplayArtifact {
    /// `device_id` is the `N` of `/dev/input/eventN` on the target.
    pub fn new(device_id: u32, events: Vec<Event>) -> Self {
        Self { device_id, events }
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl fmt::Display for ReplayArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.events.len())?;
        for event in &self.events {
            writeln!(
                f,
                "{},{},{},{},{}",
                event.time,
                self.device_id,
                event.event_type().raw(),
                event.code.raw_code(),
                event.value
            )?;
        }
        Ok(())
    }
}
