//! Splitting a flat event stream into interactions.
//!
//! An interaction is every event after one `SYN_REPORT` up to and including
//! the next. Other `EV_SYN` codes (`SYN_MT_REPORT`, `SYN_DROPPED`, ...) stay
//! inside the interaction they arrive in.

use std::collections::HashSet;

use retouch_common::error::RetouchResult;
use retouch_event_model::event::{parse_events, Event, Fingerprint, Timestamp};

/// One frame of touch data, terminated by a frame boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    events: Vec<Event>,
}

impl Interaction {
    /// Wrap a non-empty run of events. Returns `None` for an empty run.
    pub fn new(events: Vec<Event>) -> Option<Self> {
        if events.is_empty() {
            None
        } else {
            Some(Self { events })
        }
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

    /// Latest timestamp among the events.
    pub fn peak_time(&self) -> Timestamp {
        self.events.iter().map(|e| e.time).max().unwrap_or_default()
    }

    pub fn fingerprints(&self) -> HashSet<Fingerprint> {
        self.events.iter().map(Event::fingerprint).collect()
    }
}

/// Group events into interactions at each `SYN_REPORT`.
///
/// Events after the final boundary form an incomplete frame and are dropped.
pub fn segment(events: Vec<Event>) -> Vec<Interaction> {
    let mut interactions = Vec::new();
    let mut current = Vec::new();

    for event in events {
        let boundary = event.is_frame_end();
        current.push(event);
        if boundary {
            if let Some(interaction) = Interaction::new(std::mem::take(&mut current)) {
                interactions.push(interaction);
            }
        }
    }

    if !current.is_empty() {
        tracing::warn!(
            dropped = current.len(),
            "Discarding events after the last frame boundary"
        );
    }

    interactions
}

/// Parse a capture file and segment it.
pub fn load_interactions(capture: &str) -> RetouchResult<Vec<Interaction>> {
    let events = parse_events(capture)?;
    let interactions = segment(events);
    tracing::debug!(interactions = interactions.len(), "Segmented capture");
    Ok(interactions)
}
