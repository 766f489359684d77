//! Press/release signatures learned from a reference swipe.
//!
//! The calibration capture holds one press frame, one or more move frames,
//! and one release frame. Fingerprints that show up in the move frames (or
//! in both boundary frames) say nothing about the phase of a frame, so only
//! the remainder is kept.

use std::collections::HashSet;

use retouch_common::error::{RetouchError, RetouchResult};
use retouch_event_model::event::{AbsCode, Axis, EventCode, Fingerprint};

use crate::segment::{load_interactions, Interaction};

/// Phase signatures and replay templates from a calibration capture.
#[derive(Debug, Clone)]
pub struct CalibrationProfile {
    press_template: Interaction,
    release_template: Interaction,
    press_fingerprints: HashSet<Fingerprint>,
    release_fingerprints: HashSet<Fingerprint>,
    move_fingerprints: HashSet<Fingerprint>,
    x_code: EventCode,
    y_code: EventCode,
}

impl CalibrationProfile {
    /// Build a profile from segmented calibration interactions.
    pub fn from_interactions(mut interactions: Vec<Interaction>) -> RetouchResult<Self> {
        if interactions.len() < 3 {
            return Err(RetouchError::calibration(format!(
                "expected a press, at least one move, and a release; found {} interaction(s)",
                interactions.len()
            )));
        }

        let release_template = interactions.pop().ok_or_else(|| {
            RetouchError::calibration("calibration capture has no release frame")
        })?;
        let press_template = interactions.remove(0);

        let press_all = press_template.fingerprints();
        let release_all = release_template.fingerprints();
        let move_fingerprints: HashSet<Fingerprint> = interactions
            .iter()
            .flat_map(|i| i.events().iter().map(|e| e.fingerprint()))
            .collect();

        let press_fingerprints: HashSet<Fingerprint> = press_all
            .difference(&move_fingerprints)
            .filter(|fp| !release_all.contains(fp))
            .copied()
            .collect();
        let release_fingerprints: HashSet<Fingerprint> = release_all
            .difference(&move_fingerprints)
            .filter(|fp| !press_all.contains(fp))
            .copied()
            .collect();

        if press_fingerprints.is_empty() && release_fingerprints.is_empty() {
            return Err(RetouchError::calibration(
                "press and release frames are indistinguishable from moves",
            ));
        }

        let axis_code = |axis: Axis, fallback: AbsCode| {
            press_template
                .events()
                .iter()
                .map(|e| e.code)
                .find(|code| code.axis() == Some(axis))
                .unwrap_or(EventCode::Abs(fallback))
        };
        let x_code = axis_code(Axis::X, AbsCode::MtPositionX);
        let y_code = axis_code(Axis::Y, AbsCode::MtPositionY);

        tracing::info!(
            press = press_fingerprints.len(),
            release = release_fingerprints.len(),
            moves = interactions.len(),
            "Calibration fingerprints derived"
        );

        Ok(Self {
            press_template,
            release_template,
            press_fingerprints,
            release_fingerprints,
            move_fingerprints,
            x_code,
            y_code,
        })
    }

    /// Parse, segment, and calibrate from capture text.
    pub fn from_capture(capture: &str) -> RetouchResult<Self> {
        Self::from_interactions(load_interactions(capture)?)
    }

    /// Fingerprints found only in the press frame.
    pub fn press_fingerprints(&self) -> &HashSet<Fingerprint> {
        &self.press_fingerprints
    }

    /// Fingerprints found only in the release frame.
    pub fn release_fingerprints(&self) -> &HashSet<Fingerprint> {
        &self.release_fingerprints
    }

    pub fn move_fingerprints(&self) -> &HashSet<Fingerprint> {
        &self.move_fingerprints
    }

    pub fn press_template(&self) -> &Interaction {
        &self.press_template
    }

    pub fn release_template(&self) -> &Interaction {
        &self.release_template
    }

    /// Code the calibration device uses to report a panel axis.
    pub fn axis_code(&self, axis: Axis) -> EventCode {
        match axis {
            Axis::X => self.x_code,
            Axis::Y => self.y_code,
        }
    }
}
