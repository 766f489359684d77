//! Labelling interactions as press, move, or release.
//!
//! A frame is a press when it carries at least three quarters of the press
//! signature learned during calibration; likewise for release. Everything
//! else is a move.

use std::collections::HashSet;

use retouch_event_model::event::Fingerprint;
use retouch_event_model::portable::Action;

use crate::calibration::CalibrationProfile;
use crate::segment::Interaction;

/// Number of signature fingerprints an interaction shares with `signature`.
pub fn overlap(fingerprints: &HashSet<Fingerprint>, signature: &HashSet<Fingerprint>) -> usize {
    fingerprints.intersection(signature).count()
}

/// Whether `fingerprints` cover at least 75% of a non-empty `signature`.
pub fn covers(fingerprints: &HashSet<Fingerprint>, signature: &HashSet<Fingerprint>) -> bool {
    !signature.is_empty() && 4 * overlap(fingerprints, signature) >= 3 * signature.len()
}

/// Label one interaction against a calibration profile.
pub fn classify(interaction: &Interaction, profile: &CalibrationProfile) -> Action {
    let fingerprints = interaction.fingerprints();
    if covers(&fingerprints, profile.press_fingerprints()) {
        Action::Press
    } else if covers(&fingerprints, profile.release_fingerprints()) {
        Action::Release
    } else {
        Action::Move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::tests::{move_frame, press_frame, reference_profile, release_frame};
    use retouch_event_model::event::{AbsCode, Event, EventCode, KeyCode};

    fn frame(events: Vec<Event>) -> Interaction {
        let mut events = events;
        events.push(Event::new(0, EventCode::REPORT, 0));
        Interaction::new(events).unwrap()
    }

    #[test]
    fn test_reference_frames_classify() {
        let profile = reference_profile();
        assert_eq!(classify(&press_frame(500, 1000), &profile), Action::Press);
        assert_eq!(classify(&move_frame(10, 10), &profile), Action::Move);
        assert_eq!(classify(&release_frame(), &profile), Action::Release);
    }

    #[test]
    fn test_exactly_three_quarters_is_press() {
        // Press signature: tracking id, touch down, touch major, width major.
        let profile = reference_profile();
        assert_eq!(profile.press_fingerprints().len(), 4);

        let three_of_four = frame(vec![
            Event::new(0, EventCode::Abs(AbsCode::MtTrackingId), 40),
            Event::new(0, EventCode::Key(KeyCode::BtnTouch), 1),
            Event::new(0, EventCode::Abs(AbsCode::MtTouchMajor), 9),
            Event::new(0, EventCode::Abs(AbsCode::MtPositionX), 9),
        ]);
        assert_eq!(classify(&three_of_four, &profile), Action::Press);
    }

    #[test]
    fn test_below_three_quarters_is_move() {
        let profile = reference_profile();
        let two_of_four = frame(vec![
            Event::new(0, EventCode::Abs(AbsCode::MtTrackingId), 40),
            Event::new(0, EventCode::Key(KeyCode::BtnTouch), 1),
            Event::new(0, EventCode::Abs(AbsCode::MtPositionX), 9),
        ]);
        assert_eq!(classify(&two_of_four, &profile), Action::Move);
    }

    #[test]
    fn test_half_release_signature_is_move() {
        // Release signature: released tracking id and touch up.
        let profile = reference_profile();
        let touch_up_only = frame(vec![Event::new(0, EventCode::Key(KeyCode::BtnTouch), 0)]);
        assert_eq!(classify(&touch_up_only, &profile), Action::Move);
    }

    #[test]
    fn test_empty_signature_never_covers() {
        let some: HashSet<Fingerprint> = [Fingerprint {
            code: EventCode::REPORT,
            value: 0,
        }]
        .into_iter()
        .collect();
        assert!(!covers(&some, &HashSet::new()));
    }
}
