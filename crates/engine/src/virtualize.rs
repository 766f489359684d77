//! Device capture to portable interactions.

use retouch_common::error::RetouchResult;
use retouch_event_model::device::Device;
use retouch_event_model::event::Axis;
use retouch_event_model::portable::{Action, PortableInteraction};

use crate::calibration::CalibrationProfile;
use crate::classify::classify;
use crate::geometry::GeometryTransform;
use crate::segment::Interaction;

/// Converts interactions captured on one device into portable records.
pub struct Virtualizer<'a> {
    profile: &'a CalibrationProfile,
    transform: GeometryTransform<'a>,
}

impl<'a> Virtualizer<'a> {
    pub fn new(profile: &'a CalibrationProfile, device: &'a Device) -> RetouchResult<Self> {
        Ok(Self {
            profile,
            transform: GeometryTransform::new(device)?,
        })
    }

    /// Viewport position reported by an interaction. The last event on an
    /// axis wins.
    pub fn locate(&self, interaction: &Interaction) -> (Option<f64>, Option<f64>) {
        let mut x = None;
        let mut y = None;
        for event in interaction.events() {
            let Some(panel) = event.axis() else {
                continue;
            };
            match self.transform.to_portable(panel, event.value) {
                (Axis::X, percent) => x = Some(percent),
                (Axis::Y, percent) => y = Some(percent),
            }
        }
        (x, y)
    }

    /// Classify and position every interaction.
    ///
    /// Moves without any position are housekeeping frames and are dropped.
    /// Each emitted row carries the time since the previous emitted row,
    /// measured between the latest timestamps of the two interactions.
    pub fn virtualize(&self, interactions: &[Interaction]) -> Vec<PortableInteraction> {
        let mut output = Vec::with_capacity(interactions.len());
        let mut last_time = None;
        let mut suppressed = 0usize;

        for interaction in interactions {
            let action = classify(interaction, self.profile);
            let (x, y) = self.locate(interaction);

            if action == Action::Move && x.is_none() && y.is_none() {
                suppressed += 1;
                continue;
            }

            let time = interaction.peak_time();
            let delta_time = match last_time {
                Some(last) if time < last => {
                    tracing::warn!(
                        previous = last,
                        current = time,
                        "Capture clock went backwards; using a zero delta"
                    );
                    0
                }
                Some(last) => time - last,
                None => 0,
            };
            last_time = Some(time);

            tracing::debug!(%action, delta_time, ?x, ?y, "Virtualized interaction");
            output.push(PortableInteraction::new(delta_time, action, x, y));
        }

        tracing::info!(
            emitted = output.len(),
            suppressed,
            "Virtualization complete"
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::tests::{move_frame, press_frame, reference_profile, release_frame};
    use retouch_event_model::device::Screen;
    use retouch_event_model::event::{AbsCode, Event, EventCode};

    fn device() -> Device {
        Device::derive(
            Screen::new(500, 1000),
            Screen::new(500, 1000),
            Screen::new(500, 1000),
            Screen::new(1000, 2000),
        )
        .unwrap()
    }

    fn at(interaction: Interaction, time: u64) -> Interaction {
        let events = interaction
            .events()
            .iter()
            .map(|e| Event { time, ..*e })
            .collect();
        Interaction::new(events).unwrap()
    }

    #[test]
    fn test_press_at_center() {
        let profile = reference_profile();
        let device = device();
        let virtualizer = Virtualizer::new(&profile, &device).unwrap();

        let rows = virtualizer.virtualize(&[press_frame(500, 1000)]);
        assert_eq!(
            rows,
            vec![PortableInteraction::new(0, Action::Press, Some(50.0), Some(50.0))]
        );
    }

    #[test]
    fn test_deltas_use_peak_times() {
        let profile = reference_profile();
        let device = device();
        let virtualizer = Virtualizer::new(&profile, &device).unwrap();

        let rows = virtualizer.virtualize(&[
            at(press_frame(100, 100), 1_000),
            at(move_frame(200, 200), 1_400),
            at(release_frame(), 2_000),
        ]);
        let deltas: Vec<u64> = rows.iter().map(|r| r.delta_time).collect();
        assert_eq!(deltas, vec![0, 400, 600]);
        assert_eq!(rows[2].action, Action::Release);
        assert_eq!(rows[2].x, None);
    }

    #[test]
    fn test_backwards_clock_gives_zero_delta() {
        let profile = reference_profile();
        let device = device();
        let virtualizer = Virtualizer::new(&profile, &device).unwrap();

        let rows = virtualizer.virtualize(&[
            at(press_frame(100, 100), 2_000),
            at(move_frame(200, 200), 1_500),
            at(move_frame(210, 210), 1_600),
        ]);
        let deltas: Vec<u64> = rows.iter().map(|r| r.delta_time).collect();
        assert_eq!(deltas, vec![0, 0, 100]);
    }

    #[test]
    fn test_positionless_move_is_suppressed() {
        let profile = reference_profile();
        let device = device();
        let virtualizer = Virtualizer::new(&profile, &device).unwrap();

        let housekeeping = Interaction::new(vec![
            Event::new(1_200, EventCode::Abs(AbsCode::MtPressure), 30),
            Event::new(1_200, EventCode::REPORT, 0),
        ])
        .unwrap();

        let rows = virtualizer.virtualize(&[
            at(press_frame(100, 100), 1_000),
            housekeeping,
            at(move_frame(200, 200), 1_500),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].action, Action::Move);
        assert_eq!(rows[1].delta_time, 500);
    }

    #[test]
    fn test_single_axis_move_keeps_other_absent() {
        let profile = reference_profile();
        let device = device();
        let virtualizer = Virtualizer::new(&profile, &device).unwrap();

        let y_only = Interaction::new(vec![
            Event::new(5, EventCode::Abs(AbsCode::MtPositionY), 500),
            Event::new(5, EventCode::REPORT, 0),
        ])
        .unwrap();
        let rows = virtualizer.virtualize(&[y_only]);
        assert_eq!(rows[0].x, None);
        assert_eq!(rows[0].y, Some(25.0));
    }
}
