//! Portable interactions to a device-native event stream.
//!
//! Press and release rows replay the calibration's boundary frames with
//! their positions rewritten for the target device. Move rows become one
//! position event per present axis followed by a frame report.

use retouch_common::config::EngineConfig;
use retouch_common::error::RetouchResult;
use retouch_event_model::device::Device;
use retouch_event_model::event::{Axis, Event, EventCode, TRACKING_ID_RELEASED};
use retouch_event_model::portable::{Action, PortableInteraction};

use crate::calibration::CalibrationProfile;
use crate::geometry::GeometryTransform;
use crate::segment::Interaction;

/// Rebuilds raw events for a target device.
///
/// Holds the session's tracking-id counter, so one translator should be used
/// per replay script.
pub struct Translator<'a> {
    profile: &'a CalibrationProfile,
    transform: GeometryTransform<'a>,
    config: EngineConfig,
    next_tracking_id: u32,
}

impl<'a> Translator<'a> {
    pub fn new(
        profile: &'a CalibrationProfile,
        device: &'a Device,
        config: EngineConfig,
    ) -> RetouchResult<Self> {
        Ok(Self {
            profile,
            transform: GeometryTransform::new(device)?,
            next_tracking_id: config.tracking_id_seed,
            config,
        })
    }

    /// Hand out the next tracking identifier.
    pub fn allocate_tracking_id(&mut self) -> u32 {
        let id = self.next_tracking_id;
        self.next_tracking_id = self.next_tracking_id.wrapping_add(1);
        id
    }

    /// Translate every row, preserving order. A coordinate the target panel
    /// cannot represent aborts the whole batch.
    pub fn translate(&mut self, rows: &[PortableInteraction]) -> RetouchResult<Vec<Event>> {
        let mut output = Vec::new();
        for row in rows {
            let mut group = match row.action {
                Action::Press => {
                    let tracking_id = self.allocate_tracking_id();
                    self.replay_template(self.profile.press_template(), row, Some(tracking_id))?
                }
                Action::Release => self.replay_template(self.profile.release_template(), row, None)?,
                Action::Move => self.synthesize_move(row)?,
            };

            // Only the first event waits; the rest of the group fires at once.
            if let Some(first) = group.first_mut() {
                first.time = row.delta_time;
            }
            tracing::debug!(action = %row.action, events = group.len(), "Translated interaction");
            output.append(&mut group);
        }

        tracing::info!(
            rows = rows.len(),
            events = output.len(),
            "Translation complete"
        );
        Ok(output)
    }

    fn replay_template(
        &self,
        template: &Interaction,
        row: &PortableInteraction,
        tracking_id: Option<u32>,
    ) -> RetouchResult<Vec<Event>> {
        let mut group = Vec::with_capacity(template.len());
        for event in template.events() {
            let mut event = Event {
                time: self.config.immediate_delay,
                ..*event
            };

            if let Some(panel) = event.axis() {
                let viewport = self.transform.viewport_axis(panel);
                let Some(percent) = row.coordinate(viewport) else {
                    continue;
                };
                event.value = self.transform.to_panel(viewport, percent)?.1;
            } else if event.is_tracking_id() && event.value != TRACKING_ID_RELEASED {
                if let Some(id) = tracking_id {
                    event.value = i64::from(id);
                }
            }

            group.push(event);
        }
        Ok(group)
    }

    fn synthesize_move(&self, row: &PortableInteraction) -> RetouchResult<Vec<Event>> {
        let mut group = Vec::with_capacity(3);
        for panel in [Axis::X, Axis::Y] {
            let viewport = self.transform.viewport_axis(panel);
            if let Some(percent) = row.coordinate(viewport) {
                let (_, raw) = self.transform.to_panel(viewport, percent)?;
                group.push(Event::new(
                    self.config.immediate_delay,
                    self.profile.axis_code(panel),
                    raw,
                ));
            }
        }
        group.push(Event::new(self.config.immediate_delay, EventCode::REPORT, 0));
        Ok(group)
    }
}
