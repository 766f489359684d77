//! Retouch Engine
//!
//! Turns raw touch captures into device-independent interactions and back:
//!
//! - **Segmentation:** Split the event stream at frame boundaries
//! - **Calibration:** Learn press/release signatures from a reference swipe
//! - **Classification:** Label each frame press, move, or release
//! - **Geometry:** Map panel units to viewport percentages and back
//! - **Synthesis:** Rebuild a replayable event stream for a target device
//!
//! The engine is batch oriented: every input is read in full before
//! processing, and output preserves input order.

pub mod calibration;
pub mod classify;
pub mod geometry;
pub mod segment;
pub mod synthesize;
pub mod translate;
pub mod virtualize;

pub use calibration::CalibrationProfile;
pub use geometry::GeometryTransform;
pub use segment::{load_interactions, segment, Interaction};
pub use synthesize::ReplayArtifact;
pub use translate::Translator;
pub use virtualize::Virtualizer;

use retouch_common::config::EngineConfig;
use retouch_common::error::RetouchResult;
use retouch_event_model::device::Device;
use retouch_event_model::portable::{parse_interactions, write_interactions};

/// Virtualize a raw capture into the portable file format.
pub fn virtualize_capture(
    profile: &CalibrationProfile,
    device: &Device,
    capture: &str,
) -> RetouchResult<String> {
    let virtualizer = Virtualizer::new(profile, device)?;
    let interactions = load_interactions(capture)?;
    let rows = virtualizer.virtualize(&interactions);
    Ok(write_interactions(device.orientation(), &rows))
}

/// Translate a portable file into a replay artifact for `device`.
pub fn translate_portable(
    profile: &CalibrationProfile,
    device: &Device,
    portable: &str,
    device_id: u32,
    config: EngineConfig,
) -> RetouchResult<ReplayArtifact> {
    let mut translator = Translator::new(profile, device, config)?;
    let rows = parse_interactions(portable)?;
    let events = translator.translate(&rows)?;
    Ok(ReplayArtifact::new(device_id, events))
}
