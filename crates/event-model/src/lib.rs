//! Retouch Event Model
//!
//! Defines the core data contracts shared by the translation engine:
//! - **Events:** Raw low-level input events as captured from a touch panel
//! - **Fingerprints:** Value-reduced event signatures used for calibration
//! - **Device:** Display and touch-panel geometry of one capture session
//! - **Portable interactions:** The device-independent exchange format
//!
//! Portable coordinates are percentages of the application viewport so a
//! recording survives resolution, aspect-ratio, and rotation changes.

pub mod device;
pub mod error;
pub mod event;
pub mod portable;

pub use device::*;
pub use error::*;
pub use event::*;
pub use portable::*;
