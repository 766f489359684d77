//! Retouch device probing.
//!
//! Reads the text a device prints about itself and turns it into the
//! records the engine consumes:
//!
//! - `dumpsys window` output: display geometry (natural, current, app)
//! - `getevent -lp` output: touch-panel coordinate range
//! - `getevent -p` output: which `/dev/input/eventN` node is the touch panel
//! - `getevent -tt` logs: raw capture lines for that node
//!
//! Talking to the device is left to the caller.

pub mod capture;
pub mod display;
pub mod touchpanel;

use retouch_common::error::RetouchResult;
use retouch_event_model::device::Device;

pub use capture::{capture_header, CaptureNormalizer};
pub use display::{parse_display_dump, DisplayInfo};
pub use touchpanel::{find_touch_node, node_number, parse_touch_panel};

/// Build a device record from a window dump and a labelled getevent dump.
pub fn probe_device(window_dump: &str, getevent_labels: &str) -> RetouchResult<Device> {
    let display = parse_display_dump(window_dump)?;
    let panel = parse_touch_panel(getevent_labels)?;
    let device = Device::derive(display.init, display.cur, display.app, panel)?;
    tracing::info!(
        rotated = device.rotated,
        app_touch = %device.app_touch,
        menu_touch = %device.menu_touch,
        "Probed device geometry"
    );
    Ok(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_event_model::device::Screen;

    #[test]
    fn test_probe_rotated_device() {
        let window = "  init=1080x1920 480dpi cur=1920x1080 app=1794x1080 rng=1080x1017-1794x1731\n";
        let labels = "\
    ABS (0003): ABS_MT_POSITION_X     : value 0, min 0, max 1080, fuzz 0, flat 0, resolution 0
                ABS_MT_POSITION_Y     : value 0, min 0, max 1920, fuzz 0, flat 0, resolution 0
";
        let device = probe_device(window, labels).unwrap();
        assert!(device.rotated);
        assert_eq!(device.cur_touch, Screen::new(1920, 1080));
        assert_eq!(device.app_touch, Screen::new(1794, 1080));
        assert_eq!(device.menu_touch, Screen::new(126, 0));
    }

    #[test]
    fn test_probe_requires_panel_range() {
        let window = "init=1080x1920 cur=1080x1920 app=1080x1794\n";
        assert!(probe_device(window, "no axes here\n").is_err());
    }
}
