//! Mapping between touch-panel units and application-viewport percentages.
//!
//! When the display is rotated relative to the panel's natural orientation
//! the axes swap: the panel X axis runs along the viewport's Y axis, measured
//! from the far edge and shifted by the letterbox margin.

use retouch_common::error::{RetouchError, RetouchResult};
use retouch_event_model::device::Device;
use retouch_event_model::event::Axis;

/// Bidirectional panel/viewport transform for one device.
#[derive(Debug, Clone, Copy)]
pub struct GeometryTransform<'a> {
    device: &'a Device,
}

impl<'a> GeometryTransform<'a> {
    /// Validate the device geometry and build the transform.
    pub fn new(device: &'a Device) -> RetouchResult<Self> {
        device.validate()?;
        Ok(Self { device })
    }

    pub fn device(&self) -> &Device {
        self.device
    }

    /// Viewport axis fed by a panel axis.
    pub fn viewport_axis(&self, panel: Axis) -> Axis {
        match (self.device.rotated, panel) {
            (false, axis) => axis,
            (true, Axis::X) => Axis::Y,
            (true, Axis::Y) => Axis::X,
        }
    }

    /// Panel axis that reports a viewport axis.
    pub fn panel_axis(&self, viewport: Axis) -> Axis {
        // The swap is its own inverse.
        self.viewport_axis(viewport)
    }

    /// Convert a raw panel value to a viewport axis and percentage.
    pub fn to_portable(&self, panel: Axis, raw: i64) -> (Axis, f64) {
        let app_w = f64::from(self.device.app_touch.width);
        let app_h = f64::from(self.device.app_touch.height);
        let menu_h = f64::from(self.device.menu_touch.height);
        let raw = raw as f64;

        match (self.device.rotated, panel) {
            (false, Axis::X) => (Axis::X, 100.0 * raw / app_w),
            (false, Axis::Y) => (Axis::Y, 100.0 * raw / app_h),
            (true, Axis::X) => (Axis::Y, 100.0 * (app_h - raw + menu_h) / app_h),
            (true, Axis::Y) => (Axis::X, 100.0 * raw / app_w),
        }
    }

    /// Convert a viewport percentage back to a panel axis and raw value.
    ///
    /// Fails when the result does not fit the kernel's 32-bit event value.
    pub fn to_panel(&self, viewport: Axis, percent: f64) -> RetouchResult<(Axis, i64)> {
        let app_w = f64::from(self.device.app_touch.width);
        let app_h = f64::from(self.device.app_touch.height);
        let menu_h = f64::from(self.device.menu_touch.height);

        let (panel, raw) = match (self.device.rotated, viewport) {
            (false, Axis::X) => (Axis::X, percent * app_w / 100.0),
            (false, Axis::Y) => (Axis::Y, percent * app_h / 100.0),
            (true, Axis::Y) => (Axis::X, menu_h + app_h - percent * app_h / 100.0),
            (true, Axis::X) => (Axis::Y, percent * app_w / 100.0),
        };
        let raw = raw.round();
        if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&raw) {
            return Err(RetouchError::geometry(format!(
                "{percent}% on the {viewport:?} axis maps outside the panel value range"
            )));
        }
        Ok((panel, raw as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use retouch_event_model::device::Screen;

    fn upright() -> Device {
        Device::derive(
            Screen::new(500, 1000),
            Screen::new(500, 1000),
            Screen::new(500, 1000),
            Screen::new(1000, 2000),
        )
        .unwrap()
    }

    fn rotated() -> Device {
        // Landscape display on a portrait panel with a side navigation bar.
        Device::derive(
            Screen::new(720, 1280),
            Screen::new(1280, 720),
            Screen::new(1280, 648),
            Screen::new(1440, 2560),
        )
        .unwrap()
    }

    #[test]
    fn test_upright_center_is_fifty_percent() {
        let device = upright();
        let transform = GeometryTransform::new(&device).unwrap();
        assert_eq!(transform.to_portable(Axis::X, 500), (Axis::X, 50.0));
        assert_eq!(transform.to_portable(Axis::Y, 1000), (Axis::Y, 50.0));
        assert_eq!(transform.to_panel(Axis::X, 50.0).unwrap(), (Axis::X, 500));
    }

    #[test]
    fn test_rotated_swaps_axes_with_menu_offset() {
        let device = rotated();
        assert!(device.rotated);
        assert_eq!(device.app_touch, Screen::new(2560, 1296));
        assert_eq!(device.menu_touch, Screen::new(0, 144));

        let transform = GeometryTransform::new(&device).unwrap();
        let (axis, y) = transform.to_portable(Axis::X, 1440);
        assert_eq!(axis, Axis::Y);
        assert!((y - 0.0).abs() < 1e-9);

        let (axis, x) = transform.to_portable(Axis::Y, 1280);
        assert_eq!(axis, Axis::X);
        assert!((x - 50.0).abs() < 1e-9);

        assert_eq!(transform.to_panel(Axis::Y, 100.0).unwrap(), (Axis::X, 144));
        assert_eq!(transform.panel_axis(Axis::X), Axis::Y);
    }

    #[test]
    fn test_zero_extent_device_rejected() {
        let mut device = upright();
        device.app_touch = Screen::new(0, 2000);
        device.menu_touch = Screen::new(1000, 0);
        assert!(matches!(
            GeometryTransform::new(&device),
            Err(RetouchError::Geometry { .. })
        ));
    }

    #[test]
    fn test_out_of_range_percentage_rejected() {
        let device = upright();
        let transform = GeometryTransform::new(&device).unwrap();
        assert!(matches!(
            transform.to_panel(Axis::X, 1e308),
            Err(RetouchError::Geometry { .. })
        ));
        assert!(transform.to_panel(Axis::Y, -1e308).is_err());
        // Slightly outside the viewport is still a valid panel value.
        assert_eq!(transform.to_panel(Axis::X, -1.0).unwrap(), (Axis::X, -10));
    }

    proptest! {
        #[test]
        fn prop_upright_roundtrip(raw in 0i64..=1000, axis in prop_oneof![Just(Axis::X), Just(Axis::Y)]) {
            let device = upright();
            let transform = GeometryTransform::new(&device).unwrap();
            let (view, percent) = transform.to_portable(axis, raw);
            let (panel, back) = transform.to_panel(view, percent).unwrap();
            prop_assert_eq!(panel, axis);
            prop_assert!((back - raw).abs() <= 1);
        }

        #[test]
        fn prop_rotated_roundtrip(raw in 0i64..=2560, axis in prop_oneof![Just(Axis::X), Just(Axis::Y)]) {
            let device = rotated();
            let transform = GeometryTransform::new(&device).unwrap();
            let (view, percent) = transform.to_portable(axis, raw);
            let (panel, back) = transform.to_panel(view, percent).unwrap();
            prop_assert_eq!(panel, axis);
            prop_assert!((back - raw).abs() <= 1);
        }
    }
}
