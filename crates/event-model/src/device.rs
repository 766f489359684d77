//! Screen and touch-panel geometry of a capture session.
//!
//! A [`Device`] pairs the display geometry reported by the window manager
//! with the touch panel's coordinate range. The touch-panel screens are
//! expressed in panel units, so the application viewport on the panel is
//! scaled from the display viewport.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Screen orientation, derived from the aspect of a [`Screen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("portrait"),
            Orientation::Landscape => f.write_str("landscape"),
        }
    }
}

/// A rectangle size in pixels or panel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// The same screen with its axes exchanged.
    pub fn swapped(&self) -> Self {
        Self::new(self.height, self.width)
    }

    fn require_area(&self, name: &str) -> Result<(), ModelError> {
        if self.width == 0 || self.height == 0 {
            return Err(ModelError::geometry(format!(
                "{name} has zero extent ({self})"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.orientation())
    }
}

/// Geometry of one device for one capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Display in its natural orientation.
    pub init_display: Screen,
    /// Display as currently rotated.
    pub cur_display: Screen,
    /// Area of the display rendering app content.
    pub app_display: Screen,
    /// Whether the current orientation differs from the natural one.
    pub rotated: bool,
    /// Touch panel range in its natural orientation.
    pub init_touch: Screen,
    /// Touch panel range aligned with the current display orientation.
    pub cur_touch: Screen,
    /// Application viewport in panel units.
    pub app_touch: Screen,
    /// Letterbox margin (system bars) in panel units.
    pub menu_touch: Screen,
}

impl Device {
    /// Derive the full record from the display triple and the panel range.
    pub fn derive(
        init_display: Screen,
        cur_display: Screen,
        app_display: Screen,
        init_touch: Screen,
    ) -> Result<Self, ModelError> {
        init_display.require_area("initial display")?;
        cur_display.require_area("current display")?;
        app_display.require_area("application display")?;
        init_touch.require_area("touch panel")?;

        if app_display.width > cur_display.width || app_display.height > cur_display.height {
            return Err(ModelError::geometry(format!(
                "application display {app_display} exceeds current display {cur_display}"
            )));
        }

        let rotated = cur_display.orientation() != init_display.orientation();
        let cur_touch = if rotated {
            init_touch.swapped()
        } else {
            init_touch
        };

        let scale = |touch: u32, app: u32, cur: u32| -> u32 {
            (u64::from(touch) * u64::from(app) / u64::from(cur)) as u32
        };
        let app_touch = Screen::new(
            scale(cur_touch.width, app_display.width, cur_display.width),
            scale(cur_touch.height, app_display.height, cur_display.height),
        );
        let menu_touch = Screen::new(
            cur_touch.width - app_touch.width,
            cur_touch.height - app_touch.height,
        );

        let device = Self {
            init_display,
            cur_display,
            app_display,
            rotated,
            init_touch,
            cur_touch,
            app_touch,
            menu_touch,
        };
        device.validate()?;
        Ok(device)
    }

    /// Check the invariants of a record that did not come from [`Device::derive`].
    pub fn validate(&self) -> Result<(), ModelError> {
        self.init_display.require_area("initial display")?;
        self.cur_display.require_area("current display")?;
        self.app_display.require_area("application display")?;
        self.init_touch.require_area("initial touch panel")?;
        self.cur_touch.require_area("current touch panel")?;
        self.app_touch.require_area("application touch area")?;

        let rotated = self.cur_display.orientation() != self.init_display.orientation();
        if self.rotated != rotated {
            return Err(ModelError::geometry(format!(
                "rotated is {} but current display {} and initial display {} say {rotated}",
                self.rotated, self.cur_display, self.init_display
            )));
        }
        let expected_touch = if rotated {
            self.init_touch.swapped()
        } else {
            self.init_touch
        };
        if self.cur_touch != expected_touch {
            return Err(ModelError::geometry(format!(
                "current touch panel {} does not match initial panel {} (rotated: {rotated})",
                self.cur_touch, self.init_touch
            )));
        }

        let expected_menu = self
            .cur_touch
            .width
            .checked_sub(self.app_touch.width)
            .zip(self.cur_touch.height.checked_sub(self.app_touch.height))
            .map(|(w, h)| Screen::new(w, h));
        if expected_menu != Some(self.menu_touch) {
            return Err(ModelError::geometry(format!(
                "menu touch area {} does not match current {} minus application {}",
                self.menu_touch, self.cur_touch, self.app_touch
            )));
        }
        Ok(())
    }

    /// Orientation the display is currently in.
    pub fn orientation(&self) -> Orientation {
        self.cur_display.orientation()
    }

    /// Load a device profile from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let device: Device = serde_json::from_str(json)
            .map_err(|e| ModelError::geometry(format!("unreadable device profile: {e}")))?;
        device.validate()?;
        Ok(device)
    }
}
