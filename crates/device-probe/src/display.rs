//! Display geometry from `dumpsys window` output.

use retouch_common::error::{RetouchError, RetouchResult};
use retouch_event_model::device::Screen;

/// The three display rectangles the window manager reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Natural orientation.
    pub init: Screen,
    /// Current orientation.
    pub cur: Screen,
    /// Application content area.
    pub app: Screen,
}

/// Find the `init=WxH ... cur=WxH ... app=WxH` line and parse it.
pub fn parse_display_dump(dump: &str) -> RetouchResult<DisplayInfo> {
    tracing::debug!("Parsing display geometry");

    for line in dump.lines() {
        let init = dimension(line, "init=");
        let cur = dimension(line, "cur=");
        let app = dimension(line, "app=");
        if let (Some(init), Some(cur), Some(app)) = (init, cur, app) {
            return Ok(DisplayInfo { init, cur, app });
        }
    }

    Err(RetouchError::probe(
        "window dump has no line with init=, cur= and app= sizes",
    ))
}

/// Parse the `WxH` that follows `key` in a whitespace-separated line.
fn dimension(line: &str, key: &str) -> Option<Screen> {
    line.split_whitespace()
        .find_map(|token| token.strip_prefix(key))
        .and_then(parse_size)
}

fn parse_size(text: &str) -> Option<Screen> {
    let (w, h) = text.split_once('x')?;
    Some(Screen::new(w.parse().ok()?, h.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW_DUMP: &str = "\
WINDOW MANAGER POLICY STATE (dumpsys window policy)
  mDockLayer=268435456 mStatusBarLayer=181000
Display: mDisplayId=0
  init=1080x1920 480dpi cur=1920x1080 app=1794x1080 rng=1080x1017-1794x1731
  deferred=false layoutNeeded=false
";

    #[test]
    fn test_parse_display_dump() {
        let info = parse_display_dump(WINDOW_DUMP).unwrap();
        assert_eq!(info.init, Screen::new(1080, 1920));
        assert_eq!(info.cur, Screen::new(1920, 1080));
        assert_eq!(info.app, Screen::new(1794, 1080));
    }

    #[test]
    fn test_missing_geometry_line() {
        let err = parse_display_dump("nothing to see\n").unwrap_err();
        assert!(matches!(err, RetouchError::Probe { .. }));
    }

    #[test]
    fn test_malformed_size_is_skipped() {
        assert!(parse_display_dump("init=10x cur=10x10 app=10x10\n").is_err());
    }
}
