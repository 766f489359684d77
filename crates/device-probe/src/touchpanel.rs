//! Touch-panel range and node discovery from `getevent` dumps.

use retouch_common::error::{RetouchError, RetouchResult};
use retouch_event_model::device::Screen;

const NODE_PREFIX: &str = "/dev/input/event";

/// Panel range from `getevent -lp`: the `max` of the X and Y position axes.
///
/// Both multi-touch and single-touch axis labels are accepted; the last
/// one listed wins.
pub fn parse_touch_panel(dump: &str) -> RetouchResult<Screen> {
    let mut width = None;
    let mut height = None;

    for line in dump.lines() {
        if line.contains("ABS_MT_POSITION_X") || line.contains("ABS_X") {
            width = Some(axis_max(line)?);
        } else if line.contains("ABS_MT_POSITION_Y") || line.contains("ABS_Y") {
            height = Some(axis_max(line)?);
        }
    }

    match (width, height) {
        (Some(width), Some(height)) => Ok(Screen::new(width, height)),
        _ => Err(RetouchError::probe(
            "getevent dump does not describe both position axes",
        )),
    }
}

fn axis_max(line: &str) -> RetouchResult<u32> {
    let rest = line
        .split_once("max ")
        .map(|(_, rest)| rest)
        .ok_or_else(|| RetouchError::probe(format!("axis line has no max: {}", line.trim())))?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits
        .parse()
        .map_err(|e| RetouchError::probe(format!("invalid axis max in {:?}: {e}", line.trim())))
}

/// Touch node from `getevent -p`: the last device registered before the
/// multi-touch tracking-id capability (`0039`) is listed.
pub fn find_touch_node(dump: &str) -> Option<String> {
    let mut node = None;
    for line in dump.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("add device") {
            node = rest
                .split_once(": ")
                .map(|(_, path)| path.trim().to_string());
        } else if trimmed.contains("0039  :") {
            return node;
        }
    }
    None
}

/// Numeric suffix of an event node (`/dev/input/event3` -> 3).
pub fn node_number(node: &str) -> RetouchResult<u32> {
    node.trim()
        .trim_end_matches(':')
        .strip_prefix(NODE_PREFIX)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| RetouchError::probe(format!("not an input event node: {node}")))
}
