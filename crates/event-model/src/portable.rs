//! Device-independent interaction records.
//!
//! The portable file is the hand-off between `virtualize` and `translate`:
//!
//! ```text
//! # Orientation: portrait
//! #
//! # Time Action X Y
//! 0	press	50.0	50.0
//! 16000	move	51.5	--
//! ```
//!
//! Coordinates are percentages of the application viewport; `--` marks an
//! axis the interaction did not report.

use std::fmt;
use std::str::FromStr;

use crate::device::Orientation;
use crate::error::ModelError;
use crate::event::{is_annotation, Axis};

/// Placeholder for an absent coordinate.
pub const ABSENT: &str = "--";

/// What an interaction does to the contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Press,
    Move,
    Release,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Press => f.write_str("press"),
            Action::Move => f.write_str("move"),
            Action::Release => f.write_str("release"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "press" => Ok(Action::Press),
            "move" => Ok(Action::Move),
            "release" => Ok(Action::Release),
            other => Err(format!("unknown action {other:?}")),
        }
    }
}

/// One interaction in portable form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortableInteraction {
    /// Time since the previous portable interaction (0 for the first).
    pub delta_time: u64,
    pub action: Action,
    /// Percent of the application viewport width.
    pub x: Option<f64>,
    /// Percent of the application viewport height.
    pub y: Option<f64>,
}

impl PortableInteraction {
    pub fn new(delta_time: u64, action: Action, x: Option<f64>, y: Option<f64>) -> Self {
        Self {
            delta_time,
            action,
            x,
            y,
        }
    }

    /// Parse one tab- or space-separated row.
    pub fn parse_row(text: &str, line: usize) -> Result<Self, ModelError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != 4 {
            return Err(ModelError::parse(
                line,
                format!(
                    "expected 4 fields (time action x y), found {}",
                    tokens.len()
                ),
            ));
        }

        let delta_time = tokens[0]
            .parse::<u64>()
            .map_err(|e| ModelError::parse(line, format!("invalid time {:?}: {e}", tokens[0])))?;
        let action = tokens[1]
            .parse::<Action>()
            .map_err(|message| ModelError::parse(line, message))?;
        let x = parse_coordinate(tokens[2], "x", line)?;
        let y = parse_coordinate(tokens[3], "y", line)?;

        Ok(Self::new(delta_time, action, x, y))
    }

    pub fn has_position(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Coordinate along a viewport axis.
    pub fn coordinate(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl fmt::Display for PortableInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.delta_time,
            self.action,
            Coordinate(self.x),
            Coordinate(self.y)
        )
    }
}

struct Coordinate(Option<f64>);

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            // Debug keeps the trailing ".0" and round-trips exactly.
            Some(value) => write!(f, "{value:?}"),
            None => f.write_str(ABSENT),
        }
    }
}

fn parse_coordinate(token: &str, axis: &str, line: usize) -> Result<Option<f64>, ModelError> {
    if token == ABSENT {
        return Ok(None);
    }
    let value = token
        .parse::<f64>()
        .map_err(|e| ModelError::parse(line, format!("invalid {axis} {token:?}: {e}")))?;
    if !value.is_finite() {
        return Err(ModelError::parse(line, format!("non-finite {axis} {token:?}")));
    }
    Ok(Some(value))
}

/// Render a portable file, header included.
pub fn write_interactions(orientation: Orientation, interactions: &[PortableInteraction]) -> String {
    let mut output = format!("# Orientation: {orientation}\n#\n# Time Action X Y\n");
    for interaction in interactions {
        output.push_str(&interaction.to_string());
        output.push('\n');
    }
    output
}

/// Parse a portable file, skipping comment lines.
pub fn parse_interactions(text: &str) -> Result<Vec<PortableInteraction>, ModelError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !is_annotation(line))
        .map(|(idx, line)| PortableInteraction::parse_row(line, idx + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_row_format() {
        let row = PortableInteraction::new(0, Action::Press, Some(50.0), Some(12.5));
        assert_eq!(row.to_string(), "0\tpress\t50.0\t12.5");

        let row = PortableInteraction::new(16, Action::Move, None, Some(3.25));
        assert_eq!(row.to_string(), "16\tmove\t--\t3.25");
    }

    #[test]
    fn test_header_block() {
        let text = write_interactions(Orientation::Landscape, &[]);
        assert_eq!(text, "# Orientation: landscape\n#\n# Time Action X Y\n");
    }

    #[test]
    fn test_file_roundtrip() {
        let rows = vec![
            PortableInteraction::new(0, Action::Press, Some(10.0), Some(20.0)),
            PortableInteraction::new(8000, Action::Move, Some(100.0 / 3.0), None),
            PortableInteraction::new(8000, Action::Release, None, None),
        ];
        let text = write_interactions(Orientation::Portrait, &rows);
        assert_eq!(parse_interactions(&text).unwrap(), rows);
    }

    #[test]
    fn test_parse_accepts_space_separated() {
        let row = PortableInteraction::parse_row("5 release -- --", 1).unwrap();
        assert_eq!(row.action, Action::Release);
        assert!(!row.has_position());
    }

    #[test]
    fn test_parse_rejects_unknown_action() {
        let err = parse_interactions("# h\n0\ttap\t1.0\t1.0\n").unwrap_err();
        match err {
            ModelError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("tap"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        assert!(PortableInteraction::parse_row("0\tpress\t1.0", 1).is_err());
        assert!(PortableInteraction::parse_row("0\tpress\tNaN\t1.0", 1).is_err());
    }

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![Just(Action::Press), Just(Action::Move), Just(Action::Release)]
    }

    proptest! {
        #[test]
        fn prop_rows_survive_file_roundtrip(
            rows in prop::collection::vec(
                (
                    0u64..100_000,
                    arb_action(),
                    proptest::option::of(prop::num::f64::NORMAL | prop::num::f64::ZERO),
                    proptest::option::of(-1_000.0f64..1_000.0),
                ),
                0..50,
            ),
        ) {
            let rows: Vec<PortableInteraction> = rows
                .into_iter()
                .map(|(delta, action, x, y)| PortableInteraction::new(delta, action, x, y))
                .collect();
            let text = write_interactions(Orientation::Portrait, &rows);
            prop_assert_eq!(parse_interactions(&text).unwrap(), rows);
        }
    }
}
