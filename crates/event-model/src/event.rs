//! Raw input events as reported by a Linux touch panel.
//!
//! Capture files hold one event per line: `<time> <type> <code> <value>`,
//! where time is a decimal integer and the rest are hexadecimal. Lines that
//! contain a `#` are annotations and never reach the parser.

use std::fmt;

use crate::error::ModelError;

/// Device clock timestamp, already scaled to an integer.
pub type Timestamp = u64;

/// Tracking-id value reported when a contact is lifted (`-1` as `u32`).
pub const TRACKING_ID_RELEASED: i64 = 0xffff_ffff;

/// Event types understood by the engine (subset of `input-event-codes.h`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Syn,
    Key,
    Abs,
    Msc,
}

impl EventType {
    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            0x00 => Some(Self::Syn),
            0x01 => Some(Self::Key),
            0x03 => Some(Self::Abs),
            0x04 => Some(Self::Msc),
            _ => None,
        }
    }

    pub fn raw(self) -> u16 {
        match self {
            Self::Syn => 0x00,
            Self::Key => 0x01,
            Self::Abs => 0x03,
            Self::Msc => 0x04,
        }
    }
}

macro_rules! kernel_codes {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $raw:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A code this table does not name; carried through unchanged.
            Other(u16),
        }

        impl $name {
            pub fn from_raw(raw: u16) -> Self {
                match raw {
                    $($raw => Self::$variant,)+
                    other => Self::Other(other),
                }
            }

            pub fn raw(self) -> u16 {
                match self {
                    $(Self::$variant => $raw,)+
                    Self::Other(raw) => raw,
                }
            }
        }
    };
}

kernel_codes! {
    /// `EV_SYN` codes.
    SynCode {
        /// End of a complete frame of touch data.
        Report = 0x00,
        Config = 0x01,
        MtReport = 0x02,
        Dropped = 0x03,
    }
}

kernel_codes! {
    /// `EV_KEY` codes emitted by touch panels.
    KeyCode {
        BtnToolPen = 0x140,
        BtnToolRubber = 0x141,
        BtnToolBrush = 0x142,
        BtnToolPencil = 0x143,
        BtnToolAirbrush = 0x144,
        BtnToolFinger = 0x145,
        BtnToolMouse = 0x146,
        BtnToolLens = 0x147,
        /// Contact down (1) / up (0).
        BtnTouch = 0x14a,
    }
}

kernel_codes! {
    /// `EV_ABS` axes.
    AbsCode {
        X = 0x00,
        Y = 0x01,
        Pressure = 0x18,
        Distance = 0x19,
        ToolWidth = 0x1c,
        MtSlot = 0x2f,
        MtTouchMajor = 0x30,
        MtTouchMinor = 0x31,
        MtWidthMajor = 0x32,
        MtWidthMinor = 0x33,
        MtOrientation = 0x34,
        MtPositionX = 0x35,
        MtPositionY = 0x36,
        MtToolType = 0x37,
        MtBlobId = 0x38,
        MtTrackingId = 0x39,
        MtPressure = 0x3a,
        MtDistance = 0x3b,
        MtToolX = 0x3c,
        MtToolY = 0x3d,
        Max = 0x3f,
    }
}

kernel_codes! {
    /// `EV_MSC` codes.
    MscCode {
        Scan = 0x04,
    }
}

/// Panel axis carried by a coordinate-bearing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl AbsCode {
    /// The panel axis this code reports, if it is a position code.
    pub fn axis(self) -> Option<Axis> {
        match self {
            AbsCode::X | AbsCode::MtPositionX => Some(Axis::X),
            AbsCode::Y | AbsCode::MtPositionY => Some(Axis::Y),
            _ => None,
        }
    }
}

/// Type and code of an event, as one tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCode {
    Syn(SynCode),
    Key(KeyCode),
    Abs(AbsCode),
    Msc(MscCode),
}

impl EventCode {
    /// The frame-complete marker (`SYN_REPORT`).
    pub const REPORT: EventCode = EventCode::Syn(SynCode::Report);

    /// Decode a raw `(type, code)` pair. Returns `None` for unknown types.
    pub fn from_raw(ty: u16, code: u16) -> Option<Self> {
        let code = match EventType::from_raw(ty)? {
            EventType::Syn => EventCode::Syn(SynCode::from_raw(code)),
            EventType::Key => EventCode::Key(KeyCode::from_raw(code)),
            EventType::Abs => EventCode::Abs(AbsCode::from_raw(code)),
            EventType::Msc => EventCode::Msc(MscCode::from_raw(code)),
        };
        Some(code)
    }

    pub fn event_type(self) -> EventType {
        match self {
            EventCode::Syn(_) => EventType::Syn,
            EventCode::Key(_) => EventType::Key,
            EventCode::Abs(_) => EventType::Abs,
            EventCode::Msc(_) => EventType::Msc,
        }
    }

    pub fn raw_code(self) -> u16 {
        match self {
            EventCode::Syn(c) => c.raw(),
            EventCode::Key(c) => c.raw(),
            EventCode::Abs(c) => c.raw(),
            EventCode::Msc(c) => c.raw(),
        }
    }

    /// Position axis carried by this code, if any.
    pub fn axis(self) -> Option<Axis> {
        match self {
            EventCode::Abs(abs) => abs.axis(),
            _ => None,
        }
    }

    pub fn is_frame_end(self) -> bool {
        self == Self::REPORT
    }
}

/// A single raw input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Device clock time (capture) or delay before this event (replay).
    pub time: Timestamp,

    /// Event type and code.
    pub code: EventCode,

    /// Raw value; 32-bit register contents widened to `i64`.
    pub value: i64,
}

/// Value-reduced event signature.
///
/// Only contact down/up and the released tracking-id keep their value, so
/// the same gesture performed at different coordinates yields the same
/// fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub code: EventCode,
    pub value: i64,
}

impl Event {
    pub fn new(time: Timestamp, code: EventCode, value: i64) -> Self {
        Self { time, code, value }
    }

    /// Parse one capture line. `line` is only used for error reporting.
    pub fn parse_line(text: &str, line: usize) -> Result<Self, ModelError> {
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.first() == Some(&"[") {
            tokens.remove(0);
        }
        if tokens.len() != 4 {
            return Err(ModelError::parse(
                line,
                format!(
                    "expected 4 fields (time type code value), found {}",
                    tokens.len()
                ),
            ));
        }

        let time = tokens[0]
            .trim_matches(|c| c == '[' || c == ']')
            .parse::<Timestamp>()
            .map_err(|e| ModelError::parse(line, format!("invalid time {:?}: {e}", tokens[0])))?;
        let ty = parse_hex_u16(tokens[1], "type", line)?;
        let code = parse_hex_u16(tokens[2], "code", line)?;
        let value = u32::from_str_radix(tokens[3], 16)
            .map_err(|e| ModelError::parse(line, format!("invalid value {:?}: {e}", tokens[3])))?;

        let code = EventCode::from_raw(ty, code)
            .ok_or_else(|| ModelError::parse(line, format!("unsupported event type {ty:#06x}")))?;

        Ok(Self::new(time, code, i64::from(value)))
    }

    pub fn event_type(&self) -> EventType {
        self.code.event_type()
    }

    pub fn axis(&self) -> Option<Axis> {
        self.code.axis()
    }

    pub fn is_frame_end(&self) -> bool {
        self.code.is_frame_end()
    }

    pub fn is_tracking_id(&self) -> bool {
        self.code == EventCode::Abs(AbsCode::MtTrackingId)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let keeps_value = match self.code {
            EventCode::Key(KeyCode::BtnTouch) => true,
            EventCode::Abs(AbsCode::MtTrackingId) => self.value == TRACKING_ID_RELEASED,
            _ => false,
        };
        Fingerprint {
            code: self.code,
            value: if keeps_value { self.value } else { 0 },
        }
    }

    /// Loose signature comparison: values must match, and so must the code
    /// unless either side is a `BTN_TOUCH` event.
    pub fn signature_eq(&self, other: &Event) -> bool {
        if self.value != other.value {
            return false;
        }
        let touch = EventCode::Key(KeyCode::BtnTouch);
        self.code == other.code || self.code == touch || other.code == touch
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:04x} {:04x} {:08x}",
            self.time,
            self.code.event_type().raw(),
            self.code.raw_code(),
            self.value as u32
        )
    }
}

fn parse_hex_u16(token: &str, field: &str, line: usize) -> Result<u16, ModelError> {
    u16::from_str_radix(token, 16)
        .map_err(|e| ModelError::parse(line, format!("invalid {field} {token:?}: {e}")))
}

/// Whether a capture line is an annotation rather than an event.
pub fn is_annotation(line: &str) -> bool {
    line.contains('#') || line.trim().is_empty()
}

/// Parse a capture file, skipping annotations. Any bad line aborts the parse.
pub fn parse_events(text: &str) -> Result<Vec<Event>, ModelError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !is_annotation(line))
        .map(|(idx, line)| Event::parse_line(line, idx + 1))
        .collect()
}
