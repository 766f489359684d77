//! Normalize a saved `getevent -tt` log into a raw capture file.

use std::path::PathBuf;

use retouch_device_probe::{capture_header, probe_device, CaptureNormalizer};

use super::{read_input, write_output};

pub fn run(
    touch_node: String,
    display_dump: PathBuf,
    touch_dump: PathBuf,
    input: PathBuf,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let device = probe_device(&read_input(&display_dump)?, &read_input(&touch_dump)?)?;
    let log = read_input(&input)?;

    let events = CaptureNormalizer::new(touch_node.as_str()).normalize(&log)?;
    if events.is_empty() {
        tracing::warn!(node = %touch_node, "Log contains no events from the touch node");
    }

    let mut capture = capture_header(&device);
    for event in &events {
        capture.push_str(&event.to_string());
        capture.push('\n');
    }

    eprintln!("Recorded {} events from {touch_node}", events.len());
    write_output(output.as_ref(), &capture)
}
