//! Convert a raw capture into portable interactions.

use std::path::PathBuf;

use retouch_engine::{virtualize_capture, CalibrationProfile};

use super::{load_device, read_input, write_output};

pub fn run(
    calibration: PathBuf,
    device: PathBuf,
    input: PathBuf,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let profile = CalibrationProfile::from_capture(&read_input(&calibration)?)?;
    let device = load_device(&device)?;
    let capture = read_input(&input)?;

    let portable = virtualize_capture(&profile, &device, &capture)?;
    write_output(output.as_ref(), &portable)
}
