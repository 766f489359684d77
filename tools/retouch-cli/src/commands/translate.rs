//! Convert portable interactions into a replay artifact.

use std::path::PathBuf;

use retouch_common::config::EngineConfig;
use retouch_device_probe::{find_touch_node, node_number};
use retouch_engine::{translate_portable, CalibrationProfile};

use super::{load_device, read_input, write_output};

pub fn run(
    calibration: PathBuf,
    device: PathBuf,
    input: PathBuf,
    device_id: Option<u32>,
    getevent_dump: Option<PathBuf>,
    output: Option<PathBuf>,
    config: EngineConfig,
) -> anyhow::Result<()> {
    let device_id = match (device_id, getevent_dump) {
        (Some(id), _) => id,
        (None, Some(path)) => {
            let node = find_touch_node(&read_input(&path)?)
                .ok_or_else(|| anyhow::anyhow!("No touch node in {}", path.display()))?;
            node_number(&node)?
        }
        (None, None) => anyhow::bail!("Either --device-id or --getevent-dump is required"),
    };

    let profile = CalibrationProfile::from_capture(&read_input(&calibration)?)?;
    let device = load_device(&device)?;
    let portable = read_input(&input)?;

    let artifact = translate_portable(&profile, &device, &portable, device_id, config)?;
    eprintln!("Synthesized {} events for device {device_id}", artifact.len());
    write_output(output.as_ref(), &artifact.to_string())
}
