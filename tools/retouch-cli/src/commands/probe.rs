//! Write a device profile.

use std::path::PathBuf;

use retouch_device_probe::{find_touch_node, node_number, probe_device};

use super::read_input;

pub fn run(
    display_dump: PathBuf,
    touch_dump: PathBuf,
    getevent_dump: Option<PathBuf>,
    output: PathBuf,
) -> anyhow::Result<()> {
    let device = probe_device(&read_input(&display_dump)?, &read_input(&touch_dump)?)?;

    println!("Device:");
    println!("  Default display: {}", device.init_display);
    println!("  Current display: {}", device.cur_display);
    println!("  App display: {}", device.app_display);
    println!("  Rotated: {}", device.rotated);
    println!("  Default touchscreen: {}", device.init_touch);
    println!("  Current touchscreen: {}", device.cur_touch);
    println!("  App touchscreen: {}", device.app_touch);
    println!("  Menu touchscreen: {}", device.menu_touch);

    if let Some(path) = getevent_dump {
        match find_touch_node(&read_input(&path)?) {
            Some(node) => println!("  Touch node: {node} (device id {})", node_number(&node)?),
            None => println!("  Touch node: not found"),
        }
    }

    let json = serde_json::to_string_pretty(&device)?;
    std::fs::write(&output, json)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", output.display()))?;
    println!("\nProfile saved to: {}", output.display());

    Ok(())
}
