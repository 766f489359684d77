pub mod probe;
pub mod record;
pub mod translate;
pub mod virtualize;

use std::path::{Path, PathBuf};

use retouch_common::error::RetouchError;
use retouch_event_model::device::Device;

/// Read a whole input file.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        return Err(RetouchError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))
}

/// Load a device profile written by `retouch probe`.
pub fn load_device(path: &Path) -> anyhow::Result<Device> {
    let json = read_input(path)?;
    let device = Device::from_json(&json).map_err(|e| {
        RetouchError::config(format!("invalid device profile {}: {e}", path.display()))
    })?;
    Ok(device)
}

/// Write an artifact to `output`, or to stdout.
pub fn write_output(output: Option<&PathBuf>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_event_model::device::Screen;

    #[test]
    fn test_inconsistent_profile_is_config_error() {
        let mut device = Device::derive(
            Screen::new(720, 1280),
            Screen::new(720, 1280),
            Screen::new(720, 1184),
            Screen::new(1440, 2560),
        )
        .unwrap();
        device.rotated = true;

        let path =
            std::env::temp_dir().join(format!("retouch-profile-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&device).unwrap()).unwrap();
        let err = load_device(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            err.downcast_ref::<RetouchError>(),
            Some(RetouchError::Config { .. })
        ));
    }

    #[test]
    fn test_missing_input_is_file_not_found() {
        let err = read_input(Path::new("/nonexistent/retouch/capture.txt")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RetouchError>(),
            Some(RetouchError::FileNotFound { .. })
        ));
    }
}
