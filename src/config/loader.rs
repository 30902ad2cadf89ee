use std::path::Path;

use anyhow::{Context, Result};

use super::types::Config;

/// Name of the optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = ".archonrc";

/// Load config from an `.archonrc` file in the given directory, falling
/// back to defaults when the file does not exist. A present but malformed
/// file is an error.
pub fn load(dir: &Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(dir.path()).unwrap();
        assert_eq!(cfg.container_name, "archon-container");
        assert_eq!(cfg.required_ports(), [8501, 8100]);
        assert_eq!(cfg.mcp_context, "mcp");
    }

    #[test]
    fn partial_file_overlays_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "ui_port: 9000\ncontainer_name: archon-dev\n",
        )
        .unwrap();

        let cfg = load(dir.path()).unwrap();
        assert_eq!(cfg.ui_port, 9000);
        assert_eq!(cfg.container_name, "archon-dev");
        // Untouched fields keep their defaults.
        assert_eq!(cfg.mcp_port, 8100);
        assert_eq!(cfg.app_image, "archon:latest");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "ui_port: [not a port\n").unwrap();
        assert!(load(dir.path()).is_err());
    }
}
