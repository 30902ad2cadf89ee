use serde::{Deserialize, Serialize};

/// Launcher settings. Defaults match the stock Archon deployment; an
/// `.archonrc` file may override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tag for the MCP server image.
    pub mcp_image: String,
    /// Tag for the main application image.
    pub app_image: String,
    /// Name given to the running application container.
    pub container_name: String,
    /// Host port publishing the Streamlit UI.
    pub ui_port: u16,
    /// Host port publishing the MCP service.
    pub mcp_port: u16,
    /// Build context of the MCP image, relative to the working directory.
    pub mcp_context: String,
    /// Seconds to wait after `docker run` before reporting the access URL.
    pub startup_grace: u64,
}

impl Config {
    /// Host ports that must be free before anything is built.
    pub fn required_ports(&self) -> [u16; 2] {
        [self.ui_port, self.mcp_port]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mcp_image: "archon-mcp:latest".to_string(),
            app_image: "archon:latest".to_string(),
            container_name: "archon-container".to_string(),
            ui_port: 8501,
            mcp_port: 8100,
            mcp_context: "mcp".to_string(),
            startup_grace: 2,
        }
    }
}
