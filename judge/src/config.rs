use std::path::Path;

use anyhow::Context;
use baghchal::GameConfig;
use serde::{Deserialize, Serialize};

/// How to start an external oracle process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Used in logs
    pub nick: String,
    /// The program followed by its arguments
    pub cmd: Vec<String>,
}

impl OracleConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read oracle config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid oracle config {}", path.display()))?;
        if config.cmd.is_empty() {
            anyhow::bail!("Oracle config {} has an empty command", path.display());
        }
        Ok(config)
    }
}

/// Reads and validates a game config.
pub fn load_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read game config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid game config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid game config {}", path.display()))?;
    Ok(config)
}
