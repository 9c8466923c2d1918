use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::db::DynError;

/// Server configuration file structure (TOML)
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// Port to listen on (default: 8080)
    pub port: Option<u16>,
}

pub fn load_config(path: &Path) -> Result<ServerConfig, DynError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
    let config: ServerConfig = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: ServerConfig = toml::from_str("db_path = \"practice.sqlite\"\nport = 3000\n")
            .expect("Failed to parse config");
        assert_eq!(config.db_path, PathBuf::from("practice.sqlite"));
        assert_eq!(config.port, Some(3000));
    }

    #[test]
    fn test_port_is_optional() {
        let config: ServerConfig =
            toml::from_str("db_path = \"practice.sqlite\"\n").expect("Failed to parse config");
        assert_eq!(config.port, None);
    }
}
