//! File-based configuration (YAML)
//!
//! Supports user-level (~/.config/toolbridge/config.yaml) and workspace-level
//! (.config/toolbridge/config.yaml) files.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigResult;
use super::settings::{ClientConfig, ConfigFile};

/// Config level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level config (~/.config/toolbridge/config.yaml)
    User,
    /// Workspace-level config (.config/toolbridge/config.yaml in workspace root)
    Workspace,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
        }
    }
}

/// Reads and writes one YAML configuration file
///
/// # Example
///
/// ```no_run
/// use toolbridge_core::config::FileConfigLoader;
///
/// let config = FileConfigLoader::layered("/path/to/workspace").unwrap();
/// println!("model: {}", config.model);
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigLoader {
    path: PathBuf,
    level: ConfigLevel,
}

impl FileConfigLoader {
    /// Create a loader for a specific path
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
        }
    }

    /// User-level loader (<config dir>/toolbridge/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("toolbridge").join("config.yaml"), ConfigLevel::User)
    }

    /// Workspace-level loader (.config/toolbridge/config.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root
            .as_ref()
            .join(".config")
            .join("toolbridge")
            .join("config.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    /// User file overlaid by the workspace file, resolved against defaults
    pub fn layered(workspace_root: impl AsRef<Path>) -> ConfigResult<ClientConfig> {
        let user = Self::user().load()?;
        let workspace = Self::workspace(workspace_root).load()?;
        user.merge(workspace).resolve()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the file; a missing file is an empty layer
    pub fn load(&self) -> ConfigResult<ConfigFile> {
        if !self.path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load and resolve this file alone against defaults
    pub fn load_resolved(&self) -> ConfigResult<ClientConfig> {
        self.load()?.resolve()
    }

    /// Write the file, creating parent directories
    pub fn save(&self, config: &ConfigFile) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::mcp::ServerTarget;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let loader = FileConfigLoader::new(dir.path().join("config.yaml"), ConfigLevel::User);

        assert!(!loader.exists());
        assert_eq!(loader.load().unwrap(), ConfigFile::default());
        assert_eq!(loader.load_resolved().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let loader = FileConfigLoader::new(dir.path().join("nested").join("config.yaml"), ConfigLevel::User);

        let file = ConfigFile {
            model: Some("gpt-4o".to_string()),
            provider: Some("openai".to_string()),
            server: Some(ServerTarget::from_path("weather.py")),
            ..Default::default()
        };
        loader.save(&file).unwrap();

        assert!(loader.exists());
        assert_eq!(loader.load().unwrap(), file);
    }

    #[test]
    fn test_yaml_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "model: claude-3-5-haiku-latest\nmax_context_messages: 6\nserver:\n  transport: http\n  url: http://localhost:8000/mcp\n",
        )
        .unwrap();

        let config = FileConfigLoader::new(&path, ConfigLevel::Workspace)
            .load_resolved()
            .unwrap();
        assert_eq!(config.model, "claude-3-5-haiku-latest");
        assert_eq!(config.max_context_messages, 6);
        assert_eq!(
            config.server,
            Some(ServerTarget::Http {
                url: "http://localhost:8000/mcp".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "max_tokens: [not, a, number]").unwrap();

        let result = FileConfigLoader::new(&path, ConfigLevel::User).load();
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_workspace_path() {
        let loader = FileConfigLoader::workspace("/tmp/project");
        assert_eq!(loader.level(), ConfigLevel::Workspace);
        assert!(loader.path().ends_with(".config/toolbridge/config.yaml"));
    }
}
