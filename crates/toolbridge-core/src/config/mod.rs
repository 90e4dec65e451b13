//! Client configuration
//!
//! Settings come from YAML files (user-level and workspace-level) layered over
//! built-in defaults. See [`FileConfigLoader`].

mod error;
mod file;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use file::{ConfigLevel, FileConfigLoader};
pub use settings::{
    ClientConfig, ConfigFile, DEFAULT_MAX_CONTEXT_MESSAGES, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_PROVIDER, DEFAULT_SYSTEM_PROMPT,
};
