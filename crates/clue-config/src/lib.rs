//! # clue-config
//!
//! Layered configuration loading for clue using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CLUE_*` prefix, `__` as separator)
//! 2. Project-level `.clue/config.toml`
//! 3. User-level `~/.config/clue/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CLUE_INCLUDE__MAX_DEPTH` -> `include.max_depth`,
//! `CLUE_COMPLETION__TIMEOUT_MS` -> `completion.timeout_ms`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use clue_config::ClueConfig;
//!
//! let config = ClueConfig::load_with_dotenv().expect("config");
//! for dir in &config.include.system_dirs {
//!     println!("system include dir: {}", dir.display());
//! }
//! ```

mod completion;
mod error;
mod include;

pub use completion::CompletionConfig;
pub use error::ConfigError;
pub use include::IncludeConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClueConfig {
    #[serde(default)]
    pub include: IncludeConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
}

impl ClueConfig {
    /// Load configuration from all sources (TOML files + environment variables),
    /// looking for the project-local file relative to the current directory.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for_project(Path::new("."))
    }

    /// Load configuration using `project_root/.clue/config.toml` as the project layer.
    pub fn load_for_project(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root)
            .extract()
            .map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` on the current directory's `.env` (if any) before
    /// building the figment.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(".clue").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CLUE_").split("__"))
    }

    /// Reject values that would make the engine misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.include.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "include.max_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.completion.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "completion.timeout_ms".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("clue").join("config.toml"))
    }
}
