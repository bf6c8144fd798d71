use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clue_config::ClueConfig;

use crate::cli::GlobalFlags;

/// Per-invocation state shared by command handlers.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub workspace_root: PathBuf,
    pub config: ClueConfig,
}

impl AppContext {
    /// Resolve the workspace root, load its `.env`, then its configuration.
    pub fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let workspace_root = resolve_workspace_root(flags.workspace.as_deref())?;
        load_workspace_dotenv(&workspace_root)?;

        let config = ClueConfig::load_for_project(&workspace_root)
            .context("failed to load clue configuration")?;
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub async fn read_document(&self, path: &Path) -> anyhow::Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.completion.timeout_ms)
    }
}

fn resolve_workspace_root(workspace: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = workspace {
        let explicit = PathBuf::from(path);
        if explicit.is_dir() {
            return Ok(explicit);
        }
        anyhow::bail!(
            "invalid --workspace '{}': directory does not exist",
            explicit.display()
        );
    }
    std::env::current_dir().context("failed to read current directory")
}

fn load_workspace_dotenv(root: &Path) -> anyhow::Result<()> {
    let env_path = root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn flags(workspace: Option<&Path>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            workspace: workspace.map(|p| p.display().to_string()),
        }
    }

    #[test]
    fn missing_workspace_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = AppContext::init(&flags(Some(&dir.path().join("gone")))).expect_err("missing");
        assert!(err.to_string().contains("directory does not exist"));
    }

    #[test]
    fn project_config_is_read_from_workspace() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join(".clue")).expect("mkdir");
        std::fs::write(
            dir.path().join(".clue/config.toml"),
            "[completion]\ntimeout_ms = 250\n",
        )
        .expect("write");

        let ctx = AppContext::init(&flags(Some(dir.path()))).expect("context");
        assert_eq!(ctx.workspace_root, dir.path());
        assert_eq!(ctx.timeout(), Duration::from_millis(250));
    }
}
