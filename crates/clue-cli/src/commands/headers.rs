use clue_parser::HeaderSearch;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct HeaderEntry {
    pub name: String,
    pub path: String,
}

/// Handle `clue headers`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let headers = run(ctx).await?;
    output(&headers, flags.format)
}

pub async fn run(ctx: &AppContext) -> anyhow::Result<Vec<HeaderEntry>> {
    let search = HeaderSearch::from_config(&ctx.workspace_root, &ctx.config.include);
    let index = tokio::task::spawn_blocking(move || search.collect()).await??;

    Ok(index
        .into_iter()
        .map(|(name, path)| HeaderEntry {
            name,
            path: path.display().to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use clue_config::ClueConfig;

    use super::*;

    #[tokio::test]
    async fn lists_workspace_headers_by_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("include")).expect("mkdir");
        std::fs::write(dir.path().join("include/vec.h"), "").expect("write");
        std::fs::write(dir.path().join("main.c"), "").expect("write");

        let mut config = ClueConfig::default();
        config.include.follow_system = false;
        let ctx = AppContext {
            workspace_root: dir.path().to_path_buf(),
            config,
        };

        let headers = run(&ctx).await.expect("headers");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].name, "vec.h");
        assert!(headers[0].path.ends_with("vec.h"));
    }
}
