use std::collections::BTreeMap;

use clue_parser::{FsIncludeResolver, Preprocessor};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PreprocessArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct PreprocessResponse {
    /// Object-like macros defined at end of file.
    pub macros: BTreeMap<String, String>,
    pub text: String,
}

/// Handle `clue preprocess`.
pub async fn handle(
    args: &PreprocessArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = run(args, ctx).await?;
    output(&response, flags.format)
}

pub async fn run(args: &PreprocessArgs, ctx: &AppContext) -> anyhow::Result<PreprocessResponse> {
    let source = ctx.read_document(&args.file).await?;
    let root = ctx.workspace_root.clone();
    let include = ctx.config.include.clone();

    let processed = tokio::task::spawn_blocking(move || {
        let resolver = FsIncludeResolver::from_config(&root, &include);
        Preprocessor::new(&resolver)
            .with_max_depth(include.max_depth)
            .run(&source)
    })
    .await?;

    tracing::debug!(macros = processed.macros.len(), "preprocessed");
    Ok(PreprocessResponse {
        macros: processed.macros.object_like(),
        text: processed.text,
    })
}

#[cfg(test)]
mod tests {
    use clue_config::ClueConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn reports_text_and_macros() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("main.c");
        std::fs::write(&file, "#define N 5\n#define SQ(x) x\nint a[N];\n").expect("write");

        let ctx = AppContext {
            workspace_root: dir.path().to_path_buf(),
            config: ClueConfig::default(),
        };
        let response = run(&PreprocessArgs { file }, &ctx).await.expect("preprocess");

        assert_eq!(response.text, "\n\nint a[5];\n");
        assert_eq!(
            response.macros,
            BTreeMap::from([("N".to_string(), "5".to_string())])
        );
    }
}
