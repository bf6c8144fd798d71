use anyhow::Context;
use clue_core::Cursor;
use clue_parser::symbols::PRIMITIVE_TYPES;
use clue_parser::{Declaration, Engine, FsIncludeResolver, identifier_items};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SymbolsArgs;
use crate::commands::run_cancellable;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    pub kind: String,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct SymbolsResponse {
    pub offset: usize,
    /// Scopes still open at the offset.
    pub depth: usize,
    pub symbols: Vec<SymbolEntry>,
}

/// Handle `clue symbols`.
pub async fn handle(
    args: &SymbolsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = run(args, ctx).await?;
    output(&response, flags.format)
}

pub async fn run(args: &SymbolsArgs, ctx: &AppContext) -> anyhow::Result<SymbolsResponse> {
    let mut text = ctx.read_document(&args.file).await?;
    if let Some(offset) = args.offset {
        let offset = Cursor::Offset(offset)
            .to_offset(&text)
            .with_context(|| format!("bad offset for {}", args.file.display()))?;
        text.truncate(offset);
    }

    let root = ctx.workspace_root.clone();
    let config = ctx.config.clone();
    run_cancellable(ctx.timeout(), move |cancel| {
        let resolver = FsIncludeResolver::from_config(&root, &config.include);
        let analysis = Engine::new(&resolver)
            .with_max_include_depth(config.include.max_depth)
            .analyze(&text, cancel)?;

        // Builtin type names are always present; list only what the file adds.
        let symbols = identifier_items(&analysis.table)
            .into_iter()
            .filter(|item| {
                !(PRIMITIVE_TYPES.contains(&item.label.as_str())
                    && matches!(analysis.table.lookup(&item.label), Some(Declaration::Type(_))))
            })
            .map(|item| SymbolEntry {
                name: item.label,
                kind: item.kind.to_string(),
                detail: item.detail,
            })
            .collect();

        Ok(SymbolsResponse {
            offset: text.len(),
            depth: analysis.table.depth(),
            symbols,
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clue_config::ClueConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    fn context(root: &Path) -> AppContext {
        AppContext {
            workspace_root: root.to_path_buf(),
            config: ClueConfig::default(),
        }
    }

    #[tokio::test]
    async fn lists_symbols_visible_at_offset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let doc = "int total;\nvoid f(int arg) {\n    int local;\n    \n}\n";
        let file = dir.path().join("main.c");
        std::fs::write(&file, doc).expect("write");

        let offset = doc.find("    \n").expect("blank line") + 4;
        let args = SymbolsArgs {
            file,
            offset: Some(offset),
        };
        let response = run(&args, &context(dir.path())).await.expect("symbols");

        let names: Vec<_> = response.symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["arg", "f", "local", "total"]);
        assert_eq!(response.depth, 1);
        assert_eq!(response.symbols[1].kind, "function");
        assert_eq!(response.symbols[1].detail, "void(int arg)");
    }

    #[tokio::test]
    async fn typedefs_are_listed_without_builtins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("main.c");
        std::fs::write(&file, "typedef long size_t;\n").expect("write");

        let args = SymbolsArgs { file, offset: None };
        let response = run(&args, &context(dir.path())).await.expect("symbols");
        let names: Vec<_> = response.symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["size_t"]);
    }
}
