use clue_core::CompletionResponse;
use clue_parser::{
    Completer, CompletionContext, CompletionOptions, FsIncludeResolver, HeaderSearch,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CompleteArgs;
use crate::commands::run_cancellable;
use crate::context::AppContext;
use crate::output::output;

/// Handle `clue complete`.
pub async fn handle(
    args: &CompleteArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = run(args, ctx).await?;
    output(&response, flags.format)
}

pub async fn run(args: &CompleteArgs, ctx: &AppContext) -> anyhow::Result<CompletionResponse> {
    let text = ctx.read_document(&args.file).await?;
    let cursor = args.cursor()?;

    let root = ctx.workspace_root.clone();
    let config = ctx.config.clone();
    run_cancellable(ctx.timeout(), move |cancel| {
        let options = CompletionOptions::from(&config);
        let prefix = &text[..cursor.to_offset(&text)?];
        let headers = if options.header_search
            && CompletionContext::detect(prefix) == CompletionContext::Header
        {
            Some(HeaderSearch::from_config(&root, &config.include).collect()?)
        } else {
            None
        };

        let resolver = FsIncludeResolver::from_config(&root, &config.include);
        let mut completer = Completer::new(&resolver, options);
        if let Some(index) = &headers {
            completer = completer.with_headers(index);
        }
        completer.complete(prefix, cancel)
    })
    .await
}
