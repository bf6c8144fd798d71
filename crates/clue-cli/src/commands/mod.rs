use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Context;
use clue_parser::ParserError;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

pub mod complete;
pub mod headers;
pub mod preprocess;
pub mod schema;
pub mod symbols;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: &Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Complete(args) => complete::handle(args, ctx, flags).await,
        Commands::Symbols(args) => symbols::handle(args, ctx, flags).await,
        Commands::Preprocess(args) => preprocess::handle(args, ctx, flags).await,
        Commands::Headers => headers::handle(ctx, flags).await,
        Commands::Schema(args) => schema::handle(args, flags),
    }
}

/// Run an engine job on the blocking pool. When `timeout` elapses the job's
/// cancellation flag is raised and its result (usually
/// [`ParserError::Cancelled`]) is awaited.
pub async fn run_cancellable<T, F>(timeout: Duration, job: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce(&AtomicBool) -> Result<T, ParserError> + Send + 'static,
{
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    let mut task = tokio::task::spawn_blocking(move || job(&flag));

    let joined = match tokio::time::timeout(timeout, &mut task).await {
        Ok(joined) => joined,
        Err(_) => {
            tracing::warn!(timeout_ms = %timeout.as_millis(), "analysis timed out, cancelling");
            cancel.store(true, Ordering::Relaxed);
            task.await
        }
    };

    match joined.context("analysis task panicked")? {
        Err(err @ ParserError::Cancelled { .. }) => Err(anyhow::Error::new(err).context(format!(
            "analysis did not finish within {} ms",
            timeout.as_millis()
        ))),
        other => Ok(other?),
    }
}
