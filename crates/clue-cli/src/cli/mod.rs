use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `clue` binary.
#[derive(Debug, Parser)]
#[command(name = "clue", version, about = "clue - C symbol resolution and completion")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root used for includes, headers and config (defaults to cwd)
    #[arg(short, long, global = true)]
    pub workspace: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            workspace: self.workspace.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use clue_core::Cursor;

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["clue", "--format", "table", "--verbose", "headers"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Headers));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["clue", "preprocess", "main.c", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Preprocess(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["clue", "--format", "xml", "headers"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn complete_accepts_offset() {
        let cli = Cli::try_parse_from(["clue", "complete", "main.c", "--offset", "42"])
            .expect("cli should parse");
        let Commands::Complete(args) = cli.command else {
            panic!("expected complete");
        };
        assert_eq!(args.cursor().expect("cursor"), Cursor::Offset(42));
    }

    #[test]
    fn complete_accepts_line_and_column() {
        let cli = Cli::try_parse_from(["clue", "complete", "main.c", "-l", "3", "-c", "7"])
            .expect("cli should parse");
        let Commands::Complete(args) = cli.command else {
            panic!("expected complete");
        };
        assert_eq!(
            args.cursor().expect("cursor"),
            Cursor::LineColumn { line: 3, column: 7 }
        );
    }

    #[test]
    fn complete_rejects_mixed_cursor_forms() {
        let parsed = Cli::try_parse_from([
            "clue", "complete", "main.c", "--offset", "1", "--line", "0", "--column", "0",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn complete_requires_a_cursor() {
        let cli = Cli::try_parse_from(["clue", "complete", "main.c", "--line", "2"])
            .expect("cli should parse");
        let Commands::Complete(args) = cli.command else {
            panic!("expected complete");
        };
        assert!(args.cursor().is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["clue", "--workspace", "/tmp/demo", "headers"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.workspace.as_deref(), Some("/tmp/demo"));
    }
}
