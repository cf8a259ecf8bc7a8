use crate::model::{LayoutDirection, SizeMode};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jsonmap")]
#[command(about = "Explore JSON documents as collapsible, auto-laid-out diagrams")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Open a document in the interactive viewer or export it as HTML
    Graph(GraphArgs),

    /// Print the laid-out diagram as JSON
    Layout(LayoutArgs),

    /// Show document metrics
    Stats(StatsArgs),

    /// Find nodes by label, key or value
    Search(SearchArgs),

    /// Generate a starter .jsonmap.toml configuration file
    Init(InitArgs),
}

/// Overrides for the initial view; unset flags fall back to `.jsonmap.toml`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Diagram flow: lr (left to right) or tb (top to bottom)
    #[arg(long)]
    pub direction: Option<LayoutDirection>,

    /// Node size preset: compact, medium or expanded
    #[arg(long)]
    pub size_mode: Option<SizeMode>,

    /// Deepest level to show, root = 0 (999 shows everything)
    #[arg(long)]
    pub level: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// JSON document to visualize
    pub file: PathBuf,

    /// Start HTTP server for the interactive viewer
    #[arg(long)]
    pub serve: bool,

    /// Port for HTTP server (defaults to the configured port, 3000)
    #[arg(long)]
    pub port: Option<u16>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Reload the diagram when the document changes on disk (implies --serve)
    #[arg(short, long)]
    pub watch: bool,

    /// Export the diagram as a static HTML file instead of serving
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct LayoutArgs {
    /// JSON document to lay out
    pub file: PathBuf,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// JSON document to measure
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// JSON document to search
    pub file: PathBuf,

    /// Case-insensitive text to look for
    pub term: String,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Directory where to create .jsonmap.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_args_parse_view_overrides() {
        let cli = Cli::parse_from([
            "jsonmap",
            "graph",
            "data.json",
            "--serve",
            "--direction",
            "tb",
            "--size-mode",
            "compact",
            "--level",
            "2",
        ]);
        let Command::Graph(args) = cli.command else {
            panic!("expected graph command");
        };
        assert!(args.serve);
        assert_eq!(args.port, None);
        assert_eq!(args.view.direction, Some(LayoutDirection::TopBottom));
        assert_eq!(args.view.size_mode, Some(SizeMode::Compact));
        assert_eq!(args.view.level, Some(2));
    }

    #[test]
    fn test_verbosity_counts_and_is_global() {
        let cli = Cli::parse_from(["jsonmap", "stats", "data.json", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_invalid_direction_is_rejected() {
        let result = Cli::try_parse_from(["jsonmap", "layout", "a.json", "--direction", "diagonal"]);
        assert!(result.is_err());
    }
}
