use clap::Parser;
use jsonmap::cli::{Cli, Command};
use jsonmap::{cmd_graph, cmd_init, cmd_layout, cmd_search, cmd_stats};
use log::LevelFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Command::Graph(args) => cmd_graph(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Search(args) => cmd_search(args),
        Command::Init(args) => cmd_init(args),
    };

    std::process::exit(exit_code);
}

/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
