use crate::analysis::DocumentStats;
use crate::cli::{OutputFormat, StatsArgs};
use crate::style;
use std::io;

use super::CommandContext;

pub fn cmd_stats(args: StatsArgs) -> i32 {
    let ctx = match CommandContext::new(&args.file) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let stats = DocumentStats::from_document(&ctx.document);

    let result = match args.format {
        OutputFormat::Markdown => {
            style::render_markdown(&stats_markdown(&ctx.display_name(), &stats), &mut io::stdout())
        }
        OutputFormat::Json => serde_json::to_string_pretty(&stats)
            .map(|json| println!("{}", json))
            .map_err(io::Error::other),
    };

    if let Err(e) = result {
        style::error(&format!("Failed to write stats: {}", e));
        return 1;
    }
    0
}

fn stats_markdown(name: &str, stats: &DocumentStats) -> String {
    format!(
        "# {}\n\n\
         | Metric | Value |\n\
         |---|---|\n\
         | Max depth | {} |\n\
         | Nodes | {} |\n\
         | Properties | {} |\n\
         | Size | {} |\n",
        name,
        stats.max_depth,
        stats.node_count,
        stats.property_count,
        stats.formatted_size()
    )
}
