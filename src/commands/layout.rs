use crate::api::open_session;
use crate::cli::LayoutArgs;
use crate::fs::{FileSystem, default_fs};
use crate::graph::GraphData;
use crate::style;

use super::CommandContext;

pub fn cmd_layout(args: LayoutArgs) -> i32 {
    let ctx = match CommandContext::new(&args.file) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let mut session = open_session(ctx.document.clone(), &ctx.view_options(&args.view));
    let fit = session.canvas_mut().take_fit();
    let data = GraphData::from_session(&session, fit);

    let json = match serde_json::to_string_pretty(&data) {
        Ok(json) => json,
        Err(e) => {
            style::error(&format!("Failed to serialize layout: {}", e));
            return 1;
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = default_fs().write(path, &json) {
                style::error(&format!("Could not write output file: {}", e));
                return 1;
            }
            style::success(&format!(
                "Laid out {} nodes into {}",
                data.stats.visible_nodes,
                style::path(path)
            ));
        }
        None => println!("{}", json),
    }
    0
}
