use crate::api::open_session;
use crate::cli::GraphArgs;
use crate::fs::{FileSystem, default_fs};
use crate::graph::{GraphData, ServeOptions};
use crate::style;

use super::CommandContext;

pub fn cmd_graph(args: GraphArgs) -> i32 {
    let ctx = match CommandContext::new(&args.file) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let options = ctx.view_options(&args.view);
    let mut session = open_session(ctx.document.clone(), &options);

    if args.serve || args.watch {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                style::error(&format!("Failed to create tokio runtime: {}", e));
                return 1;
            }
        };

        let serve_options = ServeOptions {
            port: args.port.unwrap_or(ctx.config.server.port),
            open_browser: args.open,
            watch: args.watch.then(|| ctx.file.clone()),
        };
        if let Err(e) = rt.block_on(crate::graph::serve(session, serve_options)) {
            style::error(&format!("Server failed: {}", e));
            return 1;
        }
    } else if let Some(export_path) = args.export {
        let fit = session.canvas_mut().take_fit();
        let html = crate::graph::generate_static_html(&GraphData::from_session(&session, fit));
        if let Err(e) = default_fs().write(&export_path, &html) {
            style::error(&format!("Failed to write export file: {}", e));
            return 1;
        }
        style::success(&format!("Diagram exported to: {}", style::path(&export_path)));
    } else {
        style::error("Use --serve to start the viewer, or --export to save static HTML");
        return 1;
    }

    0
}
