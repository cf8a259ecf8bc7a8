use crate::api::{SearchHit, search_document};
use crate::cli::{OutputFormat, SearchArgs};
use crate::style;
use std::io;

use super::CommandContext;

pub fn cmd_search(args: SearchArgs) -> i32 {
    let ctx = match CommandContext::new(&args.file) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let hits = search_document(&ctx.document, &args.term);

    let result = match args.format {
        OutputFormat::Markdown => {
            style::render_markdown(&hits_markdown(&args.term, &hits), &mut io::stdout())
        }
        OutputFormat::Json => serde_json::to_string_pretty(&hits)
            .map(|json| println!("{}", json))
            .map_err(io::Error::other),
    };

    if let Err(e) = result {
        style::error(&format!("Failed to write results: {}", e));
        return 1;
    }

    // grep-style status: 1 when nothing matched
    if hits.is_empty() { 1 } else { 0 }
}

fn hits_markdown(term: &str, hits: &[SearchHit]) -> String {
    let mut out = format!("# {} match(es) for `{}`\n\n", hits.len(), term.trim());
    for hit in hits {
        out.push_str(&format!(
            "- **{}** (`{}`, depth {})\n",
            hit.label, hit.id, hit.depth
        ));
        for prop in &hit.properties {
            out.push_str(&format!("  - {}: {}\n", prop.key, prop.value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markdown_lists_hits_with_properties() {
        let doc = json!({"users": [{"name": "Ada"}, {"name": "Grace"}]});
        let markdown = hits_markdown("ada ", &search_document(&doc, "ada"));

        assert!(markdown.starts_with("# 1 match(es) for `ada`"));
        assert!(markdown.contains("- **0** (`node-2`, depth 2)"));
        assert!(markdown.contains("  - name: Ada"));
    }

    #[test]
    fn test_markdown_for_no_hits_is_just_the_header() {
        let markdown = hits_markdown("zzz", &[]);
        assert_eq!(markdown, "# 0 match(es) for `zzz`\n\n");
    }
}
