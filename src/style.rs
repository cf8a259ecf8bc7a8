//! Terminal styling utilities for consistent CLI output

use colored::Colorize;
use std::io::{self, IsTerminal, Write};

/// Print an error message to stderr
pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// Print a warning message to stderr
pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Print a success message to stdout
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn header(msg: &str) {
    println!("{}", msg.cyan().bold());
}

/// Print a status update (server start, document reloads)
pub fn status(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

/// Format a path for display (bright white)
pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().bright_white().to_string()
}

pub fn file_changed(path_str: &str) -> String {
    format!("{} {}", "reloaded:".yellow(), path_str)
}

pub fn url(u: &str) -> String {
    u.bright_blue().underline().to_string()
}

/// Render markdown with colors when stdout is a terminal, plain otherwise.
pub fn render_markdown(markdown: &str, output: &mut dyn Write) -> io::Result<()> {
    if io::stdout().is_terminal() {
        write!(output, "{}", terminal_text(markdown))
    } else {
        write!(output, "{}", markdown)
    }
}

fn terminal_text(markdown: &str) -> String {
    let skin = create_skin();
    skin.term_text(markdown).to_string()
}

fn create_skin() -> termimad::MadSkin {
    use termimad::*;

    let mut skin = MadSkin::default();

    skin.set_headers_fg(crossterm::style::Color::Cyan);
    skin.bold.set_fg(crossterm::style::Color::White);
    skin.bullet = StyledChar::from_fg_char(crossterm::style::Color::Blue, '•');

    // Node ids
    skin.inline_code.set_fg(crossterm::style::Color::Yellow);

    skin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_text_keeps_table_content() {
        let text = terminal_text("# Stats\n\n| Metric | Value |\n|---|---|\n| Nodes | 4 |\n");
        assert!(text.contains("Stats"));
        assert!(text.contains("Nodes"));
        assert!(text.contains('4'));
    }

    #[test]
    fn test_render_markdown_writes_plain_text_when_piped() {
        let mut out = Vec::new();
        render_markdown("**bold**", &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("bold"));
    }
}
