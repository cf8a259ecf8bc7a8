mod graph;
mod init;
mod layout;
mod search;
mod stats;

pub use graph::cmd_graph;
pub use init::cmd_init;
pub use layout::cmd_layout;
pub use search::cmd_search;
pub use stats::cmd_stats;

use crate::api::{ViewOptions, load_document};
use crate::cli::ViewArgs;
use crate::config::Config;
use crate::style;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Shared context for command execution: the resolved document, its parsed
/// contents and the config found next to it.
pub struct CommandContext {
    pub file: PathBuf,
    pub config: Config,
    pub document: Value,
}

impl CommandContext {
    /// Resolve `file`, load `.jsonmap.toml` from its directory and parse it.
    /// Returns Err(exit_code) if setup fails.
    pub fn new(file: &Path) -> Result<Self, i32> {
        let resolved = match file.canonicalize() {
            Ok(p) => p,
            Err(_) => {
                style::error(&format!("Could not resolve path: {}", style::path(file)));
                return Err(1);
            }
        };

        let config_dir = resolved.parent().unwrap_or(Path::new("."));
        let config = Config::load(config_dir).unwrap_or_else(|e| {
            style::warning(&format!("Failed to load config: {}. Using defaults.", e));
            Config::default()
        });

        let document = match load_document(&resolved) {
            Ok(doc) => doc,
            Err(e) => {
                style::error(&e.to_string());
                return Err(1);
            }
        };

        Ok(Self {
            file: resolved,
            config,
            document,
        })
    }

    /// Configured view with command-line overrides applied.
    pub fn view_options(&self, overrides: &ViewArgs) -> ViewOptions {
        apply_overrides(ViewOptions::from_config(&self.config), overrides)
    }

    pub fn display_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}

fn apply_overrides(mut options: ViewOptions, overrides: &ViewArgs) -> ViewOptions {
    if let Some(direction) = overrides.direction {
        options.direction = direction;
    }
    if let Some(size_mode) = overrides.size_mode {
        options.size_mode = size_mode;
    }
    if let Some(level) = overrides.level {
        options.level = level;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LayoutDirection, SHOW_ALL_LEVEL, SizeMode};

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let overrides = ViewArgs {
            direction: Some(LayoutDirection::TopBottom),
            size_mode: None,
            level: Some(1),
        };
        let options = apply_overrides(ViewOptions::default(), &overrides);
        assert_eq!(options.direction, LayoutDirection::TopBottom);
        assert_eq!(options.size_mode, SizeMode::Medium);
        assert_eq!(options.level, 1);

        let untouched = apply_overrides(ViewOptions::default(), &ViewArgs::default());
        assert_eq!(untouched.level, SHOW_ALL_LEVEL);
    }
}
