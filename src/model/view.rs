use serde::{Deserialize, Serialize};

/// Collapse threshold meaning "show every level".
pub const SHOW_ALL_LEVEL: usize = 999;

/// Primary axis along which layout ranks flow.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Ranks flow left to right.
    #[default]
    #[serde(rename = "lr", alias = "LR")]
    LeftRight,
    /// Ranks flow top to bottom.
    #[serde(rename = "tb", alias = "TB")]
    TopBottom,
}

/// Rendered node footprint preset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SizeMode {
    Compact,
    #[default]
    Medium,
    Expanded,
}

impl SizeMode {
    /// Scale applied to every base dimension of a node.
    pub fn multiplier(self) -> f64 {
        match self {
            SizeMode::Compact => 0.8,
            SizeMode::Medium => 1.0,
            SizeMode::Expanded => 1.2,
        }
    }
}

impl std::fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutDirection::LeftRight => write!(f, "lr"),
            LayoutDirection::TopBottom => write!(f, "tb"),
        }
    }
}

impl std::str::FromStr for LayoutDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lr" | "left-right" | "horizontal" => Ok(LayoutDirection::LeftRight),
            "tb" | "top-bottom" | "vertical" => Ok(LayoutDirection::TopBottom),
            _ => Err(format!("Unknown layout direction: {}", s)),
        }
    }
}

impl std::fmt::Display for SizeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeMode::Compact => write!(f, "compact"),
            SizeMode::Medium => write!(f, "medium"),
            SizeMode::Expanded => write!(f, "expanded"),
        }
    }
}

impl std::str::FromStr for SizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(SizeMode::Compact),
            "medium" => Ok(SizeMode::Medium),
            "expanded" => Ok(SizeMode::Expanded),
            _ => Err(format!("Unknown size mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing_accepts_both_cases() {
        assert_eq!("LR".parse::<LayoutDirection>(), Ok(LayoutDirection::LeftRight));
        assert_eq!("tb".parse::<LayoutDirection>(), Ok(LayoutDirection::TopBottom));
        assert!("diagonal".parse::<LayoutDirection>().is_err());
    }

    #[test]
    fn test_size_mode_multipliers_are_ordered() {
        assert!(SizeMode::Compact.multiplier() < SizeMode::Medium.multiplier());
        assert!(SizeMode::Medium.multiplier() < SizeMode::Expanded.multiplier());
        assert_eq!("expanded".parse::<SizeMode>(), Ok(SizeMode::Expanded));
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&LayoutDirection::TopBottom).unwrap();
        assert_eq!(json, "\"tb\"");
        let parsed: LayoutDirection = serde_json::from_str("\"LR\"").unwrap();
        assert_eq!(parsed, LayoutDirection::LeftRight);
    }
}
