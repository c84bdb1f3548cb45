use clap::ValueEnum;
use serde::Deserialize;

/// How scan results are laid out in the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Full cards with a crowd meter each
    #[default]
    Grid,
    /// One compact line per place
    List,
}

impl ViewMode {
    pub fn from_command(arg: &str) -> Option<ViewMode> {
        match arg.trim().to_lowercase().as_str() {
            "grid" | "g" => Some(ViewMode::Grid),
            "list" | "l" => Some(ViewMode::List),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_from_command() {
        assert_eq!(ViewMode::from_command("grid"), Some(ViewMode::Grid));
        assert_eq!(ViewMode::from_command(" LIST "), Some(ViewMode::List));
        assert_eq!(ViewMode::from_command("l"), Some(ViewMode::List));
        assert_eq!(ViewMode::from_command("table"), None);
    }
}
