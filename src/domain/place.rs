use serde::Serialize;
use std::fmt;

pub const DEFAULT_ADDRESS: &str = "Unknown location";
pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// Qualitative crowd tier derived from a 0-100 crowd level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrowdLabel {
    Low,
    Moderate,
    High,
    Severe,
}

impl CrowdLabel {
    /// Lower bound (inclusive) of the Moderate tier
    pub const MODERATE_FROM: u8 = 30;
    /// Lower bound (inclusive) of the High tier
    pub const HIGH_FROM: u8 = 60;
    /// Lower bound (inclusive) of the Severe tier
    pub const SEVERE_FROM: u8 = 80;

    /// Classify a clamped crowd level
    pub fn from_level(level: u8) -> CrowdLabel {
        if level >= Self::SEVERE_FROM {
            CrowdLabel::Severe
        } else if level >= Self::HIGH_FROM {
            CrowdLabel::High
        } else if level >= Self::MODERATE_FROM {
            CrowdLabel::Moderate
        } else {
            CrowdLabel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrowdLabel::Low => "Low",
            CrowdLabel::Moderate => "Moderate",
            CrowdLabel::High => "High",
            CrowdLabel::Severe => "Severe",
        }
    }
}

impl fmt::Display for CrowdLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A place extracted from one response block, with its estimated crowd level
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub address: String,
    pub category: String,
    /// Always within 0..=100
    pub crowd_level: u8,
    pub crowd_label: CrowdLabel,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_uri: Option<String>,
}

impl Place {
    /// Build a place, deriving the label from `crowd_level` and filling
    /// placeholders for missing optional fields.
    pub fn new(
        id: String,
        name: String,
        crowd_level: u8,
        address: Option<String>,
        category: Option<String>,
        description: Option<String>,
    ) -> Self {
        let crowd_level = crowd_level.min(100);
        Self {
            id,
            name,
            address: address.unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            crowd_level,
            crowd_label: CrowdLabel::from_level(crowd_level),
            description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            maps_uri: None,
        }
    }

    pub fn with_maps_uri(mut self, uri: Option<String>) -> Self {
        self.maps_uri = uri;
        self
    }

    /// Busy enough to flag as high traffic on a card
    pub fn is_crowded(&self) -> bool {
        self.crowd_level >= 70
    }
}
