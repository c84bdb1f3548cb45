use serde::{Deserialize, Serialize};

/// A title/URI pair cited by the model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundingSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A grounding reference attached to a model response.
///
/// Maps-grounded answers carry a `maps` source; search-grounded ones carry
/// `web`. Either or both may be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<GroundingSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<GroundingSource>,
}

impl GroundingChunk {
    pub fn maps(title: &str, uri: &str) -> Self {
        Self {
            web: None,
            maps: Some(GroundingSource {
                uri: Some(uri.to_string()),
                title: Some(title.to_string()),
            }),
        }
    }

    pub fn maps_title(&self) -> Option<&str> {
        self.maps.as_ref()?.title.as_deref()
    }

    pub fn maps_uri(&self) -> Option<&str> {
        self.maps.as_ref()?.uri.as_deref()
    }

    /// True when the maps title appears inside `name`, ignoring case
    pub fn matches_place(&self, name: &str) -> bool {
        match self.maps_title() {
            Some(title) if !title.is_empty() => {
                name.to_lowercase().contains(&title.to_lowercase())
            }
            _ => false,
        }
    }
}
