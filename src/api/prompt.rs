//! Scan prompt sent to the model.
//!
//! The maps tool cannot be combined with a JSON response schema, so the
//! prompt asks for a marker-delimited plain text layout instead.

use crate::domain::Coordinates;
use crate::parser::{END_MARKER, START_MARKER};

/// Build the scan prompt for `query`, mentioning `location` inline when known
pub fn build_prompt(query: &str, location: Option<Coordinates>) -> String {
    let location_context = location
        .map(|c| {
            format!(
                "The user is currently at latitude: {}, longitude: {}. Prioritize places near here.",
                c.latitude, c.longitude
            )
        })
        .unwrap_or_default();

    format!(
        r#"{location_context}
I want to find crowded or popular places related to: "{query}".

Using Google Maps, identify 6-9 specific, real-world places that match this query.
For each place, estimate its CURRENT crowd density or typical popularity on a scale of 0 to 100 based on general knowledge of the area, time of day, and place type.

You MUST output the details in the following strict plain text format for each place so I can parse it:

{START_MARKER}
NAME: [Exact Name of Place]
ADDRESS: [Short Address or Area]
CATEGORY: [e.g. Park, Cafe, Mall, Street]
CROWD_SCORE: [Number 0-100]
DESCRIPTION: [A very short, punchy 10-word description of the current vibe. e.g. "Bustling with tourists" or "Quiet and cozy"]
{END_MARKER}

Ensure you use the googleMaps tool to verify these places exist."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_query_and_markers() {
        let prompt = build_prompt("Coffee Shops", None);
        assert!(prompt.contains(r#"related to: "Coffee Shops""#));
        assert!(prompt.contains(START_MARKER));
        assert!(prompt.contains(END_MARKER));
        assert!(prompt.contains("CROWD_SCORE:"));
        assert!(!prompt.contains("latitude"));
    }

    #[test]
    fn test_prompt_mentions_location_inline() {
        let prompt = build_prompt("Parks", Some(Coordinates::new(51.5074, -0.1278)));
        assert!(prompt.contains("latitude: 51.5074, longitude: -0.1278"));
    }
}
