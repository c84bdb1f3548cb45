use regex::Regex;
use std::sync::LazyLock;

use super::PlaceExtractor;
use crate::domain::{GroundingChunk, Place};

pub const START_MARKER: &str = "---PLACE_START---";
pub const END_MARKER: &str = "---PLACE_END---";

/// Crowd level used when the score field holds no digits
const FALLBACK_LEVEL: u8 = 50;

struct FieldPatterns {
    name: Regex,
    address: Regex,
    category: Regex,
    crowd_score: Regex,
    description: Regex,
}

fn field_pattern(key: &str) -> Regex {
    // Rest of the line after `KEY:`; horizontal whitespace only so an empty
    // value never swallows the following line.
    Regex::new(&format!(r"(?m)\b{key}:[ \t]*(.*)$")).expect("field pattern is a valid regex")
}

static FIELDS: LazyLock<FieldPatterns> = LazyLock::new(|| FieldPatterns {
    name: field_pattern("NAME"),
    address: field_pattern("ADDRESS"),
    category: field_pattern("CATEGORY"),
    crowd_score: field_pattern("CROWD_SCORE"),
    description: field_pattern("DESCRIPTION"),
});

/// First `KEY: value` match in the block, trimmed. `None` if the key is absent.
fn capture<'a>(pattern: &Regex, block: &'a str) -> Option<&'a str> {
    pattern
        .captures(block)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Normalize a raw score field to a crowd level in 0..=100.
///
/// Every non-digit character is dropped before parsing, so `"85%"` is 85 and
/// `"-5"` is 5. No digits at all gives 50; a digit run too large for any
/// integer type is treated as 100.
pub fn parse_crowd_level(raw: &str) -> u8 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return FALLBACK_LEVEL;
    }

    match digits.parse::<u64>() {
        Ok(n) => n.min(100) as u8,
        Err(_) => 100,
    }
}

/// Parse `---PLACE_START--- ... ---PLACE_END---` blocks into places
///
/// # Algorithm
/// 1. Split on the start marker, skipping the preamble before the first one
/// 2. Keep blocks that contain the end marker
/// 3. Extract fields; drop blocks without NAME or CROWD_SCORE
/// 4. Attach the first grounding link whose maps title appears in the name
pub fn parse_places(text: &str, grounding: &[GroundingChunk]) -> Vec<Place> {
    let mut places = Vec::new();

    for (index, block) in text.split(START_MARKER).enumerate().skip(1) {
        if !block.contains(END_MARKER) {
            tracing::debug!(index, "skipping block without end marker");
            continue;
        }

        let name = match non_empty(capture(&FIELDS.name, block)) {
            Some(n) => n,
            None => {
                tracing::debug!(index, "skipping block without NAME");
                continue;
            }
        };

        let level = match capture(&FIELDS.crowd_score, block) {
            Some(raw) => parse_crowd_level(raw),
            None => {
                tracing::debug!(index, %name, "skipping block without CROWD_SCORE");
                continue;
            }
        };

        let maps_uri = grounding
            .iter()
            .find(|g| g.matches_place(&name))
            .and_then(|g| g.maps_uri())
            .map(str::to_string);

        let place = Place::new(
            format!("place-{}", index),
            name,
            level,
            non_empty(capture(&FIELDS.address, block)),
            non_empty(capture(&FIELDS.category, block)),
            non_empty(capture(&FIELDS.description, block)),
        )
        .with_maps_uri(maps_uri);

        places.push(place);
    }

    places
}

/// Regex-based extractor for the marker-delimited plain text format the
/// scan prompt asks for.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedTextParser;

impl PlaceExtractor for DelimitedTextParser {
    fn extract(&self, text: &str, grounding: &[GroundingChunk]) -> Vec<Place> {
        parse_places(text, grounding)
    }
}
