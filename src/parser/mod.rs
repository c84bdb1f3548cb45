//! Extraction of place records from free-form model output
//!
//! Callers depend on [`PlaceExtractor`] only, so the delimited-text strategy
//! can be replaced (structured output, constrained decoding) without touching
//! the search flow.

pub mod delimited;

use crate::domain::{GroundingChunk, Place};

pub use delimited::{DelimitedTextParser, END_MARKER, START_MARKER, parse_crowd_level, parse_places};

/// Turns a raw model reply into ordered place records.
///
/// Implementations never fail: content that cannot be understood yields
/// fewer (or zero) places.
pub trait PlaceExtractor {
    fn extract(&self, text: &str, grounding: &[GroundingChunk]) -> Vec<Place>;
}
