//! crowdscan - Scan for crowded places with Gemini and Google Maps grounding

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod location;
pub mod parser;
pub mod render;
pub mod search;
pub mod shell;

pub use api::{GeminiClient, geocode};
pub use error::ScanError;
pub use parser::{DelimitedTextParser, PlaceExtractor, parse_places};
pub use search::{CrowdSource, ScanResult, SearchSession, SearchState};
