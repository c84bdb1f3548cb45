//! Search orchestration: one query in, one outbound call, one terminal state

pub mod session;

use serde::Serialize;

use crate::domain::{Coordinates, GroundingChunk, Place};
use crate::error::ScanError;

pub use session::{SCAN_FAILED_MESSAGE, SearchSession, SearchState, SearchTicket};

/// Places parsed from one scan plus the references the model cited
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScanResult {
    pub places: Vec<Place>,
    pub grounding: Vec<GroundingChunk>,
}

impl ScanResult {
    /// Grounding references that carry a maps link, in response order
    pub fn map_sources(&self) -> impl Iterator<Item = &GroundingChunk> {
        self.grounding.iter().filter(|c| c.maps_uri().is_some())
    }
}

/// Anything that can turn a query into scan results with a single call
pub trait CrowdSource {
    fn scan(&self, query: &str, location: Option<Coordinates>) -> Result<ScanResult, ScanError>;
}
