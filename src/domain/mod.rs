pub mod coordinates;
pub mod grounding;
pub mod place;
pub mod view;

pub use coordinates::Coordinates;
pub use grounding::{GroundingChunk, GroundingSource};
pub use place::{CrowdLabel, Place};
pub use view::ViewMode;
