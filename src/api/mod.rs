pub mod gemini;
pub mod nominatim;
pub mod prompt;

pub use gemini::{GeminiClient, GenerateContentResponse};
pub use nominatim::geocode;
pub use prompt::build_prompt;
