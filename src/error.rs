use thiserror::Error;

/// Failures of a single scan request.
///
/// The search flow collapses every variant into one user-facing message;
/// the variants exist so the cause can be logged.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("API key is missing: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Failed to create HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Request to the generative API failed")]
    Transport(#[from] reqwest::Error),

    #[error("Generative API returned error status {status}: {body}")]
    Status { status: u16, body: String },
}
