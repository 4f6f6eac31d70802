use thiserror::Error;

/// # Summary
/// Market data errors: transport, decoding and missing data.
///
/// # Invariants
/// - Every variant means "no usable history" to the dashboard; none is fatal.
#[derive(Error, Debug)]
pub enum MarketError {
    // Transport failure or non-success HTTP status
    #[error("Network error: {0}")]
    Network(String),
    // Payload did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
    // The provider answered with no bars
    #[error("Data not found")]
    NotFound,
    // Provider-reported or otherwise unclassified failure
    #[error("Unknown error: {0}")]
    Unknown(String),
}
