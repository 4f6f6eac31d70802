use thiserror::Error;

/// # Summary
/// Cache errors: encoding, expiry configuration and backend failures.
///
/// # Invariants
/// - Callers may treat any variant as a cache miss.
#[derive(Error, Debug)]
pub enum CacheError {
    // Value could not be encoded
    #[error("Serialize error: {0}")]
    Serialize(String),
    // Stored bytes could not be decoded into the requested type
    #[error("Deserialize error: {0}")]
    Deserialize(String),
    // TTL cannot be represented by the backend clock
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),
    // Backend failure
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Unknown error: {0}")]
    Unknown(String),
}
