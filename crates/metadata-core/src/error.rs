use thiserror::Error;

/// Errors surfaced by metadata operations. All of them end the current
/// invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// A mutation token matched neither `KEY=VAL` nor `KEY-`
    #[error("{hint} (got '{token}')")]
    MalformedToken { hint: &'static str, token: String },

    #[error("{resource} {name} not found")]
    NotFound { resource: String, name: String },

    #[error("{resource} {name} is ambiguous, more than one result returned ({count} matches)")]
    AmbiguousResult {
        resource: String,
        name: String,
        count: usize,
    },

    /// Fetching or decoding the resource list failed
    #[error("Failed to fetch resource: {0}")]
    TransportFailure(String),

    /// Sending the patch or decoding its response failed
    #[error("Failed to update metadata: {0}")]
    UpdateFailed(String),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
