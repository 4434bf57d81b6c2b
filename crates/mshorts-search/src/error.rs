//! Search error types.

use thiserror::Error;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while locating a stock clip.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Every candidate query (keywords plus fallbacks) failed or returned no
    /// portrait match. Terminal and user-visible, not retryable.
    #[error("No suitable portrait clip found for any search candidate")]
    Exhausted,

    /// One search request failed at the transport or HTTP level. Consumed
    /// per-candidate inside the locator; surfaced only by single-query calls.
    #[error("Search request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected schema.
    #[error("Malformed search response: {0}")]
    MalformedResponse(String),
}
