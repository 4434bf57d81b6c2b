//! Stock video search client.
//!
//! Walks an ordered list of candidate queries against a Pexels-style search
//! API and returns the first portrait-orientation clip URL. Transport and
//! HTTP errors are consumed per candidate; only exhausting the whole list is
//! an error the caller sees.

mod client;
mod error;

pub use client::{LocatedClip, StockClient, DEFAULT_SEARCH_BASE_URL, SEARCH_TIMEOUT_SECS};
pub use error::{SearchError, SearchResult};
