//! HTTP surface for MotiShorts.
//!
//! One text input, one synchronous trigger, then preview, download, and
//! cleanup actions against the delivered file.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
