//! Application state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use mshorts_pipeline::{Pipeline, RenderHandle};

use crate::config::ApiConfig;

/// Shared application state.
///
/// `runs` maps run IDs to the handles of delivered files. The handle is the
/// single owner of its file; the cleanup endpoint takes it out of the map
/// and releases it.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: Arc<Pipeline>,
    pub runs: Arc<RwLock<HashMap<String, RenderHandle>>>,
}

impl AppState {
    pub fn new(config: ApiConfig, pipeline: Pipeline) -> Self {
        Self {
            config,
            pipeline: Arc::new(pipeline),
            runs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
