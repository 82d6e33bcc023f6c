pub mod errors;
pub mod handlers;
pub mod routes;

use crate::{config::AppConfig, services};
use std::sync::Arc;

/// Per-worker state shared by every handler
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub graph: services::ImplGraphService,
}
