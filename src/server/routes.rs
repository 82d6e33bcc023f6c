//! Route configuration for the non-webhook endpoints.

use super::handlers;
use ntex::web;

/// Instagram read API.
///
/// # Routes
/// - `GET /ig/conversations` - Paginated conversation threads
pub fn instagram_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/ig").service((handlers::list_conversations,)));
}

/// # Routes
/// - `GET /health` - Liveness check
pub fn health(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health);
}
