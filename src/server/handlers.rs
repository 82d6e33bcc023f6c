//! Handlers not linked to the webhook

use super::{AppState, errors};
use crate::{api, metric};
use ntex::web;
use serde_json::json;

/// Liveness check
#[web::get("/health")]
pub async fn health() -> impl web::Responder {
    web::HttpResponse::Ok().json(&json!({"ok": true}))
}

/// Return a [UrlNotFound](errors::ApiError::UrlNotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::ApiError::UrlNotFound.into())
}

/// Lists conversation threads of the linked Instagram business account
#[web::get("/conversations")]
pub async fn list_conversations(
    query: web::types::Query<api::conversations::ConversationsQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let page_request = api::conversations::PageRequest::try_from(&*query)
        .map_err(errors::ApiError::BadRequest)?;

    let page = api::conversations::list_conversations(&app_state.graph, &page_request)
        .await
        .map_err(|e| {
            metric::incr_conversations_statds("failed");
            errors::ApiError::Upstream(e.to_string())
        })?;

    metric::incr_conversations_statds("listed");

    Ok(web::HttpResponse::Ok().json(&json!({
        "success": true,
        "data": page.data,
        "paging": page.paging,
    })))
}
