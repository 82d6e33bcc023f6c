use derive_more::{Display, Error};
use ntex::{http, web};
use serde_json::json;

/// Rejections on the webhook endpoints. No detail is leaked to the caller.
#[derive(Debug, Display, Error)]
pub enum WebhookError {
    Forbidden,
}

impl web::error::WebResponseError for WebhookError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        web::HttpResponse::build(self.status_code()).finish()
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            WebhookError::Forbidden => http::StatusCode::FORBIDDEN,
        }
    }
}

/// Errors of the JSON API, rendered as `{"success": false, "error": ...}`
#[derive(Debug, Display, Error)]
pub enum ApiError {
    UrlNotFound,
    BadRequest(#[error(not(source))] String),
    Upstream(#[error(not(source))] String),
}

impl web::error::WebResponseError for ApiError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        let error = match self {
            ApiError::UrlNotFound => "not found".to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Upstream(msg) => {
                logfire::error!("[UpstreamError] {error}", error = msg.clone());
                msg.clone()
            }
        };

        web::HttpResponse::build(self.status_code()).json(&json!({
            "success": false,
            "error": error,
        }))
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            ApiError::UrlNotFound => http::StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Upstream(_) => http::StatusCode::BAD_REQUEST,
        }
    }
}
