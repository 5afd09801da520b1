use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Request-level failure, rendered as a short HTML error page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("malformed form: {}", .0.body_text())]
    Multipart(#[from] MultipartError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Service(e) => match e {
                ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Forbidden => StatusCode::FORBIDDEN,
                ServiceError::Db(_) | ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Auth(e) => match e {
                AuthError::Validation(_) => StatusCode::BAD_REQUEST,
                AuthError::Conflict => StatusCode::CONFLICT,
                AuthError::Unauthorized | AuthError::TokenError(_) => StatusCode::UNAUTHORIZED,
                AuthError::NotFound => StatusCode::NOT_FOUND,
                AuthError::HashError(_) | AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Multipart(e) => e.status(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 5xx 细节只写日志，不回传给客户端
        let msg = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Something went wrong on our side.".to_string()
        } else {
            if let AppError::Auth(e) = &self {
                warn!(code = e.code(), error = %e, "auth request rejected");
            }
            self.to_string()
        };
        let reason = status.canonical_reason().unwrap_or("Error");
        let body = format!(
            "<!DOCTYPE html><html><head><title>{reason}</title></head><body><h1>{} {reason}</h1><p>{}</p><p><a href=\"/\">Back to the wishlist</a></p></body></html>",
            status.as_u16(),
            escape(&msg),
        );
        (status, Html(body)).into_response()
    }
}

/// Errors that stop the server before it accepts requests.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error("template setup failed: {0}")]
    Templates(String),
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}
