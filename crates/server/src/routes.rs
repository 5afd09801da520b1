use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub mod auth;
pub mod media;
pub mod places;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public auth pages plus the
/// login-protected wishlist, details and media routes.
pub fn build_router(state: ServerState) -> Router {
    // Public routes (health + login/registration)
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/logout", post(auth::logout));

    // Routes that need a signed-in user
    let protected = Router::new()
        .route("/", get(places::wishlist).post(places::create_place))
        .route("/visited", get(places::visited))
        .route("/place/:id", get(places::place_details).post(places::update_place))
        .route("/place/:id/was_visited", post(places::mark_visited))
        .route("/place/:id/delete", post(places::delete_place))
        .route("/media/*blob", get(media::photo))
        .route("/auth/delete-account", post(auth::delete_account))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_login));

    let body_limit = state.body_limit;

    // Compose
    public
        .merge(protected)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
