use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{debug, info, warn};

use service::auth::domain::{AuthUser, LoginInput, RegisterInput};
use service::auth::errors::AuthError;

use crate::errors::AppError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";
pub const LOGIN_PATH: &str = "/auth/login";

/// Identity attached to requests that passed [`require_login`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

fn session_removal() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, "")).path("/").build()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

/// 登录校验中间件：优先读取 Authorization: Bearer，其次回退到 auth_token Cookie。
/// 未登录、token 失效或账号已删除时 303 重定向到登录页。
pub async fn require_login(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let token = bearer_token(req.headers())
        .or_else(|| jar.get(AUTH_COOKIE).map(|c| c.value().to_string()))
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        debug!(path = %path, "no session, redirecting to login");
        return Redirect::to(LOGIN_PATH).into_response();
    };

    match state.auth.current_user(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Err(AuthError::Repository(msg)) => AppError::from(AuthError::Repository(msg)).into_response(),
        Err(e) => {
            warn!(path = %path, code = e.code(), err = %e, "session token rejected");
            (jar.remove(session_removal()), Redirect::to(LOGIN_PATH)).into_response()
        }
    }
}

pub async fn login_page(State(state): State<ServerState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.views.login("", "", &[])?))
}

pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(input): Form<LoginInput>,
) -> Result<Response, AppError> {
    let username = input.username.clone();
    match state.auth.login(input).await {
        Ok(session) => Ok((jar.add(session_cookie(session.token)), Redirect::to("/")).into_response()),
        Err(AuthError::Unauthorized) => {
            let html = state.views.login(&username, "", &["Invalid username or password.".to_string()])?;
            Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Create the account and sign it in straight away.
pub async fn register(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(input): Form<RegisterInput>,
) -> Result<Response, AppError> {
    let username = input.username.clone();
    match state.auth.register(input).await {
        Ok(user) => {
            let token = state.auth.issue_token(&user)?;
            Ok((jar.add(session_cookie(token)), Redirect::to("/")).into_response())
        }
        Err(e @ (AuthError::Validation(_) | AuthError::Conflict)) => {
            let status = if matches!(e, AuthError::Conflict) { StatusCode::CONFLICT } else { StatusCode::BAD_REQUEST };
            let html = state.views.login("", &username, &[e.to_string()])?;
            Ok((status, Html(html)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(session_removal()), Redirect::to(LOGIN_PATH))
}

/// Remove the signed-in account together with its places and photos.
pub async fn delete_account(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    state.users.delete_user(user.id).await?;
    info!(user_id = %user.id, "account_deleted");
    Ok((jar.remove(session_removal()), Redirect::to(LOGIN_PATH)))
}
