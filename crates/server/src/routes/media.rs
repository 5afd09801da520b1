use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Extension,
};

use crate::errors::AppError;
use crate::routes::auth::CurrentUser;
use crate::state::ServerState;

/// Serve a photo blob; only blobs referenced by the caller's own places are visible.
pub async fn photo(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(blob): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.places.photo(user.id, &blob).await?;
    let mime = mime_guess::from_path(&blob).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response())
}
