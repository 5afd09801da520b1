use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use tracing::warn;

use service::errors::ServiceError;
use service::place::domain::{NewPlaceInput, PhotoChange, PhotoUpload, PlaceDetailsUpdate};

use crate::errors::AppError;
use crate::routes::auth::CurrentUser;
use crate::state::ServerState;

const FLASH_COOKIE: &str = "flash";
const FLASH_UPDATED: &str = "details_updated";

#[derive(Debug, Deserialize)]
pub struct NewPlaceForm {
    #[serde(default)]
    pub name: String,
}

pub async fn wishlist(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    let places = state.places.list_wishlist(user.id).await?;
    Ok(Html(state.views.wishlist(&user, &places, "", &[])?))
}

pub async fn visited(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    let places = state.places.list_visited(user.id).await?;
    Ok(Html(state.views.visited(&user, &places)?))
}

/// Add a place to the wishlist; invalid names re-render the list with the error.
pub async fn create_place(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<NewPlaceForm>,
) -> Result<Response, AppError> {
    let input = NewPlaceInput { name: form.name.clone(), visited: false };
    match state.places.create(user.id, input).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(ServiceError::Validation(msg)) => {
            let places = state.places.list_wishlist(user.id).await?;
            let html = state.views.wishlist(&user, &places, &form.name, &[msg])?;
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn mark_visited(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    state.places.mark_visited(user.id, id).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_place(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    state.places.delete(user.id, id).await?;
    Ok(Redirect::to("/"))
}

pub async fn place_details(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> Result<(CookieJar, Html<String>), AppError> {
    let place = state.places.get_details(user.id, id).await?;
    // flash 只显示一次，读取后立即清除
    let (jar, flash) = match jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) {
        Some(value) => (jar.remove(flash_removal()), flash_message(&value)),
        None => (jar, None),
    };
    let html = state.views.details(&user, &place, flash, &[])?;
    Ok((jar, Html(html)))
}

pub async fn update_place(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    // 先校验归属，再读取可能很大的上传内容
    let place = state.places.get_details(user.id, id).await?;

    let update = match read_details_form(multipart).await {
        Ok(update) => update,
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!(place_id = id, error = %e.body_text(), "details form over body limit");
            let msg = format!("photo is too large (limit {} bytes)", state.places.max_photo_bytes());
            let html = state.views.details(&user, &place, None, &[msg])?;
            return Ok((StatusCode::BAD_REQUEST, Html(html)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    match state.places.update_details(user.id, id, update).await {
        Ok(_) => Ok((jar.add(flash_cookie()), Redirect::to(&format!("/place/{id}"))).into_response()),
        Err(ServiceError::Validation(msg)) => {
            let html = state.views.details(&user, &place, None, &[msg])?;
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Collect the review form. A new upload wins over `photo-clear`.
async fn read_details_form(mut multipart: Multipart) -> Result<PlaceDetailsUpdate, MultipartError> {
    let mut update = PlaceDetailsUpdate::default();
    let mut upload = None;
    let mut clear = false;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "notes" => update.notes = Some(field.text().await?),
            "date_visited" => update.date_visited = Some(field.text().await?),
            "photo" => {
                let named = field.file_name().is_some_and(|n| !n.is_empty());
                let bytes = field.bytes().await?;
                // 未选择文件时浏览器仍会提交一个空的 photo 字段
                if named || !bytes.is_empty() {
                    upload = Some(PhotoUpload { bytes: bytes.to_vec() });
                }
            }
            "photo-clear" => clear = true,
            _ => {}
        }
    }

    update.photo = match (upload, clear) {
        (Some(u), _) => PhotoChange::Replace(u),
        (None, true) => PhotoChange::Clear,
        (None, false) => PhotoChange::Keep,
    };
    Ok(update)
}

fn flash_cookie() -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, FLASH_UPDATED)).path("/").http_only(true).build()
}

fn flash_removal() -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, "")).path("/").build()
}

fn flash_message(value: &str) -> Option<&'static str> {
    match value {
        FLASH_UPDATED => Some("Trip information updated"),
        _ => None,
    }
}
