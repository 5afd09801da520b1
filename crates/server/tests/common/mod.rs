#![allow(dead_code)]
//! Shared helpers for router-level tests: a migrated in-memory SQLite
//! database, an in-memory photo store and signed-in users.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use migration::MigratorTrait;
use serde::Deserialize;
use tower::ServiceExt;

use server::routes;
use server::state::ServerState;
use service::auth::domain::{AuthUser, RegisterInput};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::AuthConfig;
use service::place::domain::{NewPlaceInput, PlaceDetailsUpdate};
use service::place::repo::seaorm::SeaOrmPlaceRepository;
use service::place::Place;
use service::storage::MemoryBlobStore;

pub const PASSWORD: &str = "correct-horse-battery";
pub const BOUNDARY: &str = "----wishlist-test-boundary";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    pub blobs: Arc<MemoryBlobStore>,
}

pub async fn test_app() -> anyhow::Result<TestApp> {
    let cfg = models::db::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = models::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;

    let blobs = Arc::new(MemoryBlobStore::new());
    let state = ServerState::new(
        Arc::new(SeaOrmPlaceRepository { db: db.clone() }),
        blobs.clone(),
        Arc::new(SeaOrmAuthRepository { db }),
        AuthConfig::new("test-secret", 1),
        1 << 20,
    )?;
    let app = routes::build_router(state.clone());
    Ok(TestApp { app, state, blobs })
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(req).await.expect("router is infallible")
    }

    /// Register `username` directly through the auth service and return the
    /// user plus a ready-to-send `Cookie` header value.
    pub async fn sign_up(&self, username: &str) -> anyhow::Result<(AuthUser, String)> {
        let user = self
            .state
            .auth
            .register(RegisterInput { username: username.into(), password: PASSWORD.into() })
            .await?;
        let token = self.state.auth.issue_token(&user)?;
        Ok((user, format!("auth_token={token}")))
    }

    /// Load `tests/fixtures/test_places.json`, creating one account per owner.
    pub async fn load_fixture(&self) -> anyhow::Result<HashMap<String, (AuthUser, String)>> {
        #[derive(Deserialize)]
        struct Row {
            owner: String,
            name: String,
            visited: bool,
            notes: Option<String>,
            date_visited: Option<String>,
        }

        let rows: Vec<Row> = serde_json::from_str(include_str!("../fixtures/test_places.json"))?;
        let mut owners: HashMap<String, (AuthUser, String)> = HashMap::new();
        for row in rows {
            if !owners.contains_key(&row.owner) {
                let signed_up = self.sign_up(&row.owner).await?;
                owners.insert(row.owner.clone(), signed_up);
            }
            let uid = owners[&row.owner].0.id;
            let place = self.state.places.create(uid, NewPlaceInput { name: row.name, visited: row.visited }).await?;
            if row.notes.is_some() || row.date_visited.is_some() {
                let update = PlaceDetailsUpdate { notes: row.notes, date_visited: row.date_visited, ..Default::default() };
                self.state.places.update_details(uid, place.id, update).await?;
            }
        }
        Ok(owners)
    }

    pub async fn place_named(&self, owner: &AuthUser, name: &str) -> anyhow::Result<Place> {
        let mut all = self.state.places.list_wishlist(owner.id).await?;
        all.extend(self.state.places.list_visited(owner.id).await?);
        all.into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| anyhow::anyhow!("no place named {name}"))
    }
}

pub fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder().uri(uri).header(header::COOKIE, cookie).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, Vec<u8>),
}

pub fn post_multipart(uri: &str, cookie: &str, parts: Vec<Part<'_>>) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n")
                        .as_bytes(),
                );
                body.extend_from_slice(&bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("read body");
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn location(resp: &Response<Body>) -> Option<String> {
    resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()).map(str::to_string)
}

/// `name=value` pairs from every Set-Cookie header on the response.
pub fn set_cookies(resp: &Response<Body>) -> Vec<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(|kv| kv.trim().to_string())
        .collect()
}

pub fn sample_png() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(3, 3));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).expect("encode png");
    buf.into_inner()
}
