mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;
use service::place::domain::NewPlaceInput;

fn session_cookie(resp: &axum::http::Response<Body>) -> Option<String> {
    set_cookies(resp).into_iter().find(|c| c.starts_with("auth_token=") && c.len() > "auth_token=".len())
}

#[tokio::test]
async fn login_page_is_public() -> anyhow::Result<()> {
    let t = test_app().await?;
    let resp = t.send(get("/auth/login", "")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("action=\"/auth/login\""));
    assert!(html.contains("action=\"/auth/register\""));
    Ok(())
}

#[tokio::test]
async fn register_signs_in_and_redirects() -> anyhow::Result<()> {
    let t = test_app().await?;
    let resp = t.send(post_form("/auth/register", "", "username=marco&password=polo-polo-polo")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/"));
    let cookie = session_cookie(&resp).expect("session cookie set");

    let resp = t.send(get("/", &cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Signed in as marco"));
    Ok(())
}

#[tokio::test]
async fn register_rejects_duplicates_and_weak_passwords() -> anyhow::Result<()> {
    let t = test_app().await?;
    t.sign_up("taken").await?;

    let resp = t.send(post_form("/auth/register", "", "username=taken&password=long-enough-pw")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(session_cookie(&resp).is_none());

    let resp = t.send(post_form("/auth/register", "", "username=fresh&password=short")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = body_text(resp).await;
    assert!(html.contains("password too short"));
    assert!(html.contains("value=\"fresh\""));
    Ok(())
}

#[tokio::test]
async fn login_checks_password() -> anyhow::Result<()> {
    let t = test_app().await?;
    t.sign_up("ibn").await?;

    let resp = t.send(post_form("/auth/login", "", "username=ibn&password=wrong-password")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(resp).await.contains("Invalid username or password."));

    let resp = t.send(post_form("/auth/login", "", &format!("username=ibn&password={PASSWORD}"))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&resp).expect("session cookie");
    assert_eq!(t.send(get("/visited", &cookie)).await.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn bearer_header_is_accepted() -> anyhow::Result<()> {
    let t = test_app().await?;
    let (_, cookie) = t.sign_up("api").await?;
    let token = cookie.trim_start_matches("auth_token=");
    let req = Request::builder()
        .uri("/")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())?;
    assert_eq!(t.send(req).await.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn forged_token_redirects_to_login() -> anyhow::Result<()> {
    let t = test_app().await?;
    let resp = t.send(get("/", "auth_token=not.a.jwt")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/auth/login"));
    Ok(())
}

#[tokio::test]
async fn logout_clears_session_cookie() -> anyhow::Result<()> {
    let t = test_app().await?;
    let (_, cookie) = t.sign_up("leaver").await?;
    let resp = t.send(post_form("/auth/logout", &cookie, "")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/auth/login"));
    assert!(set_cookies(&resp).iter().any(|c| c == "auth_token="));
    Ok(())
}

#[tokio::test]
async fn delete_account_removes_places_and_photos() -> anyhow::Result<()> {
    let t = test_app().await?;
    let (user, cookie) = t.sign_up("gone").await?;
    let place = t.state.places.create(user.id, NewPlaceInput { name: "Reykjavik".into(), visited: true }).await?;
    let upload = vec![Part::File("photo", "aurora.png", sample_png())];
    t.send(post_multipart(&format!("/place/{}", place.id), &cookie, upload)).await;
    assert_eq!(t.blobs.names().await.len(), 1);

    let resp = t.send(post_form("/auth/delete-account", &cookie, "")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/auth/login"));

    assert!(t.blobs.names().await.is_empty());
    assert!(t.state.places.list_visited(user.id).await?.is_empty());
    let resp = t.send(post_form("/auth/login", "", &format!("username=gone&password={PASSWORD}"))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_reused_after_account_deletion_is_rejected() -> anyhow::Result<()> {
    let t = test_app().await?;
    let (user, cookie) = t.sign_up("ghost").await?;
    let token = cookie.trim_start_matches("auth_token=").to_string();
    t.send(post_form("/auth/delete-account", &cookie, "")).await;

    let resp = t.send(post_form("/", &cookie, "name=Tokyo")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/auth/login"));
    assert!(set_cookies(&resp).iter().any(|c| c == "auth_token="));
    assert!(t.state.places.list_wishlist(user.id).await?.is_empty());

    let req = Request::builder()
        .uri("/")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = t.send(req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/auth/login"));
    Ok(())
}
