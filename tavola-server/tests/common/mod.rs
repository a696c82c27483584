//! Shared helpers for router-level tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tavola_server::api::build_app;
use tavola_server::{Config, ServerState};

/// Seeded in-memory application
pub async fn app() -> Router {
    let state = ServerState::in_memory(&Config::for_tests()).await.unwrap();
    build_app(state)
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn json(uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a 303 and return its `Location`
pub fn redirect_target(resp: &Response<Body>) -> String {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    resp.headers()[LOCATION].to_str().unwrap().to_string()
}

/// `name=value` of the session cookie set on the response
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("tavola_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Sign in with a seeded account, returning the `Cookie` header value
pub async fn login(app: &Router, username: &str) -> String {
    let body = format!("username={username}&password=password123");
    let resp = send(app, form("/staff/login", &body, None)).await;
    assert_eq!(redirect_target(&resp), "/staff/dashboard");
    session_cookie(&resp).expect("session cookie")
}
