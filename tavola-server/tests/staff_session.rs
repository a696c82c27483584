mod common;

use common::*;
use http::StatusCode;
use http::header::SET_COOKIE;
use tavola_server::ErrorCode;

#[tokio::test]
async fn test_health_is_public() {
    let app = app().await;
    let resp = send(&app, get("/health", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_staff_routes_redirect_to_login() {
    let app = app().await;
    for uri in ["/staff/dashboard", "/staff/orders", "/staff/schedule", "/staff/me"] {
        let resp = send(&app, get(uri, None)).await;
        assert_eq!(redirect_target(&resp), "/staff/login", "{uri}");
    }

    let resp = send(&app, form("/staff/kitchen/1/advance", "", None)).await;
    assert_eq!(redirect_target(&resp), "/staff/login");

    // unknown token
    let resp = send(&app, get("/staff/dashboard", Some("tavola_session=nope"))).await;
    assert_eq!(redirect_target(&resp), "/staff/login");
}

#[tokio::test]
async fn test_login_page_is_public() {
    let app = app().await;
    let resp = send(&app, get("/staff/login", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "staff_login");
    assert!(body["data"]["error"].is_null());
}

#[tokio::test]
async fn test_login_dashboard_logout() {
    let app = app().await;
    let resp = send(
        &app,
        form("/staff/login", "username=manager&password=password123", None),
    )
    .await;
    assert_eq!(redirect_target(&resp), "/staff/dashboard");
    let set_cookie = resp.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = session_cookie(&resp).unwrap();

    let resp = send(&app, get("/staff/dashboard", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "staff_dashboard");
    assert_eq!(body["data"]["staff"]["staff_name"], "John Manager");
    assert_eq!(body["data"]["staff"]["staff_role"], "Manager");

    let resp = send(&app, get("/staff/me", Some(&cookie))).await;
    let body = body_json(resp).await;
    assert_eq!(body["data"]["username"], "manager");

    let resp = send(&app, get("/staff/logout", Some(&cookie))).await;
    assert_eq!(redirect_target(&resp), "/staff/login");

    // the old cookie no longer opens the portal
    let resp = send(&app, get("/staff/dashboard", Some(&cookie))).await;
    assert_eq!(redirect_target(&resp), "/staff/login");
}

#[tokio::test]
async fn test_failed_login_is_uniform_and_echoes_username_only() {
    let app = app().await;

    let wrong = send(&app, form("/staff/login", "username=manager&password=nope", None)).await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&wrong).is_none());
    let wrong = body_json(wrong).await;

    let unknown = send(&app, form("/staff/login", "username=ghost&password=nope", None)).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong["code"], unknown["code"]);
    assert_eq!(wrong["message"], unknown["message"]);
    assert_eq!(
        wrong["code"].as_u64(),
        Some(ErrorCode::InvalidCredentials.code() as u64)
    );
    assert_eq!(wrong["details"]["form"]["username"], "manager");
    assert!(wrong["details"]["form"].get("password").is_none());
}

#[tokio::test]
async fn test_json_login() {
    let app = app().await;
    let body = serde_json::json!({"username": "waiter1", "password": "password123"});
    let resp = send(&app, json("/staff/login", &body, None)).await;
    assert_eq!(redirect_target(&resp), "/staff/dashboard");
    assert!(session_cookie(&resp).is_some());
}
