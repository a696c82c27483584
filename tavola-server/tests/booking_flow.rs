mod common;

use common::*;
use http::StatusCode;
use tavola_server::ErrorCode;

const BOOKING: &str =
    "customer_name=Ann+Lee&customer_phone=555-0100&customer_email=&date=2030-06-01&time=19:00&num_guests=4";

#[tokio::test]
async fn test_reserve_form_defaults_from_query() {
    let app = app().await;
    let resp = send(&app, get("/reserve?date=2030-06-01&num_guests=2", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "reserve");
    assert_eq!(body["data"]["date"], "2030-06-01");
    assert_eq!(body["data"]["time"], "");
    assert_eq!(body["data"]["num_guests"], "2");
}

#[tokio::test]
async fn test_reserve_then_confirmation() {
    let app = app().await;
    let resp = send(&app, form("/reserve", BOOKING, None)).await;
    let location = redirect_target(&resp);
    assert!(location.starts_with("/reservation-confirmed/"));

    let resp = send(&app, get(&location, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "reservation_confirmed");
    assert_eq!(body["data"]["customer_name"], "Ann Lee");
    assert_eq!(body["data"]["table_number"], 1);
    assert_eq!(body["data"]["number_of_guests"], 4);
    assert_eq!(body["data"]["status"], "Confirmed");
    assert!(body["data"]["email"].is_null());
}

#[tokio::test]
async fn test_missing_confirmation_goes_home() {
    let app = app().await;
    let resp = send(&app, get("/reservation-confirmed/999", None)).await;
    assert_eq!(redirect_target(&resp), "/");
}

#[tokio::test]
async fn test_invalid_booking_echoes_form() {
    let app = app().await;
    let body = "customer_name=Ann&date=2030-06-01&time=19:00&num_guests=0";
    let resp = send(&app, form("/reserve", body, None)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["details"]["form"]["date"], "2030-06-01");
    assert_eq!(body["details"]["form"]["time"], "19:00");
    assert_eq!(body["details"]["form"]["num_guests"], "0");
}

#[tokio::test]
async fn test_duplicate_phone_is_conflict() {
    let app = app().await;
    redirect_target(&send(&app, form("/reserve", BOOKING, None)).await);

    let again = BOOKING.replace("time=19:00", "time=12:00");
    let resp = send(&app, form("/reserve", &again, None)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert_eq!(
        body["code"].as_u64(),
        Some(ErrorCode::CustomerAlreadyExists.code() as u64)
    );
}

#[tokio::test]
async fn test_staff_manage_reservations() {
    let app = app().await;
    let location = redirect_target(&send(&app, form("/reserve", BOOKING, None)).await);
    let id = location.rsplit('/').next().unwrap().to_string();
    let cookie = login(&app, "waiter1").await;

    let resp = send(&app, get("/staff/reservations", Some(&cookie))).await;
    let body = body_json(resp).await;
    assert_eq!(body["message"], "manage_reservations");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let uri = format!("/staff/reservations/{id}/status");
    let resp = send(&app, form(&uri, "status=No-Show", Some(&cookie))).await;
    assert_eq!(redirect_target(&resp), "/staff/reservations");

    let resp = send(&app, get(&location, None)).await;
    assert_eq!(body_json(resp).await["data"]["status"], "No-Show");

    // legacy form action
    let uri = format!("/staff/reservation/update_status/{id}");
    let resp = send(&app, form(&uri, "status=Seated", Some(&cookie))).await;
    assert_eq!(redirect_target(&resp), "/staff/reservations");

    let uri = format!("/staff/reservations/{id}/delete");
    let resp = send(&app, form(&uri, "", Some(&cookie))).await;
    assert_eq!(redirect_target(&resp), "/staff/reservations");

    let resp = send(&app, form(&uri, "", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_menu_is_grouped() {
    let app = app().await;
    let body = body_json(send(&app, get("/menu", None)).await).await;
    let sections = body["data"].as_array().unwrap();
    assert_eq!(sections.len(), 4);
    assert_eq!(sections[0]["category"], "Appetizer");
    assert_eq!(sections[0]["items"][0]["name"], "Caesar Salad");
}
