//! End-to-end coverage of the HTTP surface over in-memory stores.
//!
//! These tests exercise the full request path: routing, extraction, the
//! domain services, and the fallback adapters. Only the stores and the
//! push transport are faked.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::Utc;
use serde_json::{Value, json};

use backend::domain::{HotelId, Role};
use backend::server::build_app;
use support::{harness, harness_with_limit, multipart_body, wait_until};

const BOUNDARY: &str = "it-boundary-7f3a";

async fn login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    mobile_number: &str,
    hotel_name: &str,
) -> String {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/auth/direct-login")
            .set_json(json!({
                "mobileNumber": mobile_number,
                "name": "Asha",
                "hotelName": hotel_name,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    body["token"].as_str().expect("token issued").to_owned()
}

fn upload_request(token: &str, image: Option<&[u8]>, note: Option<&str>) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/menu/upload")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(BOUNDARY, image, note))
        .to_request()
}

#[actix_web::test]
async fn direct_login_round_trips_through_the_dashboard() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;

    let token = login(&app, "5550000001", "Seaside Inn").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/hotel/dashboard")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["hotel"]["hotelName"], "Seaside Inn");
    assert_eq!(body["hotel"]["mobileNumber"], "5550000001");
    assert_eq!(body["hotel"]["role"], "hotel");
}

#[actix_web::test]
async fn protected_routes_enforce_token_and_role() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/hotel/dashboard")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let wrong_role = h
        .codec
        .issue(HotelId::random(), Role::Unknown, Utc::now())
        .expect("sign");
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/menu/history")
            .insert_header(("Authorization", format!("Bearer {wrong_role}")))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "forbidden");
}

#[actix_web::test]
async fn otp_codes_are_single_use() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/send-otp")
            .set_json(json!({ "mobileNumber": "5550000002" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let code = body["mockOtp"].as_str().expect("code echoed").to_owned();

    let verify = |otp: String| {
        actix_test::TestRequest::post()
            .uri("/api/auth/verify-otp")
            .set_json(json!({
                "mobileNumber": "5550000002",
                "otp": otp,
                "hotelName": "Hilltop",
            }))
            .to_request()
    };

    let first = actix_test::call_service(&app, verify(code.clone())).await;
    assert_eq!(first.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(first).await;
    assert!(body["token"].as_str().is_some());

    let second = actix_test::call_service(&app, verify(code)).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["message"], "Invalid or expired OTP");
}

#[actix_web::test]
async fn wrong_otp_is_rejected() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;

    actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/send-otp")
            .set_json(json!({ "mobileNumber": "5550000003" }))
            .to_request(),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/verify-otp")
            .set_json(json!({ "mobileNumber": "5550000003", "otp": "00000" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn send_otp_is_rate_limited_per_source() {
    let h = harness_with_limit(3);
    let app = actix_test::init_service(build_app(h.deps.clone())).await;

    for _ in 0..3 {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/send-otp")
                .set_json(json!({ "mobileNumber": "5550000004" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/send-otp")
            .set_json(json!({ "mobileNumber": "5550000004" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "too_many_requests");
}

#[actix_web::test]
async fn missing_mobile_number_fails_fast() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/send-otp")
            .set_json(json!({ "mobileNumber": null }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Mobile number is required");
}

#[actix_web::test]
async fn same_day_reupload_updates_in_place() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;
    let token = login(&app, "5550000005", "Seaside Inn").await;

    let first = actix_test::call_service(
        &app,
        upload_request(&token, Some(&[0xFF, 0xD8, 0x01]), Some("breakfast")),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(first).await;
    assert_eq!(body["message"], "Menu uploaded locally (inline storage)");
    let first_id = body["menu"]["id"].as_str().expect("id").to_owned();

    let second = actix_test::call_service(
        &app,
        upload_request(&token, Some(&[0xFF, 0xD8, 0x02]), Some("lunch")),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["message"], "Menu updated locally (inline storage)");
    assert_eq!(body["menu"]["id"], first_id.as_str());
    assert_eq!(body["menu"]["note"], "lunch");

    // Exactly one record persists for the day.
    assert_eq!(h.menus.count(), 1);

    let history = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/menu/history")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(history).await;
    assert_eq!(body["items"].as_array().expect("items").len(), 1);
    assert_eq!(body["hasMore"], false);
}

#[actix_web::test]
async fn upload_without_image_fails_before_any_write() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;
    let token = login(&app, "5550000006", "Hilltop").await;

    let response =
        actix_test::call_service(&app, upload_request(&token, None, Some("just a note"))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "No image provided");
    assert_eq!(h.menus.count(), 0);
}

#[actix_web::test]
async fn unconfigured_media_store_inlines_the_image() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;
    let token = login(&app, "5550000007", "Hilltop").await;

    let response = actix_test::call_service(
        &app,
        upload_request(&token, Some(&[1, 2, 3, 4]), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let url = body["menu"]["imageUrl"].as_str().expect("image url");
    assert!(url.starts_with("data:image/jpeg;base64,"));
}

#[actix_web::test]
async fn public_listings_join_hotel_display_fields() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;

    let token_a = login(&app, "5550000008", "Seaside Inn").await;
    let token_b = login(&app, "5550000009", "Hilltop").await;
    for token in [&token_a, &token_b] {
        let response =
            actix_test::call_service(&app, upload_request(token, Some(&[9, 9, 9]), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    for uri in ["/api/menu/today", "/api/menu/latest"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(uri).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        let items = body["items"].as_array().expect("items");
        assert_eq!(items.len(), 2, "{uri} should list both hotels");
        let names: Vec<&str> = items
            .iter()
            .map(|item| item["hotelName"].as_str().expect("hotelName"))
            .collect();
        assert!(names.contains(&"Seaside Inn") && names.contains(&"Hilltop"));
    }
}

#[actix_web::test]
async fn subscribe_is_idempotent_per_hotel_and_endpoint() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;
    let token = login(&app, "5550000010", "Seaside Inn").await;
    let hotel_id = dashboard_hotel_id(&app, &token).await;

    let subscribe = |endpoint: &str| {
        actix_test::TestRequest::post()
            .uri("/api/push/subscribe")
            .set_json(json!({
                "hotelId": hotel_id,
                "subscription": {
                    "endpoint": endpoint,
                    "expirationTime": null,
                    "keys": { "p256dh": "pk", "auth": "secret" },
                },
            }))
            .to_request()
    };

    for _ in 0..2 {
        let response =
            actix_test::call_service(&app, subscribe("https://push.example/device-1")).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    assert_eq!(h.subscriptions.count(), 1);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/push/unsubscribe")
            .set_json(json!({
                "hotelId": hotel_id,
                "endpoint": "https://push.example/device-1",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(h.subscriptions.count(), 0);
}

#[actix_web::test]
async fn subscribing_to_an_unknown_hotel_is_not_found() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/push/subscribe")
            .set_json(json!({
                "hotelId": "00000000-0000-0000-0000-00000000dead",
                "subscription": {
                    "endpoint": "https://push.example/device-1",
                    "keys": { "p256dh": "pk", "auth": "secret" },
                },
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Hotel not found");
}

#[actix_web::test]
async fn upload_fans_out_and_prunes_gone_endpoints() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;
    let token = login(&app, "5550000011", "Seaside Inn").await;
    let hotel_id = dashboard_hotel_id(&app, &token).await;

    for endpoint in [
        "https://push.example/alive-1",
        "https://push.example/alive-2",
        "https://push.example/dead-1",
    ] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/push/subscribe")
                .set_json(json!({
                    "hotelId": hotel_id,
                    "subscription": {
                        "endpoint": endpoint,
                        "keys": { "p256dh": "pk", "auth": "secret" },
                    },
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    h.transport.mark_gone("https://push.example/dead-1");

    let response =
        actix_test::call_service(&app, upload_request(&token, Some(&[5, 5, 5]), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The fan-out runs detached from the upload response; wait for it to
    // settle rather than asserting immediately.
    let pruned = wait_until(|| h.subscriptions.count() == 2).await;
    assert!(pruned, "gone endpoint should be pruned");
    assert_eq!(h.transport.delivered().len(), 2);
    assert!(
        !h.subscriptions
            .endpoints()
            .contains(&"https://push.example/dead-1".to_owned())
    );
}

#[actix_web::test]
async fn vapid_public_key_is_served() {
    let h = harness();
    let app = actix_test::init_service(build_app(h.deps.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/push/vapidPublicKey")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["publicKey"], support::TEST_VAPID_KEY);
}

async fn dashboard_hotel_id(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    token: &str,
) -> String {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::get()
            .uri("/api/hotel/dashboard")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(response).await;
    body["hotel"]["id"].as_str().expect("hotel id").to_owned()
}
