mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use serde_json::json;

#[actix_web::test]
async fn register_then_login_roundtrip() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let email = unique_email("register");
    let token = common::register_user(&app, &email, "correct horse battery staple").await;
    assert!(!token.is_empty());

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": "correct horse battery staple" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["token"].as_str().is_some());
}

#[actix_web::test]
async fn wrong_password_is_rejected() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let email = unique_email("wrongpw");
    common::register_user(&app, &email, "correct horse battery staple").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": "not the password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "INVALID_CREDENTIALS",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn duplicate_email_conflicts() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let email = unique_email("dup");
    common::register_user(&app, &email, "correct horse battery staple").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": email, "password": "another password here" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNIQUE_EMAIL",
        StatusCode::CONFLICT,
        None,
    )
    .await;
}

#[actix_web::test]
async fn weak_password_is_rejected() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": unique_email("weak"), "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "INVALID_PASSWORD",
        StatusCode::BAD_REQUEST,
        Some("at least 8"),
    )
    .await;
}

#[actix_web::test]
async fn google_login_is_idempotent() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let email = unique_email("google");
    let payload = json!({
        "email": email,
        "name": "Googler",
        "google_sub": "google-sub-abc123"
    });

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/auth/google")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[actix_web::test]
async fn google_sub_mismatch_is_a_conflict() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let email = unique_email("mismatch");

    let req = test::TestRequest::post()
        .uri("/api/auth/google")
        .set_json(json!({ "email": email, "google_sub": "google-sub-original" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/google")
        .set_json(json!({ "email": email, "google_sub": "google-sub-other" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "GOOGLE_SUB_MISMATCH",
        StatusCode::CONFLICT,
        None,
    )
    .await;
}

#[actix_web::test]
async fn protected_route_requires_token() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/players")
        .set_json(json!({ "display_name": "Jo" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}
