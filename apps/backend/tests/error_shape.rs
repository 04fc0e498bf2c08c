//! The stable error contract: problem-details bodies with trace ids.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use backend_test_support::problem_details::assert_problem_details_from_service_response;

#[actix_web::test]
async fn unknown_match_is_a_problem_details_404() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let req = test::TestRequest::get().uri("/api/matches/99999").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "MATCH_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("99999"),
    )
    .await;
}

#[actix_web::test]
async fn malformed_match_id_is_a_problem_details_400() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let req = test::TestRequest::get().uri("/api/matches/banana").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "INVALID_MATCH_ID",
        StatusCode::BAD_REQUEST,
        Some("banana"),
    )
    .await;
}

#[actix_web::test]
async fn missing_division_param_is_a_problem_details_400() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let req = test::TestRequest::get().uri("/api/standings").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("division"),
    )
    .await;
}

#[actix_web::test]
async fn invalid_token_is_a_problem_details_401() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let req = test::TestRequest::get()
        .uri("/api/players")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}
