mod common;

use actix_web::{test, web};

#[actix_web::test]
async fn health_endpoint_returns_ok() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = test::read_body(resp).await;
    assert_eq!(body, "ok");
}

#[actix_web::test]
async fn every_response_carries_a_request_id() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap();
    assert!(!request_id.is_empty());
}
