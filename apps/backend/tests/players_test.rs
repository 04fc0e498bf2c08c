//! Player registration and contact privacy.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use backend_test_support::unique_helpers::unique_email;
use serde_json::json;

#[actix_web::test]
async fn registration_creates_profile_and_private_contact() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let owner = common::register_user(&app, &unique_email("owner"), "correct horse battery staple").await;

    let req = test::TestRequest::post()
        .uri("/api/players")
        .insert_header(common::bearer(&owner))
        .set_json(json!({
            "display_name": "Jo Bloggs",
            "contact": {
                "email": "jo@example.test",
                "phone": "01234 567890"
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: serde_json::Value = test::read_body_json(resp).await;
    let player_id = created["id"].as_i64().unwrap();
    assert_eq!(created["display_name"], "Jo Bloggs");
    assert_eq!(created["contact"]["email"], "jo@example.test");

    // The owner sees the contact block.
    let req = test::TestRequest::get()
        .uri(&format!("/api/players/{player_id}"))
        .insert_header(common::bearer(&owner))
        .to_request();
    let view: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(view["contact"]["phone"], "01234 567890");

    // Anonymous viewers get the public profile only.
    let req = test::TestRequest::get()
        .uri(&format!("/api/players/{player_id}"))
        .to_request();
    let view: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(view["display_name"], "Jo Bloggs");
    assert!(view.get("contact").is_none());
}

#[actix_web::test]
async fn contact_is_hidden_from_other_users_but_not_admins() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let owner = common::register_user(&app, &unique_email("owner"), "correct horse battery staple").await;
    let other = common::register_user(&app, &unique_email("other"), "correct horse battery staple").await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let req = test::TestRequest::post()
        .uri("/api/players")
        .insert_header(common::bearer(&owner))
        .set_json(json!({
            "display_name": "Private Pat",
            "contact": { "email": "pat@example.test" }
        }))
        .to_request();
    let created: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let player_id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/players/{player_id}"))
        .insert_header(common::bearer(&other))
        .to_request();
    let view: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(view.get("contact").is_none());

    let req = test::TestRequest::get()
        .uri(&format!("/api/players/{player_id}"))
        .insert_header(common::bearer(&admin))
        .to_request();
    let view: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(view["contact"]["email"], "pat@example.test");
}

#[actix_web::test]
async fn only_owner_or_admin_may_update() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;

    let owner = common::register_user(&app, &unique_email("owner"), "correct horse battery staple").await;
    let other = common::register_user(&app, &unique_email("other"), "correct horse battery staple").await;

    let req = test::TestRequest::post()
        .uri("/api/players")
        .insert_header(common::bearer(&owner))
        .set_json(json!({ "display_name": "Original Name" }))
        .to_request();
    let created: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let player_id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/players/{player_id}"))
        .insert_header(common::bearer(&other))
        .set_json(json!({ "display_name": "Hijacked" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::patch()
        .uri(&format!("/api/players/{player_id}"))
        .insert_header(common::bearer(&owner))
        .set_json(json!({ "display_name": "Renamed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["display_name"], "Renamed");
}

#[actix_web::test]
async fn empty_display_name_is_rejected() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let owner = common::register_user(&app, &unique_email("owner"), "correct horse battery staple").await;

    let req = test::TestRequest::post()
        .uri("/api/players")
        .insert_header(common::bearer(&owner))
        .set_json(json!({ "display_name": "   " }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}
