//! Statistics and events endpoints.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use backend_test_support::unique_helpers::unique_email;
use common::league::{flat_hand_sheet, schedule_fixture, seed_league};
use serde_json::json;

#[actix_web::test]
async fn player_stats_aggregate_completed_matches() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 1).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/result"))
        .insert_header(common::bearer(&admin))
        .set_json(flat_hand_sheet(&league, 17, 18))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/stats/players?division={}", league.division_id))
        .to_request();
    let rows: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(rows.len(), 2);

    // Away player averaged 18 per hand; they sort first.
    assert_eq!(rows[0]["player_id"].as_i64(), Some(league.away_players[0]));
    assert_eq!(rows[0]["games"], 1);
    assert_eq!(rows[0]["hands"], 5);
    assert_eq!(rows[0]["total_pins"], 90);
    assert_eq!(rows[0]["average"], 18.0);
    assert_eq!(rows[0]["best_hand"], 18);
    assert_eq!(rows[0]["best_match"], 90);

    assert_eq!(rows[1]["total_pins"], 85);
}

#[actix_web::test]
async fn team_stats_project_the_table() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 1).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/result"))
        .insert_header(common::bearer(&admin))
        .set_json(flat_hand_sheet(&league, 17, 18))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/stats/teams?division={}", league.division_id))
        .to_request();
    let rows: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(rows[0]["team_id"].as_i64(), Some(league.away_team_id));
    assert_eq!(rows[0]["average_per_match"], 90.0);
    assert_eq!(rows[1]["average_per_match"], 85.0);
}

#[actix_web::test]
async fn events_crud_and_upcoming_ordering() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    // Far-future dates keep these in the "upcoming" window.
    let later = json!({
        "title": "Annual Dinner",
        "starts_at": "2099-11-20T19:00:00Z",
        "venue": "The Clubhouse"
    });
    let sooner = json!({
        "title": "Committee Meeting",
        "starts_at": "2099-01-05T19:30:00Z"
    });

    for payload in [&later, &sooner] {
        let req = test::TestRequest::post()
            .uri("/api/events")
            .insert_header(common::bearer(&admin))
            .set_json(payload)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get().uri("/api/events").to_request();
    let events: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "Committee Meeting");
    assert_eq!(events[1]["title"], "Annual Dinner");

    // Update then delete the first event.
    let event_id = events[0]["id"].as_i64().unwrap();
    let req = test::TestRequest::patch()
        .uri(&format!("/api/events/{event_id}"))
        .insert_header(common::bearer(&admin))
        .set_json(json!({ "title": "EGM", "venue": "Back Room" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["title"], "EGM");
    assert_eq!(updated["venue"], "Back Room");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/events/{event_id}"))
        .insert_header(common::bearer(&admin))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get().uri("/api/events").to_request();
    let events: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(events.len(), 1);
}

#[actix_web::test]
async fn event_creation_requires_admin() {
    let state = common::test_state().await;
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let user = common::register_user(&app, &unique_email("user"), "correct horse battery staple").await;

    let req = test::TestRequest::post()
        .uri("/api/events")
        .insert_header(common::bearer(&user))
        .set_json(json!({ "title": "Rogue Event", "starts_at": "2099-01-01T12:00:00Z" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}
