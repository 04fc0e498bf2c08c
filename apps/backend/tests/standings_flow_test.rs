//! End-to-end league flow: schedule, record, correct, and read the table.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use backend_test_support::unique_helpers::unique_email;
use common::league::{flat_hand_sheet, schedule_fixture, seed_league};
use serde_json::json;

/// Row lookup by team id in a standings response.
fn row<'a>(table: &'a [serde_json::Value], team_id: i64) -> &'a serde_json::Value {
    table
        .iter()
        .find(|r| r["team_id"].as_i64() == Some(team_id))
        .expect("team row present")
}

#[actix_web::test]
async fn recorded_result_updates_the_table() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 1).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    // Home 17x5 = 85, away 18x5 = 90: away wins.
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/result"))
        .insert_header(common::bearer(&admin))
        .set_json(flat_hand_sheet(&league, 17, 18))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/standings?division={}", league.division_id))
        .to_request();
    let table: Vec<serde_json::Value> = test::read_body_json(test::call_service(&app, req).await).await;

    let home = row(&table, league.home_team_id);
    assert_eq!(home["played"], 1);
    assert_eq!(home["lost"], 1);
    assert_eq!(home["points"], 0);
    assert_eq!(home["pins_for"], 85);
    assert_eq!(home["max_score"], 85);

    let away = row(&table, league.away_team_id);
    assert_eq!(away["played"], 1);
    assert_eq!(away["won"], 1);
    assert_eq!(away["points"], 2);
    assert_eq!(away["pins_for"], 90);
    assert_eq!(away["max_score"], 90);

    // Winner sorts first.
    assert_eq!(table[0]["team_id"].as_i64(), Some(league.away_team_id));
}

#[actix_web::test]
async fn correction_reverts_then_reapplies_atomically() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 1).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    // Originally mis-keyed as a big home win (18x5=90 vs 12x5=60).
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/result"))
        .insert_header(common::bearer(&admin))
        .set_json(flat_hand_sheet(&league, 18, 12))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Corrected to an away win (14x5=70 vs 16x5=80).
    let req = test::TestRequest::put()
        .uri(&format!("/api/matches/{match_id}/result"))
        .insert_header(common::bearer(&admin))
        .set_json(flat_hand_sheet(&league, 14, 16))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/standings?division={}", league.division_id))
        .to_request();
    let table: Vec<serde_json::Value> = test::read_body_json(test::call_service(&app, req).await).await;

    let home = row(&table, league.home_team_id);
    assert_eq!(home["played"], 1);
    assert_eq!(home["won"], 0);
    assert_eq!(home["lost"], 1);
    assert_eq!(home["points"], 0);
    assert_eq!(home["pins_for"], 70);
    // The phantom 90 from the mis-keyed result is gone after the rescan.
    assert_eq!(home["max_score"], 70);

    let away = row(&table, league.away_team_id);
    assert_eq!(away["points"], 2);
    assert_eq!(away["pins_for"], 80);
    assert_eq!(away["max_score"], 80);
}

#[actix_web::test]
async fn draw_gives_both_sides_a_point() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 1).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/result"))
        .insert_header(common::bearer(&admin))
        .set_json(flat_hand_sheet(&league, 15, 15))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/standings?division={}", league.division_id))
        .to_request();
    let table: Vec<serde_json::Value> = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(row(&table, league.home_team_id)["points"], 1);
    assert_eq!(row(&table, league.away_team_id)["points"], 1);
    assert_eq!(row(&table, league.home_team_id)["drawn"], 1);
}

#[actix_web::test]
async fn standings_etag_supports_not_modified() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 1).await;
    let uri = format!("/api/standings?division={}", league.division_id);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let etag = resp
        .headers()
        .get("etag")
        .expect("etag header")
        .to_str()
        .unwrap()
        .to_string();

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("If-None-Match", etag.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
}

#[actix_web::test]
async fn recompute_rebuilds_the_same_table() {
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

    let before_uri = format!("/api/standings?division={}", league.division_id);
    let before: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, test::TestRequest::get().uri(&before_uri).to_request()).await)
            .await;

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/standings/recompute?division={}",
            league.division_id
        ))
        .insert_header(common::bearer(&admin))
        .to_request();
    let rebuilt: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(before, rebuilt);
}

#[actix_web::test]
async fn invalid_hand_sheet_is_rejected() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 1).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    // 19 pins is beyond two throws of nine.
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/result"))
        .insert_header(common::bearer(&admin))
        .set_json(flat_hand_sheet(&league, 19, 10))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Non-admins cannot record results at all.
    let user = common::register_user(&app, &unique_email("user"), "correct horse battery staple").await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/result"))
        .insert_header(common::bearer(&user))
        .set_json(flat_hand_sheet(&league, 10, 10))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
