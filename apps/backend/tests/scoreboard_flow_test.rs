//! Live scoreboard flow: open, key input, stale writers, close.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use backend_test_support::unique_helpers::unique_email;
use common::league::{schedule_fixture, seed_league};
use serde_json::json;

fn digit(value: u8) -> serde_json::Value {
    json!({ "key": "digit", "value": value })
}

fn commit() -> serde_json::Value {
    json!({ "key": "commit" })
}

#[actix_web::test]
async fn open_board_precomputes_the_turn_sequence() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 2).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/scoreboard"))
        .insert_header(common::bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let board: serde_json::Value = test::read_body_json(resp).await;
    let sequence = board["sequence"].as_array().unwrap();

    // Two players per side, five hands each: 20 turns.
    assert_eq!(sequence.len(), 20);
    assert_eq!(board["cursor"], 0);
    assert_eq!(board["complete"], false);

    // Hand 1 starts home and interleaves; hand 2 starts away.
    assert_eq!(sequence[0]["side"], "home");
    assert_eq!(sequence[1]["side"], "away");
    assert_eq!(sequence[4]["side"], "away");

    // The match is now live.
    let req = test::TestRequest::get()
        .uri(&format!("/api/matches/{match_id}"))
        .to_request();
    let fixture: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(fixture["status"], "in_progress");
}

#[actix_web::test]
async fn key_input_commits_scores_and_advances() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 1).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/scoreboard"))
        .insert_header(common::bearer(&admin))
        .to_request();
    let board: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let lock_version = board["lock_version"].as_i64().unwrap();

    // Type "1", "7", commit: first turn scores 17.
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/scoreboard/input"))
        .insert_header(common::bearer(&admin))
        .set_json(json!({
            "lock_version": lock_version,
            "keys": [digit(1), digit(7), commit()]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let board: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(board["entries"][0], 17);
    assert_eq!(board["cursor"], 1);
    assert_eq!(board["home_total"], 17);
    assert_eq!(board["away_total"], 0);
}

#[actix_web::test]
async fn stale_lock_version_conflicts() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 1).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/scoreboard"))
        .insert_header(common::bearer(&admin))
        .to_request();
    let board: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let lock_version = board["lock_version"].as_i64().unwrap();

    // First writer wins.
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/scoreboard/input"))
        .insert_header(common::bearer(&admin))
        .set_json(json!({ "lock_version": lock_version, "keys": [digit(9), commit()] }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Second writer with the stale version is told to resync.
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/scoreboard/input"))
        .insert_header(common::bearer(&admin))
        .set_json(json!({ "lock_version": lock_version, "keys": [digit(5), commit()] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn closing_a_complete_board_records_the_result() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 1).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/scoreboard"))
        .insert_header(common::bearer(&admin))
        .to_request();
    let board: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let mut lock_version = board["lock_version"].as_i64().unwrap();
    let sides: Vec<String> = board["sequence"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["side"].as_str().unwrap().to_string())
        .collect();

    // Closing early is rejected.
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/scoreboard/close"))
        .insert_header(common::bearer(&admin))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    // Score every turn in sequence order: home hands 9, away hands 7.
    for side in &sides {
        let pins = if side == "home" { 9 } else { 7 };
        let req = test::TestRequest::post()
            .uri(&format!("/api/matches/{match_id}/scoreboard/input"))
            .insert_header(common::bearer(&admin))
            .set_json(json!({ "lock_version": lock_version, "keys": [digit(pins), commit()] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let board: serde_json::Value = test::read_body_json(resp).await;
        lock_version = board["lock_version"].as_i64().unwrap();
    }

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/scoreboard/close"))
        .insert_header(common::bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let fixture: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(fixture["status"], "completed");
    assert_eq!(fixture["home_score"], 45);
    assert_eq!(fixture["away_score"], 35);

    // Standings picked up the result.
    let req = test::TestRequest::get()
        .uri(&format!("/api/standings?division={}", league.division_id))
        .to_request();
    let table: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    let home = table
        .iter()
        .find(|r| r["team_id"].as_i64() == Some(league.home_team_id))
        .unwrap();
    assert_eq!(home["won"], 1);
    assert_eq!(home["points"], 2);
    assert_eq!(home["max_score"], 45);

    // The board is gone once the match completes.
    let req = test::TestRequest::get()
        .uri(&format!("/api/matches/{match_id}/scoreboard"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn hand_one_alternates_sides_across_rosters() {
    let state = common::test_state().await;
    let db = state.db().unwrap().clone();
    let app = test::init_service(common::build_app(web::Data::new(state))).await;
    let admin = common::register_admin(&app, &db, &unique_email("admin")).await;

    let league = seed_league(&app, &admin, 3).await;
    let match_id = schedule_fixture(&app, &admin, &league).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/scoreboard"))
        .insert_header(common::bearer(&admin))
        .to_request();
    let board: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let sequence = board["sequence"].as_array().unwrap();

    // First six turns cover hand 1 for all six players, alternating sides.
    let hand_one: Vec<&str> = sequence[..6]
        .iter()
        .map(|t| t["side"].as_str().unwrap())
        .collect();
    assert_eq!(hand_one, ["home", "away", "home", "away", "home", "away"]);
    assert!(sequence[..6].iter().all(|t| t["hand_no"] == 1));
}
