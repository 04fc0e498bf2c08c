//! League seeding helpers driven through the public API.

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use backend_test_support::unique_helpers::unique_str;
use serde_json::json;

use super::bearer;

pub struct League {
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_players: Vec<i64>,
    pub away_players: Vec<i64>,
}

async fn post_json<S>(app: &S, token: &str, uri: &str, body: serde_json::Value) -> serde_json::Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .insert_header(bearer(token))
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    assert!(
        status.is_success(),
        "POST {uri} failed with {status}: {:?}",
        test::read_body(resp).await
    );
    test::read_body_json(resp).await
}

/// Season -> division -> two teams with `players_per_side` players each.
pub async fn seed_league<S>(app: &S, admin_token: &str, players_per_side: usize) -> League
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let season = post_json(
        app,
        admin_token,
        "/api/seasons",
        json!({
            "name": unique_str("season"),
            "starts_on": "2025-09-01",
            "ends_on": "2026-04-30"
        }),
    )
    .await;

    let division = post_json(
        app,
        admin_token,
        "/api/divisions",
        json!({ "season_id": season["id"], "name": "Division One" }),
    )
    .await;
    let division_id = division["id"].as_i64().unwrap();

    let mut team_ids = Vec::new();
    for _ in 0..2 {
        let team = post_json(
            app,
            admin_token,
            "/api/teams",
            json!({ "division_id": division_id, "name": unique_str("team") }),
        )
        .await;
        team_ids.push(team["id"].as_i64().unwrap());
    }

    let mut rosters: Vec<Vec<i64>> = Vec::new();
    for &team_id in &team_ids {
        let mut roster = Vec::new();
        for position in 0..players_per_side {
            let player = post_json(
                app,
                admin_token,
                "/api/players",
                json!({
                    "display_name": unique_str("player"),
                    "team_id": team_id,
                    "position": position,
                    "contact": { "email": null, "phone": null, "address": null }
                }),
            )
            .await;
            roster.push(player["id"].as_i64().unwrap());
        }
        rosters.push(roster);
    }

    let away_players = rosters.pop().unwrap();
    let home_players = rosters.pop().unwrap();

    League {
        division_id,
        home_team_id: team_ids[0],
        away_team_id: team_ids[1],
        home_players,
        away_players,
    }
}

/// Schedule a fixture between the league's two teams.
pub async fn schedule_fixture<S>(app: &S, admin_token: &str, league: &League) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let fixture = post_json(
        app,
        admin_token,
        "/api/matches",
        json!({
            "division_id": league.division_id,
            "home_team_id": league.home_team_id,
            "away_team_id": league.away_team_id,
            "scheduled_at": "2025-10-03T19:30:00Z",
            "venue": "The Clubhouse"
        }),
    )
    .await;
    fixture["id"].as_i64().unwrap()
}

/// A full five-hand sheet giving each side a flat per-hand score.
pub fn flat_hand_sheet(league: &League, home_pins: i16, away_pins: i16) -> serde_json::Value {
    let mut hands = Vec::new();
    for &player_id in &league.home_players {
        for hand_no in 1..=5 {
            hands.push(json!({
                "player_id": player_id,
                "side": "home",
                "hand_no": hand_no,
                "pins": home_pins
            }));
        }
    }
    for &player_id in &league.away_players {
        for hand_no in 1..=5 {
            hands.push(json!({
                "player_id": player_id,
                "side": "away",
                "hand_no": hand_no,
                "pins": away_pins
            }));
        }
    }
    json!({ "hands": hands })
}
