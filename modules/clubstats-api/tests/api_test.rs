//! HTTP-level tests: the real router over an in-memory record store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use clubstats_api::{build_router, AppState};
use clubstats_common::{Appearance, Match, MatchResult, Player, Tournament};
use clubstats_store::{InMemoryStore, Records};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

const CUP: u128 = 500;

fn at(ts: &str) -> DateTime<Utc> {
    ts.parse().unwrap()
}

fn fixture(n: u128, date: &str, score: (i32, i32), tournament: Option<u128>) -> Match {
    Match {
        id: Uuid::from_u128(n),
        date: at(date),
        opponent: format!("Opponent {n}"),
        location: "Riverside Park".to_string(),
        our_score: score.0,
        their_score: score.1,
        result: MatchResult::from_scores(score.0, score.1),
        notes: Some("League fixture".to_string()),
        tournament_id: tournament.map(Uuid::from_u128),
    }
}

fn appearance(match_n: u128, player_n: u128, starter: bool, goals: i32, yellow: bool) -> Appearance {
    Appearance {
        id: Uuid::new_v4(),
        match_id: Uuid::from_u128(match_n),
        player_id: Uuid::from_u128(player_n),
        starter,
        goals,
        assists: Some(1),
        yellow_card: yellow,
        red_card: false,
        rating: Some(7.0),
    }
}

fn season() -> Records {
    Records {
        tournaments: vec![Tournament {
            id: Uuid::from_u128(CUP),
            name: "County Cup".to_string(),
            organizer: None,
        }],
        players: vec![
            Player {
                id: Uuid::from_u128(100),
                full_name: "Ana Silva".to_string(),
            },
            Player {
                id: Uuid::from_u128(200),
                full_name: "Ben Okafor".to_string(),
            },
        ],
        matches: vec![
            fixture(1, "2025-01-11T15:00:00Z", (3, 1), Some(CUP)),
            fixture(2, "2025-01-25T15:00:00Z", (1, 2), None),
            fixture(3, "2025-02-08T15:00:00Z", (0, 0), Some(CUP)),
        ],
        appearances: vec![
            appearance(1, 100, false, 2, false),
            appearance(1, 200, true, 1, true),
            appearance(2, 100, true, 1, false),
        ],
    }
}

fn app(records: Records) -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new(records));
    let state = Arc::new(AppState::new(store.clone()));
    (build_router(state, &[]), store)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn health_check_responds_ok() {
    let (app, _) = app(Records::default());
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "no-store"
    );
}

#[tokio::test]
async fn summary_endpoint_shapes_json() {
    let (app, _) = app(season());
    let (status, body) = get(&app, "/api/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalMatches"], 3);
    assert_eq!(body["wdl"], serde_json::json!({ "wins": 1, "draws": 1, "losses": 1 }));
    assert_eq!(body["goalsFor"], 4);
    assert_eq!(body["goalsAgainst"], 3);
    assert_eq!(body["topScorer"], "Ana Silva (3)");
    assert_eq!(body["streak"], serde_json::json!(["WIN", "LOSS", "DRAW"]));
    assert_eq!(body["last5Matches"][0]["result"], "DRAW");
    assert_eq!(body["last5Matches"][0]["tournament"]["name"], "County Cup");
    assert_eq!(body["last5Matches"][2]["ourScore"], 3);
}

#[tokio::test]
async fn summary_endpoint_survives_store_outage() {
    let (app, store) = app(season());
    store.set_unavailable(true);
    let (status, body) = get(&app, "/api/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalMatches"], 0);
    assert!(body["topScorer"].is_null());
    assert_eq!(body["streak"], serde_json::json!([]));
    assert_eq!(body["last5Matches"], serde_json::json!([]));
}

#[tokio::test]
async fn charts_default_to_goals_by_month() {
    let (app, _) = app(season());
    let (status, body) = get(&app, "/api/stats/charts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([{ "month": "Jan 2025", "key": "2025-01", "goals": 4 }])
    );
}

#[tokio::test]
async fn charts_results_by_season() {
    let (app, _) = app(season());
    let (status, body) = get(&app, "/api/stats/charts?type=results-by-season").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            { "tournament": "County Cup", "wins": 1, "draws": 1, "losses": 0 },
            { "tournament": "No tournament", "wins": 0, "draws": 0, "losses": 1 },
        ])
    );
}

#[tokio::test]
async fn charts_reject_unknown_type() {
    let (app, _) = app(season());
    let (status, body) = get(&app, "/api/stats/charts?type=assists").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn charts_report_store_outage_as_server_error() {
    let (app, store) = app(season());
    store.set_unavailable(true);
    let (status, body) = get(&app, "/api/stats/charts?type=results-by-season").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "store_unavailable");
}

#[tokio::test]
async fn match_detail_includes_lineup_and_stats() {
    let (app, _) = app(season());
    let uri = format!("/api/matches/{}", Uuid::from_u128(1));
    let (status, body) = get(&app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"]["opponent"], "Opponent 1");
    assert_eq!(body["match"]["tournament"]["name"], "County Cup");
    // Starter first, then substitutes.
    assert_eq!(body["match"]["appearances"][0]["player"]["fullName"], "Ben Okafor");
    assert_eq!(body["match"]["appearances"][1]["player"]["fullName"], "Ana Silva");
    assert_eq!(
        body["stats"],
        serde_json::json!({
            "totalGoals": 3,
            "totalAssists": 2,
            "totalYellowCards": 1,
            "totalRedCards": 0,
            "averageRating": 7.0,
        })
    );
}

#[tokio::test]
async fn match_detail_unknown_id_is_404() {
    let (app, _) = app(season());
    let uri = format!("/api/matches/{}", Uuid::from_u128(404));
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn match_detail_malformed_id_is_400() {
    let (app, _) = app(season());
    let (status, body) = get(&app, "/api/matches/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn match_listing_filters_by_result_and_tournament() {
    let (app, _) = app(season());

    let (status, body) = get(&app, "/api/matches?result=WIN").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches"].as_array().unwrap().len(), 1);

    let uri = format!("/api/matches?tournament={}&limit=1", Uuid::from_u128(CUP));
    let (_, body) = get(&app, &uri).await;
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["id"], Uuid::from_u128(3).to_string());

    let (status, _) = get(&app, "/api/matches?result=forfeit").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn player_and_tournament_listings() {
    let (app, _) = app(season());

    let (status, body) = get(&app, "/api/players?limit=1&offset=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["players"][0]["fullName"], "Ben Okafor");

    let (status, body) = get(&app, "/api/tournaments").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tournaments"][0]["name"], "County Cup");
}
