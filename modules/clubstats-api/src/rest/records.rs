use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use clubstats_common::{MatchFilter, MatchResult, Page, StatsError};

use super::parse_id;
use crate::error::ApiError;
use crate::AppState;

// --- Query structs ---

#[derive(Deserialize)]
pub struct MatchesQuery {
    limit: Option<i64>,
    offset: Option<i64>,
    result: Option<String>,
    tournament: Option<String>,
}

#[derive(Deserialize)]
pub struct PlayersQuery {
    limit: Option<i64>,
    offset: Option<i64>,
}

impl MatchesQuery {
    fn into_filter(self) -> Result<MatchFilter, ApiError> {
        let result = self
            .result
            .as_deref()
            .map(str::parse::<MatchResult>)
            .transpose()
            .map_err(StatsError::Validation)?;
        let tournament_id = self
            .tournament
            .as_deref()
            .map(|raw| parse_id(raw, "Tournament"))
            .transpose()?;
        Ok(MatchFilter {
            result,
            tournament_id,
            page: Page::clamped(self.limit, self.offset, 20, 100),
        })
    }
}

// --- Handlers ---

pub async fn api_matches(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MatchesQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filter = params.into_filter()?;
    let matches = state
        .store
        .list_matches(&filter)
        .await
        .map_err(StatsError::store)?;
    Ok(Json(serde_json::json!({ "matches": matches })))
}

pub async fn api_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlayersQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = Page::clamped(params.limit, params.offset, 50, 200);
    let players = state
        .store
        .list_players(page)
        .await
        .map_err(StatsError::store)?;
    Ok(Json(serde_json::json!({ "players": players })))
}

pub async fn api_tournaments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tournaments = state
        .store
        .list_tournaments()
        .await
        .map_err(StatsError::store)?;
    Ok(Json(serde_json::json!({ "tournaments": tournaments })))
}
