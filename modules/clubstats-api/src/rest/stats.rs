use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use clubstats_stats::{ChartData, ChartKind, MatchDetail, OverallSummary};

use super::parse_id;
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct ChartQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Never fails: a store outage yields the empty summary.
pub async fn api_overall_summary(State(state): State<Arc<AppState>>) -> Json<OverallSummary> {
    Json(state.engine.overall_summary().await)
}

pub async fn api_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChartQuery>,
) -> Result<Json<ChartData>, ApiError> {
    let kind = ChartKind::from_selector(params.kind.as_deref())?;
    Ok(Json(state.engine.chart(kind).await?))
}

pub async fn api_match_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MatchDetail>, ApiError> {
    let id = parse_id(&id, "Match")?;
    Ok(Json(state.engine.match_detail(id).await?))
}
