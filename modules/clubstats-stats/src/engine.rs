use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use clubstats_common::StatsError;
use clubstats_store::RecordStore;

use crate::charts::{self, ChartData, ChartKind, MonthlyGoals, TournamentResults};
use crate::detail::MatchDetail;
use crate::summary::{self, OverallSummary, STREAK_LENGTH};

/// Stateless aggregation over a shared record store. Cheap to clone.
#[derive(Clone)]
pub struct StatsEngine {
    store: Arc<dyn RecordStore>,
}

impl StatsEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Headline dashboard numbers. A failing store yields the empty summary
    /// instead of an error so the dashboard can always render.
    pub async fn overall_summary(&self) -> OverallSummary {
        match self.try_overall_summary().await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Overall summary unavailable, serving empty summary");
                OverallSummary::default()
            }
        }
    }

    pub async fn try_overall_summary(&self) -> Result<OverallSummary, StatsError> {
        let (counts, totals, player_goals, recent) = tokio::try_join!(
            self.store.count_matches_by_result(),
            self.store.match_totals(),
            self.store.goals_by_player(),
            self.store.recent_matches(STREAK_LENGTH as i64),
        )
        .map_err(StatsError::store)?;

        let top_scorer = match summary::pick_top_scorer(&player_goals) {
            Some(top) => self
                .store
                .find_player(top.player_id)
                .await
                .map_err(StatsError::store)?
                .map(|p| summary::format_top_scorer(&p.full_name, top.goals)),
            None => None,
        };

        debug!(
            matches = totals.matches,
            recent = recent.len(),
            "Computed overall summary"
        );
        Ok(OverallSummary::assemble(&counts, totals, top_scorer, recent))
    }

    pub async fn goals_by_month(&self) -> Result<Vec<MonthlyGoals>, StatsError> {
        let rows = self
            .store
            .appearance_goals()
            .await
            .map_err(StatsError::store)?;
        Ok(charts::goals_by_month(&rows))
    }

    pub async fn results_by_tournament(&self) -> Result<Vec<TournamentResults>, StatsError> {
        let rows = self
            .store
            .match_results()
            .await
            .map_err(StatsError::store)?;
        Ok(charts::results_by_tournament(&rows))
    }

    pub async fn chart(&self, kind: ChartKind) -> Result<ChartData, StatsError> {
        match kind {
            ChartKind::GoalsByMonth => self.goals_by_month().await.map(ChartData::GoalsByMonth),
            ChartKind::ResultsBySeason => self
                .results_by_tournament()
                .await
                .map(ChartData::ResultsBySeason),
        }
    }

    pub async fn match_detail(&self, id: Uuid) -> Result<MatchDetail, StatsError> {
        let fixture = self
            .store
            .find_match(id)
            .await
            .map_err(StatsError::store)?
            .ok_or_else(|| StatsError::not_found("Match", id))?;

        let appearances = self
            .store
            .match_appearances(id)
            .await
            .map_err(StatsError::store)?;

        Ok(MatchDetail::new(fixture, appearances))
    }
}
