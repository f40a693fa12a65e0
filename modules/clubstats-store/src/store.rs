use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use clubstats_common::{
    AppearanceWithPlayer, DatedGoals, MatchFilter, MatchTotals, MatchWithTournament, Page,
    Player, PlayerGoals, ResultCount, Tournament, TournamentResult,
};

/// Read-only query surface over matches, appearances, players and tournaments.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Group-by over match results. Categories without matches may be absent.
    async fn count_matches_by_result(&self) -> Result<Vec<ResultCount>>;

    /// Match count plus summed `our_score` / `their_score`.
    async fn match_totals(&self) -> Result<MatchTotals>;

    /// Appearance goals summed per player, in the store's natural order.
    async fn goals_by_player(&self) -> Result<Vec<PlayerGoals>>;

    async fn find_player(&self, id: Uuid) -> Result<Option<Player>>;

    /// The `limit` most recent matches, newest first.
    async fn recent_matches(&self, limit: i64) -> Result<Vec<MatchWithTournament>>;

    /// One row per appearance: its goals and the date of its match.
    async fn appearance_goals(&self) -> Result<Vec<DatedGoals>>;

    /// One row per match: its result and tournament.
    async fn match_results(&self) -> Result<Vec<TournamentResult>>;

    async fn find_match(&self, id: Uuid) -> Result<Option<MatchWithTournament>>;

    async fn match_appearances(&self, match_id: Uuid) -> Result<Vec<AppearanceWithPlayer>>;

    /// Matches newest first, filtered and paginated.
    async fn list_matches(&self, filter: &MatchFilter) -> Result<Vec<MatchWithTournament>>;

    /// Players ordered by full name.
    async fn list_players(&self, page: Page) -> Result<Vec<Player>>;

    /// Tournaments ordered by name.
    async fn list_tournaments(&self) -> Result<Vec<Tournament>>;
}
