use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use clubstats_common::{
    Appearance, AppearanceWithPlayer, DatedGoals, Match, MatchFilter, MatchResult, MatchTotals,
    MatchWithTournament, Page, Player, PlayerGoals, ResultCount, Tournament, TournamentResult,
};

use crate::store::RecordStore;

const MATCH_SELECT: &str = r#"
    SELECT m.id, m.played_at, m.opponent, m.location, m.our_score, m.their_score,
           m.result, m.notes, m.tournament_id,
           t.name AS tournament_name, t.organizer AS tournament_organizer
    FROM matches m
    LEFT JOIN tournaments t ON t.id = m.tournament_id
"#;

#[derive(sqlx::FromRow)]
struct MatchRow {
    id: Uuid,
    played_at: DateTime<Utc>,
    opponent: String,
    location: String,
    our_score: i32,
    their_score: i32,
    result: String,
    notes: Option<String>,
    tournament_id: Option<Uuid>,
    tournament_name: Option<String>,
    tournament_organizer: Option<String>,
}

impl TryFrom<MatchRow> for MatchWithTournament {
    type Error = anyhow::Error;

    fn try_from(row: MatchRow) -> Result<Self> {
        let tournament = match (row.tournament_id, row.tournament_name) {
            (Some(id), Some(name)) => Some(Tournament {
                id,
                name,
                organizer: row.tournament_organizer,
            }),
            _ => None,
        };
        Ok(Self {
            record: Match {
                id: row.id,
                date: row.played_at,
                opponent: row.opponent,
                location: row.location,
                our_score: row.our_score,
                their_score: row.their_score,
                result: parse_result(&row.result)?,
                notes: row.notes,
                tournament_id: row.tournament_id,
            },
            tournament,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AppearanceRow {
    id: Uuid,
    match_id: Uuid,
    player_id: Uuid,
    starter: bool,
    goals: i32,
    assists: Option<i32>,
    yellow_card: bool,
    red_card: bool,
    rating: Option<f64>,
    full_name: String,
}

impl From<AppearanceRow> for AppearanceWithPlayer {
    fn from(row: AppearanceRow) -> Self {
        Self {
            appearance: Appearance {
                id: row.id,
                match_id: row.match_id,
                player_id: row.player_id,
                starter: row.starter,
                goals: row.goals,
                assists: row.assists,
                yellow_card: row.yellow_card,
                red_card: row.red_card,
                rating: row.rating,
            },
            player: Player {
                id: row.player_id,
                full_name: row.full_name,
            },
        }
    }
}

fn parse_result(raw: &str) -> Result<MatchResult> {
    raw.parse().map_err(anyhow::Error::msg)
}

fn into_matches(rows: Vec<MatchRow>) -> Result<Vec<MatchWithTournament>> {
    rows.into_iter().map(MatchWithTournament::try_from).collect()
}

/// Postgres-backed record store.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to Postgres")?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn count_matches_by_result(&self) -> Result<Vec<ResultCount>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT result, COUNT(*) FROM matches GROUP BY result",
        )
        .fetch_all(&self.pool)
        .await
        .context("counting matches by result")?;

        rows.into_iter()
            .map(|(result, count)| -> Result<ResultCount> {
                Ok(ResultCount {
                    result: parse_result(&result)?,
                    count,
                })
            })
            .collect()
    }

    async fn match_totals(&self) -> Result<MatchTotals> {
        let (matches, goals_for, goals_against) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(our_score), 0)::BIGINT,
                   COALESCE(SUM(their_score), 0)::BIGINT
            FROM matches
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .context("summing match totals")?;

        Ok(MatchTotals {
            matches,
            goals_for,
            goals_against,
        })
    }

    async fn goals_by_player(&self) -> Result<Vec<PlayerGoals>> {
        let rows = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT player_id, COALESCE(SUM(goals), 0)::BIGINT
            FROM appearances
            GROUP BY player_id
            ORDER BY player_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("summing goals by player")?;

        Ok(rows
            .into_iter()
            .map(|(player_id, goals)| PlayerGoals { player_id, goals })
            .collect())
    }

    async fn find_player(&self, id: Uuid) -> Result<Option<Player>> {
        let row = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, full_name FROM players WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("loading player")?;

        Ok(row.map(|(id, full_name)| Player { id, full_name }))
    }

    async fn recent_matches(&self, limit: i64) -> Result<Vec<MatchWithTournament>> {
        let sql = format!("{MATCH_SELECT} ORDER BY m.played_at DESC, m.id DESC LIMIT $1");
        let rows = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("loading recent matches")?;
        into_matches(rows)
    }

    async fn appearance_goals(&self) -> Result<Vec<DatedGoals>> {
        let rows = sqlx::query_as::<_, (DateTime<Utc>, i64)>(
            r#"
            SELECT m.played_at, a.goals::BIGINT
            FROM appearances a
            JOIN matches m ON m.id = a.match_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("loading appearance goals")?;

        Ok(rows
            .into_iter()
            .map(|(date, goals)| DatedGoals { date, goals })
            .collect())
    }

    async fn match_results(&self) -> Result<Vec<TournamentResult>> {
        let rows = sqlx::query_as::<_, (String, Option<Uuid>, Option<String>, Option<String>)>(
            r#"
            SELECT m.result, t.id, t.name, t.organizer
            FROM matches m
            LEFT JOIN tournaments t ON t.id = m.tournament_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("loading match results")?;

        rows.into_iter()
            .map(|(result, id, name, organizer)| -> Result<TournamentResult> {
                let tournament = match (id, name) {
                    (Some(id), Some(name)) => Some(Tournament {
                        id,
                        name,
                        organizer,
                    }),
                    _ => None,
                };
                Ok(TournamentResult {
                    tournament,
                    result: parse_result(&result)?,
                })
            })
            .collect()
    }

    async fn find_match(&self, id: Uuid) -> Result<Option<MatchWithTournament>> {
        let sql = format!("{MATCH_SELECT} WHERE m.id = $1");
        let row = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("loading match")?;
        row.map(MatchWithTournament::try_from).transpose()
    }

    async fn match_appearances(&self, match_id: Uuid) -> Result<Vec<AppearanceWithPlayer>> {
        let rows = sqlx::query_as::<_, AppearanceRow>(
            r#"
            SELECT a.id, a.match_id, a.player_id, a.starter, a.goals, a.assists,
                   a.yellow_card, a.red_card, a.rating, p.full_name
            FROM appearances a
            JOIN players p ON p.id = a.player_id
            WHERE a.match_id = $1
            ORDER BY a.starter DESC, p.full_name ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await
        .context("loading match appearances")?;

        Ok(rows.into_iter().map(AppearanceWithPlayer::from).collect())
    }

    async fn list_matches(&self, filter: &MatchFilter) -> Result<Vec<MatchWithTournament>> {
        let mut qb = sqlx::QueryBuilder::<sqlx::Postgres>::new(MATCH_SELECT);
        qb.push(" WHERE TRUE ");
        if let Some(result) = filter.result {
            qb.push("AND m.result = ");
            qb.push_bind(result.as_str());
            qb.push(" ");
        }
        if let Some(tournament_id) = filter.tournament_id {
            qb.push("AND m.tournament_id = ");
            qb.push_bind(tournament_id);
            qb.push(" ");
        }
        qb.push("ORDER BY m.played_at DESC, m.id DESC LIMIT ");
        qb.push_bind(filter.page.limit);
        qb.push(" OFFSET ");
        qb.push_bind(filter.page.offset);

        let rows = qb
            .build_query_as::<MatchRow>()
            .fetch_all(&self.pool)
            .await
            .context("listing matches")?;
        into_matches(rows)
    }

    async fn list_players(&self, page: Page) -> Result<Vec<Player>> {
        let rows = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, full_name FROM players ORDER BY full_name ASC, id ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .context("listing players")?;

        Ok(rows
            .into_iter()
            .map(|(id, full_name)| Player { id, full_name })
            .collect())
    }

    async fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        let rows = sqlx::query_as::<_, (Uuid, String, Option<String>)>(
            "SELECT id, name, organizer FROM tournaments ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("listing tournaments")?;

        Ok(rows
            .into_iter()
            .map(|(id, name, organizer)| Tournament {
                id,
                name,
                organizer,
            })
            .collect())
    }
}
