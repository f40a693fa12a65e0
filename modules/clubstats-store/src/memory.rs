use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use uuid::Uuid;

use clubstats_common::{
    Appearance, AppearanceWithPlayer, DatedGoals, Match, MatchFilter, MatchResult, MatchTotals,
    MatchWithTournament, Page, Player, PlayerGoals, ResultCount, Tournament, TournamentResult,
};

use crate::store::RecordStore;

/// A fixed snapshot of records. Vec order is the store's natural order.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub tournaments: Vec<Tournament>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    pub appearances: Vec<Appearance>,
}

/// In-memory record store for tests and local demos.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Records,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new(records: Records) -> Self {
        for m in &records.matches {
            if !m.result_matches_score() {
                tracing::warn!(
                    match_id = %m.id,
                    result = %m.result,
                    score = %format!("{}-{}", m.our_score, m.their_score),
                    "Stored result disagrees with scoreline"
                );
            }
        }
        Self {
            records,
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent query fail, simulating an outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("record store is unavailable");
        }
        Ok(())
    }

    fn tournament(&self, id: Option<Uuid>) -> Option<Tournament> {
        let id = id?;
        self.records.tournaments.iter().find(|t| t.id == id).cloned()
    }

    fn with_tournament(&self, m: &Match) -> MatchWithTournament {
        MatchWithTournament {
            record: m.clone(),
            tournament: self.tournament(m.tournament_id),
        }
    }

    fn newest_first(&self) -> Vec<&Match> {
        let mut matches: Vec<&Match> = self.records.matches.iter().collect();
        matches.sort_by_key(|m| Reverse((m.date, m.id)));
        matches
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn count_matches_by_result(&self) -> Result<Vec<ResultCount>> {
        self.check_available()?;
        let mut counts: Vec<ResultCount> = Vec::new();
        for m in &self.records.matches {
            match counts.iter_mut().find(|c| c.result == m.result) {
                Some(c) => c.count += 1,
                None => counts.push(ResultCount {
                    result: m.result,
                    count: 1,
                }),
            }
        }
        Ok(counts)
    }

    async fn match_totals(&self) -> Result<MatchTotals> {
        self.check_available()?;
        Ok(self
            .records
            .matches
            .iter()
            .fold(MatchTotals::default(), |acc, m| MatchTotals {
                matches: acc.matches + 1,
                goals_for: acc.goals_for + i64::from(m.our_score),
                goals_against: acc.goals_against + i64::from(m.their_score),
            }))
    }

    async fn goals_by_player(&self) -> Result<Vec<PlayerGoals>> {
        self.check_available()?;
        let mut order: Vec<Uuid> = Vec::new();
        let mut sums: HashMap<Uuid, i64> = HashMap::new();
        for a in &self.records.appearances {
            let sum = sums.entry(a.player_id).or_insert_with(|| {
                order.push(a.player_id);
                0
            });
            *sum += i64::from(a.goals);
        }
        Ok(order
            .into_iter()
            .map(|player_id| PlayerGoals {
                player_id,
                goals: sums.get(&player_id).copied().unwrap_or(0),
            })
            .collect())
    }

    async fn find_player(&self, id: Uuid) -> Result<Option<Player>> {
        self.check_available()?;
        Ok(self.records.players.iter().find(|p| p.id == id).cloned())
    }

    async fn recent_matches(&self, limit: i64) -> Result<Vec<MatchWithTournament>> {
        self.check_available()?;
        Ok(self
            .newest_first()
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|m| self.with_tournament(m))
            .collect())
    }

    async fn appearance_goals(&self) -> Result<Vec<DatedGoals>> {
        self.check_available()?;
        let dates: HashMap<Uuid, _> = self.records.matches.iter().map(|m| (m.id, m.date)).collect();
        Ok(self
            .records
            .appearances
            .iter()
            .filter_map(|a| {
                dates.get(&a.match_id).map(|date| DatedGoals {
                    date: *date,
                    goals: i64::from(a.goals),
                })
            })
            .collect())
    }

    async fn match_results(&self) -> Result<Vec<TournamentResult>> {
        self.check_available()?;
        Ok(self
            .records
            .matches
            .iter()
            .map(|m| TournamentResult {
                tournament: self.tournament(m.tournament_id),
                result: m.result,
            })
            .collect())
    }

    async fn find_match(&self, id: Uuid) -> Result<Option<MatchWithTournament>> {
        self.check_available()?;
        Ok(self
            .records
            .matches
            .iter()
            .find(|m| m.id == id)
            .map(|m| self.with_tournament(m)))
    }

    async fn match_appearances(&self, match_id: Uuid) -> Result<Vec<AppearanceWithPlayer>> {
        self.check_available()?;
        Ok(self
            .records
            .appearances
            .iter()
            .filter(|a| a.match_id == match_id)
            .filter_map(|a| {
                let player = self.records.players.iter().find(|p| p.id == a.player_id)?;
                Some(AppearanceWithPlayer {
                    appearance: a.clone(),
                    player: player.clone(),
                })
            })
            .collect())
    }

    async fn list_matches(&self, filter: &MatchFilter) -> Result<Vec<MatchWithTournament>> {
        self.check_available()?;
        Ok(self
            .newest_first()
            .into_iter()
            .filter(|m| filter.result.map_or(true, |r: MatchResult| m.result == r))
            .filter(|m| filter.tournament_id.map_or(true, |t| m.tournament_id == Some(t)))
            .skip(usize::try_from(filter.page.offset).unwrap_or(0))
            .take(usize::try_from(filter.page.limit).unwrap_or(0))
            .map(|m| self.with_tournament(m))
            .collect())
    }

    async fn list_players(&self, page: Page) -> Result<Vec<Player>> {
        self.check_available()?;
        let mut players = self.records.players.clone();
        players.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
        Ok(players
            .into_iter()
            .skip(usize::try_from(page.offset).unwrap_or(0))
            .take(usize::try_from(page.limit).unwrap_or(0))
            .collect())
    }

    async fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        self.check_available()?;
        let mut tournaments = self.records.tournaments.clone();
        tournaments.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(tournaments)
    }
}
