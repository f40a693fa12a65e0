use std::cmp::Reverse;

use serde::Serialize;

use clubstats_common::{MatchResult, MatchTotals, MatchWithTournament, PlayerGoals, ResultCount};

/// Number of recent matches in the form streak and the recent-matches list.
pub const STREAK_LENGTH: usize = 5;

/// Wins, draws and losses. Every category is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Wdl {
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
}

impl Wdl {
    pub fn from_counts(counts: &[ResultCount]) -> Self {
        let mut wdl = Self::default();
        for c in counts {
            *wdl.slot(c.result) += c.count;
        }
        wdl
    }

    pub fn record(&mut self, result: MatchResult) {
        *self.slot(result) += 1;
    }

    pub fn total(&self) -> i64 {
        self.wins + self.draws + self.losses
    }

    fn slot(&mut self, result: MatchResult) -> &mut i64 {
        match result {
            MatchResult::Win => &mut self.wins,
            MatchResult::Draw => &mut self.draws,
            MatchResult::Loss => &mut self.losses,
        }
    }
}

/// Headline numbers for the dashboard.
///
/// `goals_for` / `goals_against` are summed match score fields; `top_scorer`
/// comes from summed appearance goals. The two sources are never mixed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub total_matches: i64,
    pub wdl: Wdl,
    pub goals_for: i64,
    pub goals_against: i64,
    pub top_scorer: Option<String>,
    /// Oldest first.
    pub streak: Vec<MatchResult>,
    /// Newest first.
    pub last5_matches: Vec<MatchWithTournament>,
}

impl OverallSummary {
    /// `recent` must be newest first, as returned by the store.
    pub fn assemble(
        counts: &[ResultCount],
        totals: MatchTotals,
        top_scorer: Option<String>,
        mut recent: Vec<MatchWithTournament>,
    ) -> Self {
        recent.truncate(STREAK_LENGTH);
        Self {
            total_matches: totals.matches,
            wdl: Wdl::from_counts(counts),
            goals_for: totals.goals_for,
            goals_against: totals.goals_against,
            top_scorer,
            streak: streak(&recent),
            last5_matches: recent,
        }
    }
}

/// Results of the given newest-first matches, reordered oldest first.
pub fn streak(newest_first: &[MatchWithTournament]) -> Vec<MatchResult> {
    newest_first
        .iter()
        .take(STREAK_LENGTH)
        .rev()
        .map(|m| m.record.result)
        .collect()
}

/// Highest goal total wins; ties go to the lowest player id.
/// `None` only when no player has an appearance.
pub fn pick_top_scorer(goals: &[PlayerGoals]) -> Option<PlayerGoals> {
    goals
        .iter()
        .max_by_key(|g| (g.goals, Reverse(g.player_id)))
        .copied()
}

pub fn format_top_scorer(full_name: &str, goals: i64) -> String {
    format!("{full_name} ({goals})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubstats_common::Match;
    use uuid::Uuid;

    fn recent(results: &[MatchResult]) -> Vec<MatchWithTournament> {
        results
            .iter()
            .enumerate()
            .map(|(i, result)| MatchWithTournament {
                record: Match {
                    id: Uuid::from_u128(i as u128 + 1),
                    date: chrono::Utc::now() - chrono::Duration::days(i as i64),
                    opponent: format!("Opponent {i}"),
                    location: "Away".to_string(),
                    our_score: 0,
                    their_score: 0,
                    result: *result,
                    notes: None,
                    tournament_id: None,
                },
                tournament: None,
            })
            .collect()
    }

    #[test]
    fn wdl_zero_fills_missing_categories() {
        let wdl = Wdl::from_counts(&[ResultCount {
            result: MatchResult::Win,
            count: 4,
        }]);
        assert_eq!(wdl, Wdl { wins: 4, draws: 0, losses: 0 });
        assert_eq!(wdl.total(), 4);
    }

    #[test]
    fn streak_reverses_newest_first_input() {
        use MatchResult::*;
        let newest_first = recent(&[Loss, Win, Draw, Win, Win, Loss]);
        assert_eq!(streak(&newest_first), vec![Win, Win, Draw, Win, Loss]);
    }

    #[test]
    fn top_scorer_ties_go_to_lowest_player_id() {
        let goals = [
            PlayerGoals { player_id: Uuid::from_u128(9), goals: 5 },
            PlayerGoals { player_id: Uuid::from_u128(3), goals: 5 },
            PlayerGoals { player_id: Uuid::from_u128(1), goals: 2 },
        ];
        let top = pick_top_scorer(&goals).unwrap();
        assert_eq!(top.player_id, Uuid::from_u128(3));
        assert_eq!(format_top_scorer("Ana Silva", top.goals), "Ana Silva (5)");
    }

    #[test]
    fn goalless_appearances_still_name_a_top_scorer() {
        let goals = [
            PlayerGoals { player_id: Uuid::from_u128(8), goals: 0 },
            PlayerGoals { player_id: Uuid::from_u128(2), goals: 0 },
        ];
        let top = pick_top_scorer(&goals).unwrap();
        assert_eq!(top.player_id, Uuid::from_u128(2));
        assert_eq!(format_top_scorer("Ana Silva", top.goals), "Ana Silva (0)");
    }

    #[test]
    fn no_top_scorer_without_appearances() {
        assert!(pick_top_scorer(&[]).is_none());
    }

    #[test]
    fn empty_summary_serializes_to_zeroes() {
        let json = serde_json::to_value(OverallSummary::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalMatches": 0,
                "wdl": { "wins": 0, "draws": 0, "losses": 0 },
                "goalsFor": 0,
                "goalsAgainst": 0,
                "topScorer": null,
                "streak": [],
                "last5Matches": [],
            })
        );
    }

    #[test]
    fn assemble_keeps_list_newest_first_and_streak_oldest_first() {
        use MatchResult::*;
        let summary = OverallSummary::assemble(
            &[
                ResultCount { result: Win, count: 2 },
                ResultCount { result: Loss, count: 1 },
            ],
            MatchTotals { matches: 3, goals_for: 5, goals_against: 2 },
            None,
            recent(&[Loss, Win, Win]),
        );
        assert_eq!(summary.streak, vec![Win, Win, Loss]);
        assert_eq!(summary.last5_matches[0].record.result, Loss);
        assert_eq!(summary.wdl.total(), summary.total_matches);
    }
}
