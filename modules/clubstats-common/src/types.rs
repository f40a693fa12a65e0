use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Match Result ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MatchResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "WIN" | "win" | "Win" => Ok(Self::Win),
            "DRAW" | "draw" | "Draw" => Ok(Self::Draw),
            "LOSS" | "loss" | "Loss" => Ok(Self::Loss),
            other => Err(format!("unknown match result: {other}")),
        }
    }
}

impl MatchResult {
    /// Stored representation, also used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchResult::Win => "WIN",
            MatchResult::Draw => "DRAW",
            MatchResult::Loss => "LOSS",
        }
    }

    /// The result a scoreline implies from our side.
    pub fn from_scores(our_score: i32, their_score: i32) -> Self {
        match our_score.cmp(&their_score) {
            Ordering::Greater => MatchResult::Win,
            Ordering::Equal => MatchResult::Draw,
            Ordering::Less => MatchResult::Loss,
        }
    }
}

// --- Records ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub organizer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub opponent: String,
    pub location: String,
    pub our_score: i32,
    pub their_score: i32,
    pub result: MatchResult,
    pub notes: Option<String>,
    pub tournament_id: Option<Uuid>,
}

impl Match {
    /// True when the stored result agrees with the scoreline.
    /// The store does not enforce this.
    pub fn result_matches_score(&self) -> bool {
        MatchResult::from_scores(self.our_score, self.their_score) == self.result
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub starter: bool,
    pub goals: i32,
    pub assists: Option<i32>,
    pub yellow_card: bool,
    pub red_card: bool,
    pub rating: Option<f64>,
}

// --- Joined views ---

/// A match together with its tournament, if it belongs to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchWithTournament {
    #[serde(flatten)]
    pub record: Match,
    pub tournament: Option<Tournament>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceWithPlayer {
    #[serde(flatten)]
    pub appearance: Appearance,
    pub player: Player,
}

// --- Query shapes ---

/// Row of a group-by over match results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultCount {
    pub result: MatchResult,
    pub count: i64,
}

/// Match count and summed score fields across all matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchTotals {
    pub matches: i64,
    pub goals_for: i64,
    pub goals_against: i64,
}

/// Appearance goals summed per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerGoals {
    pub player_id: Uuid,
    pub goals: i64,
}

/// Goals from one appearance, dated by its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatedGoals {
    pub date: DateTime<Utc>,
    pub goals: i64,
}

/// One match's result with the tournament it was played in.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentResult {
    pub tournament: Option<Tournament>,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Clamp caller-supplied paging to `1..=max` rows and a non-negative offset.
    pub fn clamped(limit: Option<i64>, offset: Option<i64>, default: i64, max: i64) -> Self {
        Self {
            limit: limit.unwrap_or(default).clamp(1, max),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchFilter {
    pub result: Option<MatchResult>,
    pub tournament_id: Option<Uuid>,
    pub page: Page,
}
