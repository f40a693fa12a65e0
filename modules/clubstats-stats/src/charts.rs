use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use clubstats_common::{DatedGoals, StatsError, TournamentResult};

use crate::summary::Wdl;

/// Label of the bucket holding matches played outside any tournament.
pub const NO_TOURNAMENT: &str = "No tournament";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    GoalsByMonth,
    ResultsBySeason,
}

impl std::str::FromStr for ChartKind {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goals-by-month" => Ok(Self::GoalsByMonth),
            "results-by-season" => Ok(Self::ResultsBySeason),
            other => Err(StatsError::Validation(format!(
                "unknown chart type {other:?}, expected goals-by-month or results-by-season"
            ))),
        }
    }
}

impl ChartKind {
    /// An absent selector means the default chart.
    pub fn from_selector(selector: Option<&str>) -> Result<Self, StatsError> {
        selector.map_or(Ok(Self::default()), str::parse::<Self>)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyGoals {
    /// Display label, e.g. "Jan 2025".
    pub month: String,
    /// Sort key, `YYYY-MM`.
    pub key: String,
    pub goals: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentResults {
    pub tournament: String,
    #[serde(flatten)]
    pub results: Wdl,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartData {
    GoalsByMonth(Vec<MonthlyGoals>),
    ResultsBySeason(Vec<TournamentResults>),
}

/// Sum appearance goals per calendar month (UTC) of the match date.
/// Months without appearances are left out, not zero-filled.
pub fn goals_by_month(rows: &[DatedGoals]) -> Vec<MonthlyGoals> {
    let mut buckets: BTreeMap<(i32, u32), i64> = BTreeMap::new();
    for row in rows {
        *buckets
            .entry((row.date.year(), row.date.month()))
            .or_default() += row.goals;
    }

    buckets
        .into_iter()
        .map(|((year, month), goals)| {
            let key = format!("{year:04}-{month:02}");
            let month = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_else(|| key.clone());
            MonthlyGoals { month, key, goals }
        })
        .collect()
}

/// W/D/L per tournament, sorted by label. Matches without a tournament get
/// their own bucket keyed by absence, so a tournament that happens to share
/// the label is still counted separately.
pub fn results_by_tournament(rows: &[TournamentResult]) -> Vec<TournamentResults> {
    let mut buckets: HashMap<Option<Uuid>, (String, Wdl)> = HashMap::new();
    for row in rows {
        let key = row.tournament.as_ref().map(|t| t.id);
        let (_, wdl) = buckets.entry(key).or_insert_with(|| {
            let label = row
                .tournament
                .as_ref()
                .map_or_else(|| NO_TOURNAMENT.to_string(), |t| t.name.clone());
            (label, Wdl::default())
        });
        wdl.record(row.result);
    }

    let mut out: Vec<(Option<Uuid>, String, Wdl)> = buckets
        .into_iter()
        .map(|(key, (label, wdl))| (key, label, wdl))
        .collect();
    out.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

    out.into_iter()
        .map(|(_, tournament, results)| TournamentResults {
            tournament,
            results,
        })
        .collect()
}
