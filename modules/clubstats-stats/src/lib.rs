//! Statistics over the club's match and appearance records.
//!
//! [`StatsEngine`] answers four independent read-only queries: the overall
//! summary, monthly goal totals, the per-tournament result breakdown and a
//! single match's detail. The pure computations behind them live in
//! [`summary`], [`charts`] and [`detail`].

pub mod charts;
pub mod detail;
mod engine;
pub mod summary;

pub use charts::{ChartData, ChartKind, MonthlyGoals, TournamentResults, NO_TOURNAMENT};
pub use detail::{MatchDetail, MatchStats, MatchWithAppearances};
pub use engine::StatsEngine;
pub use summary::{OverallSummary, Wdl, STREAK_LENGTH};
