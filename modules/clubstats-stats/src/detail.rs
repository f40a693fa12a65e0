use std::cmp::Reverse;

use serde::Serialize;

use clubstats_common::{AppearanceWithPlayer, MatchWithTournament};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchWithAppearances {
    #[serde(flatten)]
    pub fixture: MatchWithTournament,
    pub appearances: Vec<AppearanceWithPlayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    /// Summed appearance goals, independent of the match score fields.
    pub total_goals: i64,
    pub total_assists: i64,
    pub total_yellow_cards: i64,
    pub total_red_cards: i64,
    pub average_rating: Option<f64>,
}

impl MatchStats {
    pub fn from_appearances(appearances: &[AppearanceWithPlayer]) -> Self {
        let mut stats = Self::default();
        let mut rating_sum = 0.0;
        let mut rated = 0u32;

        for a in appearances.iter().map(|a| &a.appearance) {
            stats.total_goals += i64::from(a.goals);
            stats.total_assists += i64::from(a.assists.unwrap_or(0));
            stats.total_yellow_cards += i64::from(a.yellow_card);
            stats.total_red_cards += i64::from(a.red_card);
            if let Some(rating) = a.rating {
                rating_sum += rating;
                rated += 1;
            }
        }

        stats.average_rating = (rated > 0).then(|| rating_sum / f64::from(rated));
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    #[serde(rename = "match")]
    pub fixture: MatchWithAppearances,
    pub stats: MatchStats,
}

impl MatchDetail {
    pub fn new(fixture: MatchWithTournament, mut appearances: Vec<AppearanceWithPlayer>) -> Self {
        order_lineup(&mut appearances);
        let stats = MatchStats::from_appearances(&appearances);
        Self {
            fixture: MatchWithAppearances {
                fixture,
                appearances,
            },
            stats,
        }
    }
}

/// Starters before substitutes, then by full name.
pub fn order_lineup(appearances: &mut [AppearanceWithPlayer]) {
    appearances.sort_by(|a, b| {
        Reverse(a.appearance.starter)
            .cmp(&Reverse(b.appearance.starter))
            .then_with(|| a.player.full_name.cmp(&b.player.full_name))
            .then_with(|| a.player.id.cmp(&b.player.id))
    });
}
