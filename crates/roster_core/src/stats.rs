//! Aggregate statistics over cache snapshots.
//!
//! # Responsibility
//! - Compute grouped counts, averages and extremes on demand.
//!
//! # Invariants
//! - Averages over an empty input are `0.0`.
//! - Ties for "oldest team" and "top player" resolve to the first entity in
//!   input order.
//! - Grouped counts use the stored spelling as the key (no case folding).

use crate::model::player::{Player, PlayerId};
use crate::model::team::Team;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregates over all teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatistics {
    pub total_teams: u64,
    pub teams_by_sport: BTreeMap<String, u64>,
    pub teams_by_location: BTreeMap<String, u64>,
    /// Average over teams with a founded year set.
    pub average_founded_year: f64,
    /// Name of the team with the earliest founded year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_team: Option<String>,
}

/// Aggregates over all players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatistics {
    pub total_players: u64,
    /// Rounded to two decimal places.
    pub average_rating: f64,
    pub average_age: f64,
    pub players_by_position: BTreeMap<String, u64>,
    pub free_agents: u64,
    pub rating_distribution: RatingDistribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_player: Option<TopPlayer>,
}

/// Player counts per fixed rating band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    /// rating >= 9.0
    #[serde(rename = "Excellent")]
    pub excellent: u64,
    /// 8.0 <= rating < 9.0
    #[serde(rename = "Good")]
    pub good: u64,
    /// 7.0 <= rating < 8.0
    #[serde(rename = "Average")]
    pub average: u64,
    /// rating < 7.0
    #[serde(rename = "Below Average")]
    pub below_average: u64,
}

/// Rating band of a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBand {
    Excellent,
    Good,
    Average,
    BelowAverage,
}

impl RatingBand {
    pub fn of(rating: f64) -> Self {
        if rating >= 9.0 {
            Self::Excellent
        } else if rating >= 8.0 {
            Self::Good
        } else if rating >= 7.0 {
            Self::Average
        } else {
            Self::BelowAverage
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::BelowAverage => "Below Average",
        }
    }
}

impl RatingDistribution {
    fn record(&mut self, rating: f64) {
        match RatingBand::of(rating) {
            RatingBand::Excellent => self.excellent += 1,
            RatingBand::Good => self.good += 1,
            RatingBand::Average => self.average += 1,
            RatingBand::BelowAverage => self.below_average += 1,
        }
    }

    /// Count for one band.
    pub fn get(&self, band: RatingBand) -> u64 {
        match band {
            RatingBand::Excellent => self.excellent,
            RatingBand::Good => self.good,
            RatingBand::Average => self.average,
            RatingBand::BelowAverage => self.below_average,
        }
    }
}

/// Highest-rated player summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPlayer {
    pub id: PlayerId,
    pub name: String,
    pub rating: f64,
}

pub fn team_statistics(teams: &[Team]) -> TeamStatistics {
    let founded: Vec<&Team> = teams.iter().filter(|t| t.founded_year.is_some()).collect();
    let average_founded_year = average(founded.iter().filter_map(|t| t.founded_year.map(f64::from)));
    let oldest_team = founded
        .iter()
        .min_by_key(|t| t.founded_year)
        .map(|t| t.name.clone());

    TeamStatistics {
        total_teams: teams.len() as u64,
        teams_by_sport: count_by(teams.iter().map(|t| t.sport.as_str())),
        teams_by_location: count_by(teams.iter().map(|t| t.location.as_str())),
        average_founded_year,
        oldest_team,
    }
}

pub fn player_statistics(players: &[Player]) -> PlayerStatistics {
    let mut rating_distribution = RatingDistribution::default();
    for player in players {
        rating_distribution.record(player.rating);
    }

    let top_player = players
        .iter()
        .fold(None::<&Player>, |best, p| match best {
            Some(b) if b.rating >= p.rating => Some(b),
            _ => Some(p),
        })
        .map(|p| TopPlayer {
            id: p.id,
            name: p.full_name(),
            rating: p.rating,
        });

    PlayerStatistics {
        total_players: players.len() as u64,
        average_rating: round_to_two_decimals(average_rating(players)),
        average_age: average(players.iter().map(|p| f64::from(p.age))),
        players_by_position: count_by(players.iter().map(|p| p.position.as_str())),
        free_agents: players.iter().filter(|p| p.is_free_agent()).count() as u64,
        rating_distribution,
        top_player,
    }
}

/// Unrounded mean rating, `0.0` when empty.
pub fn average_rating(players: &[Player]) -> f64 {
    average(players.iter().map(|p| p.rating))
}

/// Rounds half away from zero to two decimal places.
pub fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0u64), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn count_by<'a>(keys: impl Iterator<Item = &'a str>) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}
