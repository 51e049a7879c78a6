//! Dashboard read model combining team and player services.
//!
//! # Responsibility
//! - Assemble headline counters and chart data for overview screens.
//!
//! # Invariants
//! - Counters come from storage; lists and statistics come from cache
//!   snapshots.

use crate::model::player::Player;
use crate::model::team::Team;
use crate::repo::player_repo::PlayerRepository;
use crate::repo::team_repo::TeamRepository;
use crate::service::error::ServiceResult;
use crate::service::player_service::PlayerService;
use crate::service::team_service::TeamService;
use crate::stats::{round_to_two_decimals, PlayerStatistics, TeamStatistics};
use serde::{Deserialize, Serialize};

/// Default length of the top-rated list.
pub const DEFAULT_TOP_PLAYERS: usize = 5;

/// Headline counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    pub total_teams: u64,
    pub total_players: u64,
    /// Rounded to two decimal places.
    pub average_rating: f64,
}

/// Full dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub stats: QuickStats,
    pub team_stats: TeamStatistics,
    pub player_stats: PlayerStatistics,
    /// All teams ordered by name.
    pub teams_by_name: Vec<Team>,
    pub top_players: Vec<Player>,
    pub free_agents: Vec<Player>,
}

pub fn quick_stats<P, T, R>(
    teams: &TeamService<R>,
    players: &PlayerService<P, T>,
) -> ServiceResult<QuickStats>
where
    P: PlayerRepository,
    T: TeamRepository,
    R: TeamRepository,
{
    Ok(QuickStats {
        total_teams: teams.count()?,
        total_players: players.count()?,
        average_rating: round_to_two_decimals(players.average_rating()),
    })
}

pub fn overview<P, T, R>(
    teams: &TeamService<R>,
    players: &PlayerService<P, T>,
    top_players: usize,
) -> ServiceResult<DashboardOverview>
where
    P: PlayerRepository,
    T: TeamRepository,
    R: TeamRepository,
{
    Ok(DashboardOverview {
        stats: quick_stats(teams, players)?,
        team_stats: teams.statistics(),
        player_stats: players.statistics(),
        teams_by_name: teams.sort_by("name", true),
        top_players: players.top_rated(top_players),
        free_agents: players.free_agents(),
    })
}
