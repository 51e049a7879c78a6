//! Core domain logic for the roster service.
//! Validation, caching and statistics for teams and players live here; the
//! transport layer only maps results and error kinds.

pub mod app;
pub mod cache;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;
pub mod validation;

pub use app::{BootstrapError, Roster, SqlitePlayerService, SqliteTeamService};
pub use cache::CachePool;
pub use config::{ConfigError, RosterConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::player::{Player, PlayerDraft, PlayerId};
pub use model::team::{Team, TeamDraft, TeamId};
pub use model::Entity;
pub use repo::player_repo::{PlayerRepository, SqlitePlayerRepository};
pub use repo::team_repo::{RepoError, RepoResult, SqliteTeamRepository, TeamRepository};
pub use service::dashboard::{DashboardOverview, QuickStats};
pub use service::error::{ServiceError, ServiceResult};
pub use service::player_service::PlayerService;
pub use service::sort::{PlayerSortKey, TeamSortKey};
pub use service::team_service::TeamService;
pub use stats::{PlayerStatistics, RatingBand, RatingDistribution, TeamStatistics, TopPlayer};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
