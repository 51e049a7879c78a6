//! Composition root.
//!
//! # Responsibility
//! - Open the store, build each repository once and inject them into the
//!   team and player services.
//!
//! # Invariants
//! - One service instance per entity type, shared through `Arc`.
//! - The player service receives the same team repository the team service
//!   uses; there are no process-wide service singletons.

use crate::config::RosterConfig;
use crate::db::{open_shared_db, open_shared_db_in_memory, DbError, SharedConnection};
use crate::logging::{init_logging, LoggingError};
use crate::repo::player_repo::SqlitePlayerRepository;
use crate::repo::team_repo::{RepoError, SqliteTeamRepository};
use crate::service::dashboard::{self, DashboardOverview, QuickStats};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::player_service::PlayerService;
use crate::service::team_service::TeamService;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type SqliteTeamService = TeamService<SqliteTeamRepository>;
pub type SqlitePlayerService = PlayerService<SqlitePlayerRepository, SqliteTeamRepository>;

/// Startup failures.
#[derive(Debug)]
pub enum BootstrapError {
    Logging(LoggingError),
    Db(DbError),
    Repo(RepoError),
    Service(ServiceError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "logging bootstrap failed: {err}"),
            Self::Db(err) => write!(f, "database bootstrap failed: {err}"),
            Self::Repo(err) => write!(f, "repository bootstrap failed: {err}"),
            Self::Service(err) => write!(f, "service bootstrap failed: {err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<LoggingError> for BootstrapError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for BootstrapError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for BootstrapError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ServiceError> for BootstrapError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

/// Wired services for one store.
#[derive(Clone)]
pub struct Roster {
    pub teams: Arc<SqliteTeamService>,
    pub players: Arc<SqlitePlayerService>,
    top_players: usize,
}

impl Roster {
    /// Initializes logging (when a directory is configured), opens the store
    /// and wires the services.
    pub fn open(config: &RosterConfig) -> Result<Self, BootstrapError> {
        if let Some(log_dir) = config.log_dir.as_deref() {
            init_logging(&config.log_level, log_dir)?;
        }

        let conn = match config.db_path.as_deref() {
            Some(path) => open_shared_db(path)?,
            None => open_shared_db_in_memory()?,
        };
        Self::from_connection(conn, config.dashboard_top_players)
    }

    /// Wires the services over an already-migrated shared connection.
    pub fn from_connection(
        conn: SharedConnection,
        top_players: usize,
    ) -> Result<Self, BootstrapError> {
        let team_repo = SqliteTeamRepository::try_new(Arc::clone(&conn))?;
        let player_repo = SqlitePlayerRepository::try_new(conn)?;

        let teams = Arc::new(TeamService::try_new(team_repo.clone())?);
        let players = Arc::new(PlayerService::try_new(player_repo, team_repo)?);

        info!(
            "event=roster_ready module=app status=ok teams={} players={}",
            teams.snapshot().len(),
            players.snapshot().len()
        );
        Ok(Self {
            teams,
            players,
            top_players,
        })
    }

    pub fn quick_stats(&self) -> ServiceResult<QuickStats> {
        dashboard::quick_stats(self.teams.as_ref(), self.players.as_ref())
    }

    pub fn dashboard(&self) -> ServiceResult<DashboardOverview> {
        dashboard::overview(self.teams.as_ref(), self.players.as_ref(), self.top_players)
    }
}
