//! Team repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and lookup APIs over the `teams` table.
//! - Own the shared repository error type.
//!
//! # Invariants
//! - `find_all` is ordered by name (case-insensitive), then id.
//! - Identifiers and timestamps are assigned by SQLite, never by callers.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{DbError, SharedConnection};
use crate::model::team::{Team, TeamDraft, TeamId};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::MutexGuard;

const TEAM_COLUMNS: &str = "id, name, sport, coach, location, founded_year, created_at, updated_at";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by team and player persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(i32),
    ConnectionPoisoned,
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "row not found: {id}"),
            Self::ConnectionPoisoned => {
                write!(f, "database connection lock poisoned by a panicked caller")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence gateway for teams.
pub trait TeamRepository {
    /// Inserts a team and returns it with assigned id and timestamps.
    fn save(&self, draft: &TeamDraft) -> RepoResult<Team>;
    fn find_by_id(&self, id: TeamId) -> RepoResult<Option<Team>>;
    /// Returns all teams ordered by name.
    fn find_all(&self) -> RepoResult<Vec<Team>>;
    /// Overwrites editable fields; `NotFound` when no row matched `team.id`.
    fn update(&self, team: &Team) -> RepoResult<Team>;
    /// Returns `true` when a row was removed.
    fn delete_by_id(&self, id: TeamId) -> RepoResult<bool>;
    fn exists_by_id(&self, id: TeamId) -> RepoResult<bool>;
    fn count(&self) -> RepoResult<u64>;
    fn find_by_sport(&self, sport: &str) -> RepoResult<Vec<Team>>;
    fn find_by_location(&self, location: &str) -> RepoResult<Vec<Team>>;
    fn find_by_coach(&self, coach: &str) -> RepoResult<Vec<Team>>;
    /// Case-insensitive substring match on team name.
    fn search_by_name(&self, name_part: &str) -> RepoResult<Vec<Team>>;
}

/// SQLite-backed team repository.
#[derive(Clone)]
pub struct SqliteTeamRepository {
    conn: SharedConnection,
}

impl SqliteTeamRepository {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: SharedConnection) -> RepoResult<Self> {
        ensure_connection_ready(&*lock_connection(&conn)?)?;
        Ok(Self { conn })
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        lock_connection(&self.conn)
    }
}

impl TeamRepository for SqliteTeamRepository {
    fn save(&self, draft: &TeamDraft) -> RepoResult<Team> {
        let conn = self.lock()?;
        let team = conn.query_row(
            &format!(
                "INSERT INTO teams (name, sport, coach, location, founded_year)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {TEAM_COLUMNS};"
            ),
            params![
                draft.name.as_str(),
                draft.sport.as_str(),
                draft.coach.as_str(),
                draft.location.as_str(),
                draft.founded_year,
            ],
            parse_team_row,
        )?;
        Ok(team)
    }

    fn find_by_id(&self, id: TeamId) -> RepoResult<Option<Team>> {
        let conn = self.lock()?;
        let team = conn
            .query_row(
                &format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?1;"),
                params![id],
                parse_team_row,
            )
            .optional()?;
        Ok(team)
    }

    fn find_all(&self) -> RepoResult<Vec<Team>> {
        query_teams(
            &*self.lock()?,
            &format!("SELECT {TEAM_COLUMNS} FROM teams ORDER BY name COLLATE NOCASE, id;"),
            [],
        )
    }

    fn update(&self, team: &Team) -> RepoResult<Team> {
        let conn = self.lock()?;
        let updated = conn
            .query_row(
                &format!(
                    "UPDATE teams
                     SET
                        name = ?1,
                        sport = ?2,
                        coach = ?3,
                        location = ?4,
                        founded_year = ?5,
                        updated_at = (strftime('%s', 'now') * 1000)
                     WHERE id = ?6
                     RETURNING {TEAM_COLUMNS};"
                ),
                params![
                    team.name.as_str(),
                    team.sport.as_str(),
                    team.coach.as_str(),
                    team.location.as_str(),
                    team.founded_year,
                    team.id,
                ],
                parse_team_row,
            )
            .optional()?;

        updated.ok_or(RepoError::NotFound(team.id))
    }

    fn delete_by_id(&self, id: TeamId) -> RepoResult<bool> {
        let changed = self
            .lock()?
            .execute("DELETE FROM teams WHERE id = ?1;", params![id])?;
        Ok(changed > 0)
    }

    fn exists_by_id(&self, id: TeamId) -> RepoResult<bool> {
        let exists: i64 = self.lock()?.query_row(
            "SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?1);",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists != 0)
    }

    fn count(&self) -> RepoResult<u64> {
        let total: i64 = self
            .lock()?
            .query_row("SELECT COUNT(*) FROM teams;", [], |row| row.get(0))?;
        u64::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("negative team count: {total}")))
    }

    fn find_by_sport(&self, sport: &str) -> RepoResult<Vec<Team>> {
        query_teams(
            &*self.lock()?,
            &format!(
                "SELECT {TEAM_COLUMNS} FROM teams WHERE sport = ?1 ORDER BY name COLLATE NOCASE, id;"
            ),
            params![sport],
        )
    }

    fn find_by_location(&self, location: &str) -> RepoResult<Vec<Team>> {
        query_teams(
            &*self.lock()?,
            &format!(
                "SELECT {TEAM_COLUMNS} FROM teams WHERE location = ?1 ORDER BY name COLLATE NOCASE, id;"
            ),
            params![location],
        )
    }

    fn find_by_coach(&self, coach: &str) -> RepoResult<Vec<Team>> {
        query_teams(
            &*self.lock()?,
            &format!(
                "SELECT {TEAM_COLUMNS} FROM teams WHERE coach = ?1 ORDER BY name COLLATE NOCASE, id;"
            ),
            params![coach],
        )
    }

    fn search_by_name(&self, name_part: &str) -> RepoResult<Vec<Team>> {
        query_teams(
            &*self.lock()?,
            &format!(
                "SELECT {TEAM_COLUMNS} FROM teams
                 WHERE instr(lower(name), lower(?1)) > 0
                 ORDER BY name COLLATE NOCASE, id;"
            ),
            params![name_part],
        )
    }
}

/// Locks the shared connection, mapping poison to a repository error.
pub(crate) fn lock_connection(conn: &SharedConnection) -> RepoResult<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| RepoError::ConnectionPoisoned)
}

/// Rejects connections that did not go through `db::open_*` migrations.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

fn query_teams<P: Params>(conn: &Connection, sql: &str, params: P) -> RepoResult<Vec<Team>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, parse_team_row)?;
    let teams = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(teams)
}

fn parse_team_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get("id")?,
        name: row.get("name")?,
        sport: row.get("sport")?,
        coach: row.get("coach")?,
        location: row.get("location")?,
        founded_year: row.get("founded_year")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
