//! Player repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and lookup APIs over the `players` table.
//!
//! # Invariants
//! - `find_all` is ordered by last name, then first name (case-insensitive),
//!   then id.
//! - `team_id` is stored as given; a missing or zero team marks a free agent.

use crate::db::SharedConnection;
use crate::model::player::{Player, PlayerDraft, PlayerId};
use crate::model::team::TeamId;
use crate::repo::team_repo::{ensure_connection_ready, lock_connection, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use std::sync::MutexGuard;

const PLAYER_COLUMNS: &str = "id, first_name, last_name, age, position, rating, team_id, \
     jersey_number, created_at, updated_at";
const NAME_ORDER: &str = "last_name COLLATE NOCASE, first_name COLLATE NOCASE, id";

/// Persistence gateway for players.
pub trait PlayerRepository {
    /// Inserts a player and returns it with assigned id and timestamps.
    fn save(&self, draft: &PlayerDraft) -> RepoResult<Player>;
    fn find_by_id(&self, id: PlayerId) -> RepoResult<Option<Player>>;
    /// Returns all players ordered by last name, then first name.
    fn find_all(&self) -> RepoResult<Vec<Player>>;
    /// Overwrites editable fields; `NotFound` when no row matched `player.id`.
    fn update(&self, player: &Player) -> RepoResult<Player>;
    /// Returns `true` when a row was removed.
    fn delete_by_id(&self, id: PlayerId) -> RepoResult<bool>;
    fn exists_by_id(&self, id: PlayerId) -> RepoResult<bool>;
    fn count(&self) -> RepoResult<u64>;
    /// Players on one team, ordered by name.
    fn find_by_team_id(&self, team_id: TeamId) -> RepoResult<Vec<Player>>;
    /// Exact position match, best rated first.
    fn find_by_position(&self, position: &str) -> RepoResult<Vec<Player>>;
    /// Players rated at least `min_rating`, best rated first.
    fn find_by_rating_at_least(&self, min_rating: f64) -> RepoResult<Vec<Player>>;
    /// Inclusive age range, youngest first.
    fn find_by_age_between(&self, min_age: i32, max_age: i32) -> RepoResult<Vec<Player>>;
    /// Case-insensitive substring match on first or last name.
    fn search_by_name(&self, name_part: &str) -> RepoResult<Vec<Player>>;
    /// Players without a team, best rated first.
    fn find_free_agents(&self) -> RepoResult<Vec<Player>>;
}

/// SQLite-backed player repository.
#[derive(Clone)]
pub struct SqlitePlayerRepository {
    conn: SharedConnection,
}

impl SqlitePlayerRepository {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: SharedConnection) -> RepoResult<Self> {
        ensure_connection_ready(&*lock_connection(&conn)?)?;
        Ok(Self { conn })
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        lock_connection(&self.conn)
    }

    fn select<P: Params>(&self, clause: &str, params: P) -> RepoResult<Vec<Player>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT {PLAYER_COLUMNS} FROM players {clause};"))?;
        let rows = stmt.query_map(params, parse_player_row)?;
        let players = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(players)
    }
}

impl PlayerRepository for SqlitePlayerRepository {
    fn save(&self, draft: &PlayerDraft) -> RepoResult<Player> {
        let conn = self.lock()?;
        let player = conn.query_row(
            &format!(
                "INSERT INTO players (
                    first_name,
                    last_name,
                    age,
                    position,
                    rating,
                    team_id,
                    jersey_number
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                RETURNING {PLAYER_COLUMNS};"
            ),
            params![
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.age,
                draft.position.as_str(),
                draft.rating,
                draft.team_id,
                draft.jersey_number,
            ],
            parse_player_row,
        )?;
        Ok(player)
    }

    fn find_by_id(&self, id: PlayerId) -> RepoResult<Option<Player>> {
        let conn = self.lock()?;
        let player = conn
            .query_row(
                &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1;"),
                params![id],
                parse_player_row,
            )
            .optional()?;
        Ok(player)
    }

    fn find_all(&self) -> RepoResult<Vec<Player>> {
        self.select(&format!("ORDER BY {NAME_ORDER}"), [])
    }

    fn update(&self, player: &Player) -> RepoResult<Player> {
        let conn = self.lock()?;
        let updated = conn
            .query_row(
                &format!(
                    "UPDATE players
                     SET
                        first_name = ?1,
                        last_name = ?2,
                        age = ?3,
                        position = ?4,
                        rating = ?5,
                        team_id = ?6,
                        jersey_number = ?7,
                        updated_at = (strftime('%s', 'now') * 1000)
                     WHERE id = ?8
                     RETURNING {PLAYER_COLUMNS};"
                ),
                params![
                    player.first_name.as_str(),
                    player.last_name.as_str(),
                    player.age,
                    player.position.as_str(),
                    player.rating,
                    player.team_id,
                    player.jersey_number,
                    player.id,
                ],
                parse_player_row,
            )
            .optional()?;

        updated.ok_or(RepoError::NotFound(player.id))
    }

    fn delete_by_id(&self, id: PlayerId) -> RepoResult<bool> {
        let changed = self
            .lock()?
            .execute("DELETE FROM players WHERE id = ?1;", params![id])?;
        Ok(changed > 0)
    }

    fn exists_by_id(&self, id: PlayerId) -> RepoResult<bool> {
        let exists: i64 = self.lock()?.query_row(
            "SELECT EXISTS(SELECT 1 FROM players WHERE id = ?1);",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists != 0)
    }

    fn count(&self) -> RepoResult<u64> {
        let total: i64 = self
            .lock()?
            .query_row("SELECT COUNT(*) FROM players;", [], |row| row.get(0))?;
        u64::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("negative player count: {total}")))
    }

    fn find_by_team_id(&self, team_id: TeamId) -> RepoResult<Vec<Player>> {
        self.select(
            &format!("WHERE team_id = ?1 ORDER BY {NAME_ORDER}"),
            params![team_id],
        )
    }

    fn find_by_position(&self, position: &str) -> RepoResult<Vec<Player>> {
        self.select("WHERE position = ?1 ORDER BY rating DESC, id", params![position])
    }

    fn find_by_rating_at_least(&self, min_rating: f64) -> RepoResult<Vec<Player>> {
        self.select("WHERE rating >= ?1 ORDER BY rating DESC, id", params![min_rating])
    }

    fn find_by_age_between(&self, min_age: i32, max_age: i32) -> RepoResult<Vec<Player>> {
        self.select(
            "WHERE age BETWEEN ?1 AND ?2 ORDER BY age, id",
            params![min_age, max_age],
        )
    }

    fn search_by_name(&self, name_part: &str) -> RepoResult<Vec<Player>> {
        self.select(
            &format!(
                "WHERE instr(lower(first_name), lower(?1)) > 0
                    OR instr(lower(last_name), lower(?1)) > 0
                 ORDER BY {NAME_ORDER}"
            ),
            params![name_part],
        )
    }

    fn find_free_agents(&self) -> RepoResult<Vec<Player>> {
        self.select(
            "WHERE team_id IS NULL OR team_id = 0 ORDER BY rating DESC, id",
            [],
        )
    }
}

fn parse_player_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        age: row.get("age")?,
        position: row.get("position")?,
        rating: row.get("rating")?,
        team_id: row.get("team_id")?,
        jersey_number: row.get("jersey_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
