//! Player use-case service.
//!
//! # Responsibility
//! - Provide validated create/update/delete entry points for players.
//! - Check team references against the team repository at write time.
//! - Serve list, filter, sort, roster views and statistics from the player
//!   cache pool.
//!
//! # Invariants
//! - A non-zero `team_id` must name an existing team when the write happens.
//! - Player writes never touch the team cache.

use crate::cache::CachePool;
use crate::model::player::{Player, PlayerDraft, PlayerId};
use crate::model::team::TeamId;
use crate::model::Entity;
use crate::repo::player_repo::PlayerRepository;
use crate::repo::team_repo::{RepoError, TeamRepository};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::sort::{sorted, PlayerSortKey};
use crate::service::team_service::MISSING_ID_MESSAGE;
use crate::stats::{average_rating, player_statistics, PlayerStatistics};
use crate::validation::validate_player;
use log::{info, warn};
use std::sync::Arc;

/// Player service over player and team repositories and the player cache pool.
pub struct PlayerService<P: PlayerRepository, T: TeamRepository> {
    players: P,
    teams: T,
    pool: CachePool<Player>,
}

impl<P: PlayerRepository, T: TeamRepository> PlayerService<P, T> {
    /// Creates the service and loads the initial cache snapshot.
    ///
    /// `teams` is only used to resolve team references during validation.
    pub fn try_new(players: P, teams: T) -> ServiceResult<Self> {
        let service = Self {
            players,
            teams,
            pool: CachePool::empty(),
        };
        let size = service.refresh_pool()?;
        info!("event=service_init module=service status=ok entity=Player size={size}");
        Ok(service)
    }

    /// Underlying player repository, for gateway-level queries.
    pub fn repository(&self) -> &P {
        &self.players
    }

    /// Validates and persists a new player.
    ///
    /// # Errors
    /// - `Validation` listing every violated rule, including unknown teams.
    /// - `Storage` when a lookup, the insert or the cache reload fails.
    pub fn create(&self, draft: &PlayerDraft) -> ServiceResult<Player> {
        self.ensure_valid(draft, "player_create", None)?;

        let saved = self.players.save(draft)?;
        self.refresh_pool()?;
        info!(
            "event=player_create module=service status=ok id={} team_id={}",
            saved.id,
            saved.team_id.unwrap_or(0)
        );
        Ok(saved)
    }

    /// Looks a player up in storage, bypassing the cache.
    pub fn get_by_id(&self, id: PlayerId) -> ServiceResult<Player> {
        self.players
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::not_found(Player::KIND, id))
    }

    /// Returns an owned copy of the cache snapshot in repository order.
    pub fn list_all(&self) -> Vec<Player> {
        self.pool.snapshot().to_vec()
    }

    /// Returns the shared cache snapshot without copying.
    pub fn snapshot(&self) -> Arc<Vec<Player>> {
        self.pool.snapshot()
    }

    /// Re-validates and persists a full player record.
    ///
    /// # Errors
    /// - `Validation` when `player.id` is zero or any rule fails.
    /// - `NotFound` when no player with `player.id` exists.
    /// - `Storage` on persistence failure.
    pub fn update(&self, player: &Player) -> ServiceResult<Player> {
        if player.id == 0 {
            return Err(ServiceError::validation(
                Player::KIND,
                vec![MISSING_ID_MESSAGE.to_string()],
            ));
        }

        self.ensure_valid(&player.to_draft(), "player_update", Some(player.id))?;

        if !self.players.exists_by_id(player.id)? {
            return Err(ServiceError::not_found(Player::KIND, player.id));
        }

        let updated = match self.players.update(player) {
            Ok(updated) => updated,
            Err(RepoError::NotFound(id)) => {
                return Err(ServiceError::not_found(Player::KIND, id))
            }
            Err(err) => return Err(err.into()),
        };
        self.refresh_pool()?;
        info!("event=player_update module=service status=ok id={}", updated.id);
        Ok(updated)
    }

    /// Deletes a player by id.
    pub fn delete(&self, id: PlayerId) -> ServiceResult<()> {
        if !self.players.delete_by_id(id)? {
            return Err(ServiceError::not_found(Player::KIND, id));
        }
        self.refresh_pool()?;
        info!("event=player_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Cached players matching `predicate`, in snapshot order.
    pub fn filter_by<F>(&self, predicate: F) -> Vec<Player>
    where
        F: Fn(&Player) -> bool,
    {
        self.pool
            .snapshot()
            .iter()
            .filter(|player| predicate(player))
            .cloned()
            .collect()
    }

    /// Cached players ordered by `key` (see [`PlayerSortKey::parse`]).
    pub fn sort_by(&self, key: &str, ascending: bool) -> Vec<Player> {
        let key = PlayerSortKey::parse(key);
        sorted(self.pool.snapshot().as_slice(), ascending, |a, b| {
            key.compare(a, b)
        })
    }

    /// Players referencing `team_id`.
    pub fn players_by_team(&self, team_id: TeamId) -> Vec<Player> {
        self.filter_by(|player| player.team_id == Some(team_id))
    }

    /// Players whose position equals `position`, ignoring case.
    pub fn players_by_position(&self, position: &str) -> Vec<Player> {
        let position = position.to_lowercase();
        self.filter_by(|player| player.position.to_lowercase() == position)
    }

    /// Up to `limit` players, best rated first; equal ratings keep snapshot order.
    pub fn top_rated(&self, limit: usize) -> Vec<Player> {
        let mut ranked = self.sort_by("rating", false);
        ranked.truncate(limit);
        ranked
    }

    /// Players without a team reference.
    pub fn free_agents(&self) -> Vec<Player> {
        self.filter_by(Player::is_free_agent)
    }

    /// Unrounded mean rating of cached players, `0.0` when empty.
    pub fn average_rating(&self) -> f64 {
        average_rating(&self.pool.snapshot())
    }

    /// Number of players in storage.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.players.count()?)
    }

    /// Aggregates over the current snapshot.
    pub fn statistics(&self) -> PlayerStatistics {
        player_statistics(&self.pool.snapshot())
    }

    fn ensure_valid(
        &self,
        draft: &PlayerDraft,
        event: &str,
        id: Option<PlayerId>,
    ) -> ServiceResult<()> {
        let errors = validate_player(draft, &self.teams)?;
        if errors.is_empty() {
            return Ok(());
        }

        warn!(
            "event={} module=service status=rejected id={} violations={}",
            event,
            id.unwrap_or(0),
            errors.len()
        );
        Err(ServiceError::validation(Player::KIND, errors))
    }

    fn refresh_pool(&self) -> ServiceResult<usize> {
        Ok(self.pool.refresh(|| self.players.find_all())?)
    }
}
