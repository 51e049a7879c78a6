//! Team use-case service.
//!
//! # Responsibility
//! - Provide validated create/update/delete entry points for teams.
//! - Serve list, filter, sort and statistics reads from the team cache pool.
//!
//! # Invariants
//! - `get_by_id` and `count` read storage directly; every other read uses the
//!   cache snapshot.
//! - The cache pool is loaded once on construction and fully reloaded after
//!   every successful write.

use crate::cache::CachePool;
use crate::model::team::{Team, TeamDraft, TeamId};
use crate::model::Entity;
use crate::repo::team_repo::{RepoError, TeamRepository};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::sort::{sorted, TeamSortKey};
use crate::stats::{team_statistics, TeamStatistics};
use crate::validation::validate_team;
use log::{info, warn};
use std::sync::Arc;

pub(crate) const MISSING_ID_MESSAGE: &str = "identifier required";

/// Team service over a team repository and its cache pool.
pub struct TeamService<R: TeamRepository> {
    repo: R,
    pool: CachePool<Team>,
}

impl<R: TeamRepository> TeamService<R> {
    /// Creates the service and loads the initial cache snapshot.
    pub fn try_new(repo: R) -> ServiceResult<Self> {
        let service = Self {
            repo,
            pool: CachePool::empty(),
        };
        let size = service.refresh_pool()?;
        info!("event=service_init module=service status=ok entity=Team size={size}");
        Ok(service)
    }

    /// Underlying repository, for gateway-level queries.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validates and persists a new team.
    ///
    /// # Errors
    /// - `Validation` listing every violated rule; nothing is written.
    /// - `Storage` when the insert or the follow-up cache reload fails.
    pub fn create(&self, draft: &TeamDraft) -> ServiceResult<Team> {
        let errors = validate_team(draft);
        if !errors.is_empty() {
            warn!(
                "event=team_create module=service status=rejected violations={}",
                errors.len()
            );
            return Err(ServiceError::validation(Team::KIND, errors));
        }

        let saved = self.repo.save(draft)?;
        self.refresh_pool()?;
        info!("event=team_create module=service status=ok id={}", saved.id);
        Ok(saved)
    }

    /// Looks a team up in storage, bypassing the cache.
    pub fn get_by_id(&self, id: TeamId) -> ServiceResult<Team> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::not_found(Team::KIND, id))
    }

    /// Returns an owned copy of the cache snapshot in repository order.
    pub fn list_all(&self) -> Vec<Team> {
        self.pool.snapshot().to_vec()
    }

    /// Returns the shared cache snapshot without copying.
    pub fn snapshot(&self) -> Arc<Vec<Team>> {
        self.pool.snapshot()
    }

    /// Re-validates and persists a full team record.
    ///
    /// # Errors
    /// - `Validation` when `team.id` is zero or any field rule fails.
    /// - `NotFound` when no team with `team.id` exists.
    /// - `Storage` on persistence failure.
    pub fn update(&self, team: &Team) -> ServiceResult<Team> {
        if team.id == 0 {
            return Err(ServiceError::validation(
                Team::KIND,
                vec![MISSING_ID_MESSAGE.to_string()],
            ));
        }

        let errors = validate_team(&team.to_draft());
        if !errors.is_empty() {
            warn!(
                "event=team_update module=service status=rejected id={} violations={}",
                team.id,
                errors.len()
            );
            return Err(ServiceError::validation(Team::KIND, errors));
        }

        if !self.repo.exists_by_id(team.id)? {
            return Err(ServiceError::not_found(Team::KIND, team.id));
        }

        let updated = match self.repo.update(team) {
            Ok(updated) => updated,
            Err(RepoError::NotFound(id)) => return Err(ServiceError::not_found(Team::KIND, id)),
            Err(err) => return Err(err.into()),
        };
        self.refresh_pool()?;
        info!("event=team_update module=service status=ok id={}", updated.id);
        Ok(updated)
    }

    /// Deletes a team by id.
    ///
    /// Players referencing the team are left untouched.
    pub fn delete(&self, id: TeamId) -> ServiceResult<()> {
        if !self.repo.delete_by_id(id)? {
            return Err(ServiceError::not_found(Team::KIND, id));
        }
        self.refresh_pool()?;
        info!("event=team_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Cached teams matching `predicate`, in snapshot order.
    pub fn filter_by<P>(&self, predicate: P) -> Vec<Team>
    where
        P: Fn(&Team) -> bool,
    {
        self.pool
            .snapshot()
            .iter()
            .filter(|team| predicate(team))
            .cloned()
            .collect()
    }

    /// Cached teams ordered by `key` (see [`TeamSortKey::parse`]).
    pub fn sort_by(&self, key: &str, ascending: bool) -> Vec<Team> {
        let key = TeamSortKey::parse(key);
        sorted(self.pool.snapshot().as_slice(), ascending, |a, b| {
            key.compare(a, b)
        })
    }

    /// Teams whose sport equals `sport`, ignoring case.
    pub fn teams_by_sport(&self, sport: &str) -> Vec<Team> {
        let sport = sport.to_lowercase();
        self.filter_by(|team| team.sport.to_lowercase() == sport)
    }

    /// Teams whose location contains `location`, ignoring case.
    pub fn teams_by_location(&self, location: &str) -> Vec<Team> {
        let location = location.to_lowercase();
        self.filter_by(|team| team.location.to_lowercase().contains(&location))
    }

    /// Number of teams in storage.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count()?)
    }

    /// Aggregates over the current snapshot.
    pub fn statistics(&self) -> TeamStatistics {
        team_statistics(&self.pool.snapshot())
    }

    fn refresh_pool(&self) -> ServiceResult<usize> {
        Ok(self.pool.refresh(|| self.repo.find_all())?)
    }
}
