//! Field and reference validation for team and player drafts.
//!
//! # Responsibility
//! - Check field presence and ranges before any write reaches a repository.
//! - Check player team references against the team repository.
//!
//! # Invariants
//! - Every violated rule is reported; checks never stop at the first failure.
//! - An empty result means the draft is valid.

use crate::model::player::{
    PlayerDraft, MAX_PLAYER_AGE, MAX_PLAYER_RATING, MIN_PLAYER_AGE, MIN_PLAYER_RATING,
};
use crate::model::team::TeamDraft;
use crate::repo::team_repo::{RepoResult, TeamRepository};

/// Returns all rule violations for a team draft.
pub fn validate_team(draft: &TeamDraft) -> Vec<String> {
    let mut errors = Vec::new();

    require_text(&mut errors, &draft.name, "Team name is required");
    require_text(&mut errors, &draft.sport, "Sport is required");
    require_text(&mut errors, &draft.coach, "Coach name is required");
    require_text(&mut errors, &draft.location, "Location is required");

    errors
}

/// Returns all rule violations for a player draft.
///
/// A non-zero `team_id` is resolved through `teams`; lookup failures are
/// returned as errors rather than folded into the violation list.
pub fn validate_player<T>(draft: &PlayerDraft, teams: &T) -> RepoResult<Vec<String>>
where
    T: TeamRepository + ?Sized,
{
    let mut errors = Vec::new();

    require_text(&mut errors, &draft.first_name, "First name is required");
    require_text(&mut errors, &draft.last_name, "Last name is required");
    if !(MIN_PLAYER_AGE..=MAX_PLAYER_AGE).contains(&draft.age) {
        errors.push(format!(
            "Age must be between {MIN_PLAYER_AGE} and {MAX_PLAYER_AGE}"
        ));
    }
    require_text(&mut errors, &draft.position, "Position is required");
    // NaN fails the range check.
    if !(MIN_PLAYER_RATING..=MAX_PLAYER_RATING).contains(&draft.rating) {
        errors.push(format!(
            "Rating must be between {MIN_PLAYER_RATING:.1} and {MAX_PLAYER_RATING:.1}"
        ));
    }

    if let Some(team_id) = draft.team_id.filter(|id| *id != 0) {
        if !teams.exists_by_id(team_id)? {
            errors.push(format!("Team with ID {team_id} does not exist"));
        }
    }

    Ok(errors)
}

fn require_text(errors: &mut Vec<String>, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_player, validate_team};
    use crate::model::player::PlayerDraft;
    use crate::model::team::{Team, TeamDraft, TeamId};
    use crate::repo::team_repo::{RepoError, RepoResult, TeamRepository};

    /// Team lookup stub: knows a fixed set of ids, or fails every call.
    struct KnownTeams {
        ids: Vec<TeamId>,
        broken: bool,
    }

    impl KnownTeams {
        fn with(ids: &[TeamId]) -> Self {
            Self {
                ids: ids.to_vec(),
                broken: false,
            }
        }
    }

    impl TeamRepository for KnownTeams {
        fn save(&self, _draft: &TeamDraft) -> RepoResult<Team> {
            unimplemented!("not used by validation")
        }
        fn find_by_id(&self, _id: TeamId) -> RepoResult<Option<Team>> {
            unimplemented!("not used by validation")
        }
        fn find_all(&self) -> RepoResult<Vec<Team>> {
            unimplemented!("not used by validation")
        }
        fn update(&self, _team: &Team) -> RepoResult<Team> {
            unimplemented!("not used by validation")
        }
        fn delete_by_id(&self, _id: TeamId) -> RepoResult<bool> {
            unimplemented!("not used by validation")
        }
        fn exists_by_id(&self, id: TeamId) -> RepoResult<bool> {
            if self.broken {
                return Err(RepoError::ConnectionPoisoned);
            }
            Ok(self.ids.contains(&id))
        }
        fn count(&self) -> RepoResult<u64> {
            unimplemented!("not used by validation")
        }
        fn find_by_sport(&self, _sport: &str) -> RepoResult<Vec<Team>> {
            unimplemented!("not used by validation")
        }
        fn find_by_location(&self, _location: &str) -> RepoResult<Vec<Team>> {
            unimplemented!("not used by validation")
        }
        fn find_by_coach(&self, _coach: &str) -> RepoResult<Vec<Team>> {
            unimplemented!("not used by validation")
        }
        fn search_by_name(&self, _name_part: &str) -> RepoResult<Vec<Team>> {
            unimplemented!("not used by validation")
        }
    }

    #[test]
    fn valid_team_has_no_errors() {
        let draft = TeamDraft::new("Nova FC", "Football", "A. Ray", "Porto");
        assert!(validate_team(&draft).is_empty());
    }

    #[test]
    fn blank_team_fields_are_all_reported() {
        let draft = TeamDraft::new("  ", "", "\t", "Porto");
        assert_eq!(
            validate_team(&draft),
            vec![
                "Team name is required",
                "Sport is required",
                "Coach name is required",
            ]
        );
    }

    #[test]
    fn player_range_violations_accumulate() {
        let draft = PlayerDraft::new("", "Lee", 15, "Forward", 10.5);
        let errors = validate_player(&draft, &KnownTeams::with(&[])).unwrap();
        assert_eq!(
            errors,
            vec![
                "First name is required",
                "Age must be between 16 and 50",
                "Rating must be between 0.0 and 10.0",
            ]
        );
    }

    #[test]
    fn player_bounds_are_inclusive() {
        let teams = KnownTeams::with(&[]);
        for (age, rating) in [(16, 0.0), (50, 10.0)] {
            let draft = PlayerDraft::new("Sam", "Lee", age, "Forward", rating);
            assert!(validate_player(&draft, &teams).unwrap().is_empty());
        }
    }

    #[test]
    fn nan_rating_is_rejected() {
        let draft = PlayerDraft::new("Sam", "Lee", 20, "Forward", f64::NAN);
        let errors = validate_player(&draft, &KnownTeams::with(&[])).unwrap();
        assert_eq!(errors, vec!["Rating must be between 0.0 and 10.0"]);
    }

    #[test]
    fn unknown_team_reference_is_reported_but_zero_is_free_agent() {
        let teams = KnownTeams::with(&[1]);
        let mut draft = PlayerDraft::new("Sam", "Lee", 24, "Forward", 8.7);

        draft.team_id = Some(999);
        assert_eq!(
            validate_player(&draft, &teams).unwrap(),
            vec!["Team with ID 999 does not exist"]
        );

        draft.team_id = Some(1);
        assert!(validate_player(&draft, &teams).unwrap().is_empty());

        draft.team_id = Some(0);
        assert!(validate_player(&draft, &teams).unwrap().is_empty());
    }

    #[test]
    fn team_lookup_failure_propagates() {
        let teams = KnownTeams {
            ids: Vec::new(),
            broken: true,
        };
        let mut draft = PlayerDraft::new("Sam", "Lee", 24, "Forward", 8.7);
        draft.team_id = Some(3);
        let err = validate_player(&draft, &teams).unwrap_err();
        assert!(matches!(err, RepoError::ConnectionPoisoned));
    }
}
