//! Player entity.
//!
//! # Invariants
//! - `team_id == None` and `team_id == Some(0)` both mean free agent.

use super::team::TeamId;
use super::Entity;
use serde::{Deserialize, Serialize};

/// Store-assigned player identifier.
pub type PlayerId = i32;

/// Inclusive age bounds accepted by validation.
pub const MIN_PLAYER_AGE: i32 = 16;
pub const MAX_PLAYER_AGE: i32 = 50;

/// Inclusive rating bounds accepted by validation.
pub const MIN_PLAYER_RATING: f64 = 0.0;
pub const MAX_PLAYER_RATING: f64 = 10.0;

/// Caller-supplied player fields used for create and validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub position: String,
    pub rating: f64,
    pub team_id: Option<TeamId>,
    pub jersey_number: Option<i32>,
}

impl PlayerDraft {
    /// Creates an unassigned draft from all required fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
        position: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            position: position.into(),
            rating,
            team_id: None,
            jersey_number: None,
        }
    }
}

/// Persisted player record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub position: String,
    pub rating: f64,
    pub team_id: Option<TeamId>,
    pub jersey_number: Option<i32>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Player {
    /// Returns `"{first_name} {last_name}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns whether the player has no team reference.
    pub fn is_free_agent(&self) -> bool {
        matches!(self.team_id, None | Some(0))
    }

    /// Returns the editable fields of this player.
    pub fn to_draft(&self) -> PlayerDraft {
        PlayerDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            age: self.age,
            position: self.position.clone(),
            rating: self.rating,
            team_id: self.team_id,
            jersey_number: self.jersey_number,
        }
    }

    /// Overwrites the editable fields with the draft values.
    pub fn apply(&mut self, draft: PlayerDraft) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.age = draft.age;
        self.position = draft.position;
        self.rating = draft.rating;
        self.team_id = draft.team_id;
        self.jersey_number = draft.jersey_number;
    }
}

impl Entity for Player {
    const KIND: &'static str = "Player";

    fn id(&self) -> i32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::{Player, PlayerDraft};

    fn player(team_id: Option<i32>) -> Player {
        Player {
            id: 7,
            first_name: "Sam".to_string(),
            last_name: "Lee".to_string(),
            age: 24,
            position: "Forward".to_string(),
            rating: 8.7,
            team_id,
            jersey_number: Some(9),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn zero_and_missing_team_are_free_agents() {
        assert!(player(None).is_free_agent());
        assert!(player(Some(0)).is_free_agent());
        assert!(!player(Some(3)).is_free_agent());
    }

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(player(None).full_name(), "Sam Lee");
    }

    #[test]
    fn apply_replaces_every_editable_field() {
        let mut target = player(Some(1));
        let draft = PlayerDraft::new("Ana", "Diaz", 30, "Keeper", 7.5);
        target.apply(draft.clone());
        assert_eq!(target.to_draft(), draft);
        assert_eq!(target.id, 7);
    }
}
