//! Team entity.

use super::Entity;
use serde::{Deserialize, Serialize};

/// Store-assigned team identifier.
pub type TeamId = i32;

/// Caller-supplied team fields used for create and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDraft {
    pub name: String,
    pub sport: String,
    pub coach: String,
    pub location: String,
    pub founded_year: Option<i32>,
}

impl TeamDraft {
    /// Creates a draft from all required fields; `founded_year` starts unset.
    pub fn new(
        name: impl Into<String>,
        sport: impl Into<String>,
        coach: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sport: sport.into(),
            coach: coach.into(),
            location: location.into(),
            founded_year: None,
        }
    }
}

/// Persisted team record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub sport: String,
    pub coach: String,
    pub location: String,
    pub founded_year: Option<i32>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Team {
    /// Returns the editable fields of this team.
    pub fn to_draft(&self) -> TeamDraft {
        TeamDraft {
            name: self.name.clone(),
            sport: self.sport.clone(),
            coach: self.coach.clone(),
            location: self.location.clone(),
            founded_year: self.founded_year,
        }
    }

    /// Overwrites the editable fields with the draft values.
    pub fn apply(&mut self, draft: TeamDraft) {
        self.name = draft.name;
        self.sport = draft.sport;
        self.coach = draft.coach;
        self.location = draft.location;
        self.founded_year = draft.founded_year;
    }
}

impl Entity for Team {
    const KIND: &'static str = "Team";

    fn id(&self) -> i32 {
        self.id
    }
}
