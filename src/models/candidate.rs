use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::interview::InterviewResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub public_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub current_position: Option<String>,
    pub resume: Option<String>,
    pub bio: Option<String>,
    pub education: Option<String>,
    pub photo: Option<String>,
    pub skills: Vec<String>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interviews: Vec<Interview>,
}

/// Interview reference attached to a candidate profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub public_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<InterviewResult>,
}

impl Interview {
    pub fn reference(public_id: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            results: None,
        }
    }
}

/// Partial profile update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo: Option<String>,
    pub current_position: Option<String>,
    pub education: Option<String>,
    pub resume: Option<String>,
    pub bio: Option<String>,
}

impl CandidateUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.photo.is_none()
            && self.current_position.is_none()
            && self.education.is_none()
            && self.resume.is_none()
            && self.bio.is_none()
    }
}
