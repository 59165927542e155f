use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateUpdate};
use crate::models::pagination::Page;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub photo: Option<String>,
    pub current_position: Option<String>,
    pub education: Option<String>,
    pub resume: Option<String>,
    pub bio: Option<String>,
}

impl From<UpdateCandidatePayload> for CandidateUpdate {
    fn from(payload: UpdateCandidatePayload) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            photo: payload.photo,
            current_position: payload.current_position,
            education: payload.education,
            resume: payload.resume,
            bio: payload.bio,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SkillsPayload {
    #[validate(length(min = 1, message = "at least one skill is required"))]
    pub skills: Vec<String>,
}

impl SkillsPayload {
    /// Trimmed skill names; a blank name rejects the whole payload.
    pub fn into_names(self) -> Result<Vec<String>> {
        self.skills
            .into_iter()
            .map(|name| {
                let name = name.trim();
                if name.is_empty() {
                    Err(Error::InvalidInput("skill names must not be blank".to_string()))
                } else {
                    Ok(name.to_string())
                }
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<Candidate>,
    pub count: i64,
}

impl From<Page<Candidate>> for CandidateListResponse {
    fn from(page: Page<Candidate>) -> Self {
        Self {
            candidates: page.items,
            count: page.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_stay_absent() {
        let payload: UpdateCandidatePayload =
            serde_json::from_str(r#"{"bio": "Backend engineer"}"#).unwrap();
        let update = CandidateUpdate::from(payload);
        assert_eq!(update.bio.as_deref(), Some("Backend engineer"));
        assert_eq!(update.first_name, None);
        assert_eq!(update.resume, None);
    }

    #[test]
    fn skill_names_are_trimmed() {
        let payload = SkillsPayload {
            skills: vec![" rust ".into(), "go".into()],
        };
        assert_eq!(payload.into_names().unwrap(), vec!["rust", "go"]);
    }

    #[test]
    fn blank_skill_name_is_invalid_input() {
        let payload = SkillsPayload {
            skills: vec!["rust".into(), "  ".into()],
        };
        assert!(matches!(payload.into_names(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn empty_skill_list_is_rejected() {
        let payload = SkillsPayload { skills: vec![] };
        assert!(payload.validate().is_err());
    }
}
