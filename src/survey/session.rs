//! Answer accumulator for one attempt at the survey.
//!
//! A `FormSession` is created when the wizard starts and replaced wholesale
//! on reset, so every attempt gets its own id for log correlation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rating::{FrustrationRatings, RatingEntry};

/// One checked option as it is recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub value: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupResponse {
    pub question: String,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrustrationResponse {
    pub question: String,
    pub ratings: Vec<RatingEntry>,
}

/// Captured identity fields. Unset fields are omitted when serialized, so a
/// fresh value serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
}

impl PersonalInfo {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Responses keyed by group name, plus the rating block under
/// `frustrations`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Responses {
    #[serde(flatten)]
    pub groups: BTreeMap<String, GroupResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frustrations: Option<FrustrationResponse>,
}

impl Responses {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.frustrations.is_none()
    }

    pub fn group(&self, name: &str) -> Option<&GroupResponse> {
        self.groups.get(name)
    }
}

#[derive(Debug, Clone)]
pub struct FormSession {
    id: Uuid,
    pub current_page: usize,
    pub personal_info: PersonalInfo,
    pub responses: Responses,
    pub ratings: FrustrationRatings,
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            current_page: 1,
            personal_info: PersonalInfo::default(),
            responses: Responses::default(),
            ratings: FrustrationRatings::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}
