//! Wire shapes for the submission endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::survey::rating::RatingEntry;
use crate::survey::session::{FormSession, GroupResponse, PersonalInfo};

/// Request body: `{ personalInfo, responses }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub personal_info: PersonalInfo,
    pub responses: PayloadResponses,
}

/// Group responses with the rating block reduced to its ratings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadResponses {
    #[serde(flatten)]
    pub groups: BTreeMap<String, GroupResponse>,
    pub frustrations: RatingsBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingsBody {
    pub ratings: Vec<RatingEntry>,
}

impl SubmissionPayload {
    /// Build the body from a session. The `frustrations` entry always
    /// reflects the live ratings and never carries a question text.
    pub fn from_session(session: &FormSession) -> Self {
        Self {
            personal_info: session.personal_info.clone(),
            responses: PayloadResponses {
                groups: session.responses.groups.clone(),
                frustrations: RatingsBody {
                    ratings: session.ratings.entries(),
                },
            },
        }
    }
}

/// Endpoint reply. Only `success` and `error` drive behaviour; the rest is
/// logged when the server sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub submission_id: Option<i64>,
}
