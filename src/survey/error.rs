//! Errors raised by the wizard state machine.
//!
//! Validation failures are not errors: they block navigation and surface
//! inline through [`super::ValidationErrors`]. These variants cover calls the
//! front end should never make (bad page numbers, unknown groups, ratings
//! outside the star range).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("page {page} is outside 1..={total}")]
    PageOutOfRange { page: usize, total: usize },

    #[error("question group '{0}' is not configured")]
    UnknownGroup(String),

    #[error("question group '{0}' is configured more than once")]
    DuplicateGroup(String),

    #[error("question group name '{0}' is reserved for the rating page")]
    ReservedGroupName(String),

    #[error("option {index} does not exist in group '{group}' ({len} options)")]
    OptionOutOfRange {
        group: String,
        index: usize,
        len: usize,
    },

    #[error("rating track {0} does not exist")]
    RatingTrackOutOfRange(usize),

    #[error("rating {0} is outside 1..=5")]
    RatingOutOfRange(u8),

    #[error("page catalog is empty")]
    EmptyCatalog,
}
