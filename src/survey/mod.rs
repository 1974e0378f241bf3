//! Survey model: page catalog, per-page input state and the wizard that
//! drives them.

pub mod catalog;
mod error;
pub mod group;
pub mod identity;
pub mod rating;
pub mod session;
mod wizard;

pub use catalog::{PageCatalog, PageDescriptor, PageKind, QuestionGroupConfig, SelectionMode};
pub use error::WizardError;
pub use group::{SelectionChange, SelectionGroup, Urgency};
pub use identity::{IdentityField, IdentityInputs};
pub use rating::FrustrationRatings;
pub use session::{FormSession, PersonalInfo, Responses};
pub use wizard::{GroupError, Transition, ValidationErrors, ValidationPolicy, ViewState, Wizard};
