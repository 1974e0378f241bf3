//! The survey controller: page navigation, validation, capture and reset.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::catalog::{PageCatalog, PageDescriptor, PageKind, FRUSTRATIONS_QUESTION};
use super::error::WizardError;
use super::group::{SelectionChange, SelectionGroup};
use super::identity::{IdentityField, IdentityInputs};
use super::session::{FormSession, FrustrationResponse, GroupResponse, Responses};
use crate::submit::{
    BusyGuard, PendingSubmission, SubmissionPayload, SubmitOutcome, SubmitResponse,
    SubmitTrigger, TransportError,
};

/// Which checks run on forward navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Check identity fields (required values, email and phone format)
    pub identity_fields: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupError {
    pub group: String,
    pub message: String,
}

/// Error indicators currently on display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    group: Option<GroupError>,
    fields: BTreeMap<IdentityField, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.group.is_none() && self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.group = None;
        self.fields.clear();
    }

    pub fn group(&self) -> Option<&GroupError> {
        self.group.as_ref()
    }

    /// Message shown under the named group, if any
    pub fn group_message(&self, name: &str) -> Option<&str> {
        self.group
            .as_ref()
            .filter(|e| e.group == name)
            .map(|e| e.message.as_str())
    }

    pub fn field_message(&self, field: IdentityField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

/// What the front end should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Page currently marked visible
    pub visible_page: usize,
    /// Vertical scroll position of the page body
    pub scroll_offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    /// Validation failed; the page did not change
    Blocked,
    /// Already at the first or last page
    Stayed,
}

pub struct Wizard {
    catalog: Arc<PageCatalog>,
    policy: ValidationPolicy,
    session: FormSession,
    identity: IdentityInputs,
    groups: Vec<SelectionGroup>,
    group_slots: HashMap<String, usize>,
    errors: ValidationErrors,
    view: ViewState,
    trigger: SubmitTrigger,
}

impl Wizard {
    pub fn new(catalog: Arc<PageCatalog>, policy: ValidationPolicy) -> Self {
        let groups: Vec<SelectionGroup> = catalog.groups().map(SelectionGroup::from_config).collect();
        let group_slots = groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name().to_string(), i))
            .collect();
        let session = FormSession::new();
        tracing::debug!(session_id = %session.id(), pages = catalog.total_pages(), "survey started");

        Self {
            catalog,
            policy,
            view: ViewState {
                visible_page: session.current_page,
                scroll_offset: 0,
            },
            session,
            identity: IdentityInputs::default(),
            groups,
            group_slots,
            errors: ValidationErrors::default(),
            trigger: SubmitTrigger::new(),
        }
    }

    /// The 19-page survey with identity checks off
    pub fn standard() -> Self {
        Self::new(Arc::new(PageCatalog::standard()), ValidationPolicy::default())
    }

    pub fn catalog(&self) -> &PageCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn identity(&self) -> &IdentityInputs {
        &self.identity
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn trigger(&self) -> &SubmitTrigger {
        &self.trigger
    }

    pub fn current_page(&self) -> usize {
        self.session.current_page
    }

    pub fn current_descriptor(&self) -> Option<&PageDescriptor> {
        self.catalog.page(self.session.current_page)
    }

    pub fn is_last_page(&self) -> bool {
        self.catalog.is_last(self.session.current_page)
    }

    /// Percentage of the survey reached, 0..=100
    pub fn progress(&self) -> f64 {
        self.session.current_page as f64 / self.catalog.total_pages() as f64 * 100.0
    }

    pub fn groups(&self) -> &[SelectionGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&SelectionGroup> {
        self.group_slots.get(name).map(|&i| &self.groups[i])
    }

    /// Selection group on the current page, if it hosts one
    pub fn current_group(&self) -> Option<&SelectionGroup> {
        self.current_descriptor()
            .and_then(PageDescriptor::group)
            .and_then(|g| self.group(g.name))
    }

    // ─── Navigation ─────────────────────────────────────────────────────────

    /// Move forward to `target`. Runs validation and captures the page
    /// being left.
    pub fn advance_to(&mut self, target: usize) -> Result<Transition, WizardError> {
        self.check_page(target)?;

        if !self.validate_current_page() {
            tracing::debug!(page = self.current_page(), "forward navigation blocked");
            return Ok(Transition::Blocked);
        }
        self.capture_current_page();
        Ok(self.show_page(target))
    }

    /// Move back to `target` without validating or capturing
    pub fn retreat_to(&mut self, target: usize) -> Result<Transition, WizardError> {
        self.check_page(target)?;
        Ok(self.show_page(target))
    }

    pub fn next(&mut self) -> Result<Transition, WizardError> {
        if self.is_last_page() {
            return Ok(Transition::Stayed);
        }
        self.advance_to(self.current_page() + 1)
    }

    pub fn prev(&mut self) -> Result<Transition, WizardError> {
        if self.current_page() == 1 {
            return Ok(Transition::Stayed);
        }
        self.retreat_to(self.current_page() - 1)
    }

    /// Scroll the visible page body; stops at the top and at the last line
    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.page_line_count().saturating_sub(1);
        self.view.scroll_offset = self
            .view
            .scroll_offset
            .saturating_add_signed(delta)
            .min(max);
    }

    /// Lines of scrollable text on the current page: title, blank line, body,
    /// and on the last page a blank line plus the submit trigger
    pub fn page_line_count(&self) -> usize {
        match self.current_descriptor().map(|d| &d.kind) {
            Some(PageKind::Info { body, .. }) => {
                let trigger = if self.is_last_page() { 2 } else { 0 };
                2 + body.len() + trigger
            }
            _ => 0,
        }
    }

    fn check_page(&self, page: usize) -> Result<(), WizardError> {
        if self.catalog.contains(page) {
            Ok(())
        } else {
            Err(WizardError::PageOutOfRange {
                page,
                total: self.catalog.total_pages(),
            })
        }
    }

    fn show_page(&mut self, target: usize) -> Transition {
        let from = self.session.current_page;
        self.session.current_page = target;
        self.view = ViewState {
            visible_page: target,
            scroll_offset: 0,
        };
        tracing::debug!(from, to = target, progress = self.progress(), "page changed");
        Transition::Moved { from, to: target }
    }

    // ─── Validation and capture ─────────────────────────────────────────────

    /// Check the current page, replacing any error indicators on display
    pub fn validate_current_page(&mut self) -> bool {
        self.errors.clear();

        let catalog = Arc::clone(&self.catalog);
        match catalog.page(self.session.current_page).map(|p| &p.kind) {
            Some(PageKind::Identity) if self.policy.identity_fields => {
                let problems = self.identity.check();
                if problems.is_empty() {
                    return true;
                }
                self.errors.fields = problems
                    .into_iter()
                    .map(|(field, msg)| (field, msg.to_string()))
                    .collect();
                false
            }
            Some(PageKind::Question(config)) => {
                let selected = self.group(config.name).map_or(0, SelectionGroup::selected_count);
                let max = config.max_selections();
                if selected > 0 && selected > max {
                    self.errors.group = Some(GroupError {
                        group: config.name.to_string(),
                        message: format!("Please select up to {} options", max),
                    });
                    return false;
                }
                true
            }
            _ => true,
        }
    }

    /// Copy what the current page shows into the session
    pub fn capture_current_page(&mut self) {
        let catalog = Arc::clone(&self.catalog);
        match catalog.page(self.session.current_page).map(|p| &p.kind) {
            Some(PageKind::Identity) => {
                self.session.personal_info = self.identity.capture();
            }
            Some(PageKind::Question(config)) => {
                if let Some(response) = self.group_response(config.name, config.title) {
                    self.session
                        .responses
                        .groups
                        .insert(config.name.to_string(), response);
                }
            }
            Some(PageKind::Rating) => {
                self.session.responses.frustrations = Some(self.frustration_response());
            }
            Some(PageKind::Info { .. }) | None => {}
        }
    }

    /// Rebuild every group's response and the rating block, whether or not
    /// the page was visited
    pub fn collect_all_responses(&mut self) {
        let groups = self
            .catalog
            .groups()
            .filter_map(|config| {
                self.group_response(config.name, config.title)
                    .map(|r| (config.name.to_string(), r))
            })
            .collect();

        self.session.responses = Responses {
            groups,
            frustrations: Some(self.frustration_response()),
        };
    }

    fn group_response(&self, name: &str, title: &str) -> Option<GroupResponse> {
        self.group(name).map(|group| GroupResponse {
            question: title.to_string(),
            answers: group.answers(),
        })
    }

    fn frustration_response(&self) -> FrustrationResponse {
        FrustrationResponse {
            question: FRUSTRATIONS_QUESTION.to_string(),
            ratings: self.session.ratings.entries(),
        }
    }

    // ─── Input events ───────────────────────────────────────────────────────

    pub fn toggle_option(
        &mut self,
        group: &str,
        index: usize,
    ) -> Result<SelectionChange, WizardError> {
        self.group_mut(group)?.toggle(index)
    }

    pub fn set_option_checked(
        &mut self,
        group: &str,
        index: usize,
        checked: bool,
    ) -> Result<(), WizardError> {
        self.group_mut(group)?.set_checked(index, checked)
    }

    /// Click star `value` on rating `track`; returns the new rating
    pub fn rate(&mut self, track: usize, value: u8) -> Result<u8, WizardError> {
        self.session.ratings.click(track, value)
    }

    pub fn set_identity(&mut self, field: IdentityField, value: impl Into<String>) {
        self.identity.set(field, value);
    }

    fn group_mut(&mut self, name: &str) -> Result<&mut SelectionGroup, WizardError> {
        match self.group_slots.get(name) {
            Some(&i) => Ok(&mut self.groups[i]),
            None => Err(WizardError::UnknownGroup(name.to_string())),
        }
    }

    // ─── Reset and submission ───────────────────────────────────────────────

    /// Clear every input and start a fresh session on page 1
    pub fn reset(&mut self) {
        self.identity.clear();
        for group in &mut self.groups {
            group.reset();
        }
        self.errors.clear();

        let previous = self.session.id();
        self.session = FormSession::new();
        self.show_page(1);
        self.trigger.restore();
        tracing::info!(%previous, session_id = %self.session.id(), "survey reset");
    }

    /// Validate the current page, capture everything and claim the trigger.
    ///
    /// Returns the outcome directly when nothing should be sent.
    pub fn begin_submission(&mut self) -> Result<PendingSubmission, SubmitOutcome> {
        if self.trigger.is_busy() {
            tracing::warn!("submission already in flight");
            return Err(SubmitOutcome::AlreadyInFlight);
        }
        if !self.validate_current_page() {
            return Err(SubmitOutcome::Blocked);
        }

        self.capture_current_page();
        self.collect_all_responses();

        let guard = self.trigger.begin().ok_or(SubmitOutcome::AlreadyInFlight)?;
        let payload = SubmissionPayload::from_session(&self.session);
        tracing::info!(
            session_id = %self.session.id(),
            groups = payload.responses.groups.len(),
            "submission prepared"
        );
        Ok(PendingSubmission::new(payload, guard))
    }

    /// Apply the endpoint's reply and release the trigger
    pub fn finish_submission(
        &mut self,
        guard: BusyGuard,
        result: Result<SubmitResponse, TransportError>,
    ) -> SubmitOutcome {
        let outcome = match result {
            Ok(response) if response.success => {
                tracing::info!(
                    session_id = %self.session.id(),
                    submission_id = ?response.submission_id,
                    message = ?response.message,
                    "submission accepted"
                );
                self.reset();
                SubmitOutcome::Accepted {
                    submission_id: response.submission_id,
                    message: response.message,
                }
            }
            Ok(response) => {
                let error = response
                    .error
                    .unwrap_or_else(|| "unknown error".to_string());
                tracing::warn!(session_id = %self.session.id(), %error, "submission rejected");
                SubmitOutcome::Rejected { error }
            }
            Err(err) => {
                tracing::error!(session_id = %self.session.id(), error = %err, "submission failed");
                SubmitOutcome::Failed {
                    message: err.to_string(),
                }
            }
        };

        drop(guard);
        outcome
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::standard()
    }
}
