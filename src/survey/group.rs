//! Live selection state for one question group.
//!
//! Mirrors what the form shows for each option (checked, disabled, active,
//! highlight) and keeps the group's cap enforced while the user interacts.

use std::time::{Duration, Instant};

use super::catalog::{OptionStyle, QuestionGroupConfig, SelectionMode};
use super::error::WizardError;
use super::session::Answer;

/// How long an option stays highlighted after it changes
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Glyph shown on icon-style options
pub const ICON_CHECKED: &str = "check";
pub const ICON_UNCHECKED: &str = "add";

/// Counter colouring relative to the cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    BelowLimit,
    AtLimit,
}

/// Result of a user interaction on one option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Checked,
    Unchecked,
    /// Option is disabled because the group is at its cap
    Rejected,
}

#[derive(Debug, Clone)]
pub struct OptionState {
    pub value: String,
    pub label: Option<String>,
    pub checked: bool,
    pub disabled: bool,
    pub active: bool,
    highlighted_at: Option<Instant>,
}

impl OptionState {
    fn new(value: &str, label: Option<&str>) -> Self {
        Self {
            value: value.to_string(),
            label: label.map(str::to_string),
            checked: false,
            disabled: false,
            active: false,
            highlighted_at: None,
        }
    }

    /// Display text, falling back to the value
    pub fn text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }

    pub fn aria_checked(&self) -> bool {
        self.active
    }

    pub fn icon(&self) -> &'static str {
        if self.checked {
            ICON_CHECKED
        } else {
            ICON_UNCHECKED
        }
    }

    pub fn is_highlighted(&self, now: Instant) -> bool {
        self.highlighted_at
            .map(|at| now.saturating_duration_since(at) < HIGHLIGHT_DURATION)
            .unwrap_or(false)
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
        self.active = checked;
    }

    fn clear(&mut self) {
        self.checked = false;
        self.disabled = false;
        self.active = false;
        self.highlighted_at = None;
    }
}

#[derive(Debug, Clone)]
pub struct SelectionGroup {
    name: String,
    mode: SelectionMode,
    style: OptionStyle,
    max: usize,
    options: Vec<OptionState>,
}

impl SelectionGroup {
    pub fn from_config(config: &QuestionGroupConfig) -> Self {
        Self {
            name: config.name.to_string(),
            mode: config.mode,
            style: config.style,
            max: config.max_selections(),
            options: config
                .options
                .iter()
                .map(|o| OptionState::new(o.value, o.label))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn style(&self) -> OptionStyle {
        self.style
    }

    pub fn max_selections(&self) -> usize {
        self.max
    }

    pub fn options(&self) -> &[OptionState] {
        &self.options
    }

    pub fn selected_count(&self) -> usize {
        self.options.iter().filter(|o| o.checked).count()
    }

    pub fn counter_text(&self) -> String {
        self.selected_count().to_string()
    }

    pub fn urgency(&self) -> Urgency {
        if self.selected_count() >= self.max {
            Urgency::AtLimit
        } else {
            Urgency::BelowLimit
        }
    }

    /// Click on an option.
    ///
    /// Multi-select options flip; disabled options refuse the click.
    /// Single-select options always end up as the only checked option.
    pub fn toggle(&mut self, index: usize) -> Result<SelectionChange, WizardError> {
        self.check_index(index)?;

        let change = match self.mode {
            SelectionMode::Multi => {
                let option = &mut self.options[index];
                if option.disabled && !option.checked {
                    return Ok(SelectionChange::Rejected);
                }
                let checked = !option.checked;
                option.set_checked(checked);
                if checked {
                    SelectionChange::Checked
                } else {
                    SelectionChange::Unchecked
                }
            }
            SelectionMode::Single => {
                for (i, option) in self.options.iter_mut().enumerate() {
                    option.set_checked(i == index);
                }
                SelectionChange::Checked
            }
        };

        self.options[index].highlighted_at = Some(Instant::now());
        self.refresh_limits();
        tracing::trace!(group = %self.name, index, ?change, "option toggled");
        Ok(change)
    }

    /// Write the checked state directly, bypassing the interaction cap.
    ///
    /// Validation is what rejects an over-full group on this path.
    pub fn set_checked(&mut self, index: usize, checked: bool) -> Result<(), WizardError> {
        self.check_index(index)?;
        self.options[index].set_checked(checked);
        self.refresh_limits();
        Ok(())
    }

    /// Checked options in display order
    pub fn answers(&self) -> Vec<Answer> {
        self.options
            .iter()
            .filter(|o| o.checked)
            .map(|o| Answer {
                value: o.value.clone(),
                text: o.text().to_string(),
            })
            .collect()
    }

    pub fn reset(&mut self) {
        for option in &mut self.options {
            option.clear();
        }
    }

    fn check_index(&self, index: usize) -> Result<(), WizardError> {
        if index < self.options.len() {
            Ok(())
        } else {
            Err(WizardError::OptionOutOfRange {
                group: self.name.clone(),
                index,
                len: self.options.len(),
            })
        }
    }

    /// Re-derive disabled flags from the count. Single-select groups stay
    /// switchable; exclusivity already holds them to one.
    fn refresh_limits(&mut self) {
        let at_limit = self.selected_count() >= self.max;
        let lock = self.mode == SelectionMode::Multi && at_limit;
        for option in &mut self.options {
            option.disabled = lock && !option.checked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::catalog::PageCatalog;

    fn group(name: &str) -> SelectionGroup {
        let catalog = PageCatalog::standard();
        SelectionGroup::from_config(catalog.group_by_name(name).unwrap())
    }

    #[test]
    fn test_multi_select_disables_at_cap() {
        let mut g = group("weekend"); // 5 options, cap 3
        assert_eq!(g.max_selections(), 3);

        g.toggle(0).unwrap();
        g.toggle(1).unwrap();
        assert_eq!(g.urgency(), Urgency::BelowLimit);
        assert!(g.options().iter().all(|o| !o.disabled));

        g.toggle(2).unwrap();
        assert_eq!(g.counter_text(), "3");
        assert_eq!(g.urgency(), Urgency::AtLimit);
        assert!(g.options()[3].disabled);
        assert!(g.options()[4].disabled);
        assert!(!g.options()[0].disabled);

        assert_eq!(g.toggle(3).unwrap(), SelectionChange::Rejected);
        assert_eq!(g.selected_count(), 3);
    }

    #[test]
    fn test_multi_select_reenables_below_cap() {
        let mut g = group("safety"); // 4 options, cap 2
        g.toggle(0).unwrap();
        g.toggle(1).unwrap();
        assert!(g.options()[2].disabled);

        assert_eq!(g.toggle(1).unwrap(), SelectionChange::Unchecked);
        assert!(g.options().iter().all(|o| !o.disabled));
        assert_eq!(g.urgency(), Urgency::BelowLimit);
    }

    #[test]
    fn test_single_select_is_exclusive() {
        let mut g = group("new_things");
        g.toggle(0).unwrap();
        g.toggle(2).unwrap();

        let checked: Vec<bool> = g.options().iter().map(|o| o.checked).collect();
        assert_eq!(checked, vec![false, false, true]);
        let active: Vec<bool> = g.options().iter().map(|o| o.aria_checked()).collect();
        assert_eq!(active, vec![false, false, true]);
        assert_eq!(g.urgency(), Urgency::AtLimit);
        // Switching stays possible
        assert!(g.options().iter().all(|o| !o.disabled));
        assert_eq!(g.toggle(1).unwrap(), SelectionChange::Checked);
        assert_eq!(g.selected_count(), 1);
    }

    #[test]
    fn test_icon_follows_checked_state() {
        let mut g = group("vibe");
        assert_eq!(g.style(), OptionStyle::Icon);
        assert_eq!(g.options()[0].icon(), ICON_UNCHECKED);
        g.toggle(0).unwrap();
        assert_eq!(g.options()[0].icon(), ICON_CHECKED);
        assert!(g.options()[0].active);
    }

    #[test]
    fn test_toggle_replays_highlight() {
        let mut g = group("vibe");
        g.toggle(3).unwrap();
        let now = Instant::now();
        assert!(g.options()[3].is_highlighted(now));
        assert!(!g.options()[3].is_highlighted(now + HIGHLIGHT_DURATION));
        assert!(!g.options()[0].is_highlighted(now));
    }

    #[test]
    fn test_set_checked_can_exceed_cap() {
        let mut g = group("safety");
        for i in 0..3 {
            g.set_checked(i, true).unwrap();
        }
        assert_eq!(g.selected_count(), 3);
        assert!(g.options()[3].disabled);
    }

    #[test]
    fn test_answers_fall_back_to_value() {
        let mut g = group("features");
        g.toggle(6).unwrap(); // "reviews" has no label
        g.toggle(0).unwrap();
        let answers = g.answers();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].value, "matching");
        assert_eq!(answers[0].text, "Interest-based matching");
        assert_eq!(answers[1].value, "reviews");
        assert_eq!(answers[1].text, "reviews");
    }

    #[test]
    fn test_out_of_range_index() {
        let mut g = group("safety");
        assert!(matches!(
            g.toggle(4),
            Err(WizardError::OptionOutOfRange { index: 4, len: 4, .. })
        ));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut g = group("safety");
        g.toggle(0).unwrap();
        g.toggle(1).unwrap();
        g.reset();
        assert_eq!(g.selected_count(), 0);
        assert_eq!(g.counter_text(), "0");
        assert!(g
            .options()
            .iter()
            .all(|o| !o.checked && !o.disabled && !o.active && o.icon() == ICON_UNCHECKED));
    }
}
