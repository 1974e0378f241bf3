//! Identity page inputs.
//!
//! Holds the raw text of each field as typed. Capturing trims the free-text
//! fields (name, email, phone) and copies the rest verbatim. Field checks
//! exist but only run when enabled in configuration; by default the identity
//! page always passes.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::session::PersonalInfo;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern must be a valid regex")
});

const MIN_PHONE_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentityField {
    Name,
    Gender,
    Age,
    City,
    Email,
    Phone,
    Occupation,
}

impl IdentityField {
    pub fn all() -> &'static [IdentityField] {
        &[
            IdentityField::Name,
            IdentityField::Gender,
            IdentityField::Age,
            IdentityField::City,
            IdentityField::Email,
            IdentityField::Phone,
            IdentityField::Occupation,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdentityField::Name => "Full name",
            IdentityField::Gender => "Gender",
            IdentityField::Age => "Age",
            IdentityField::City => "City",
            IdentityField::Email => "Email",
            IdentityField::Phone => "Phone (optional)",
            IdentityField::Occupation => "Occupation",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityInputs {
    values: [String; 7],
}

impl IdentityInputs {
    pub fn get(&self, field: IdentityField) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: IdentityField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn clear(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
    }

    pub fn capture(&self) -> PersonalInfo {
        PersonalInfo {
            name: Some(self.get(IdentityField::Name).trim().to_string()),
            gender: Some(self.get(IdentityField::Gender).to_string()),
            age: Some(self.get(IdentityField::Age).to_string()),
            city: Some(self.get(IdentityField::City).to_string()),
            email: Some(self.get(IdentityField::Email).trim().to_string()),
            phone: Some(self.get(IdentityField::Phone).trim().to_string()),
            occupation: Some(self.get(IdentityField::Occupation).to_string()),
        }
    }

    /// Field-level problems, keyed by field. Empty when everything passes.
    pub fn check(&self) -> BTreeMap<IdentityField, &'static str> {
        let mut errors = BTreeMap::new();

        if self.get(IdentityField::Name).trim().is_empty() {
            errors.insert(IdentityField::Name, "Please enter your name");
        }
        if self.get(IdentityField::Gender).is_empty() {
            errors.insert(IdentityField::Gender, "Please select your gender");
        }
        if self.get(IdentityField::Age).is_empty() {
            errors.insert(IdentityField::Age, "Please select your age range");
        }
        if self.get(IdentityField::City).is_empty() {
            errors.insert(IdentityField::City, "Please enter your city");
        }
        if !is_valid_email(self.get(IdentityField::Email).trim()) {
            errors.insert(IdentityField::Email, "Please enter a valid email address");
        }
        let phone = self.get(IdentityField::Phone).trim();
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.insert(IdentityField::Phone, "Please enter a valid phone number");
        }
        if self.get(IdentityField::Occupation).is_empty() {
            errors.insert(IdentityField::Occupation, "Please enter your occupation");
        }

        errors
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().count() >= MIN_PHONE_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> IdentityInputs {
        let mut inputs = IdentityInputs::default();
        inputs.set(IdentityField::Name, "  Ada Lovelace ");
        inputs.set(IdentityField::Gender, "female");
        inputs.set(IdentityField::Age, "25-34");
        inputs.set(IdentityField::City, "London");
        inputs.set(IdentityField::Email, " ada@example.com  ");
        inputs.set(IdentityField::Phone, " 5550101234 ");
        inputs.set(IdentityField::Occupation, "Engineer");
        inputs
    }

    #[test]
    fn test_capture_trims_free_text() {
        let info = filled().capture();
        assert_eq!(info.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(info.email.as_deref(), Some("ada@example.com"));
        assert_eq!(info.phone.as_deref(), Some("5550101234"));
        assert_eq!(info.city.as_deref(), Some("London"));
        assert_eq!(info.age.as_deref(), Some("25-34"));
    }

    #[test]
    fn test_capture_keeps_other_fields_verbatim() {
        let mut inputs = filled();
        inputs.set(IdentityField::City, " Leeds ");
        assert_eq!(inputs.capture().city.as_deref(), Some(" Leeds "));
    }

    #[test]
    fn test_check_passes_complete_input() {
        assert!(filled().check().is_empty());
    }

    #[test]
    fn test_check_flags_missing_and_malformed() {
        let mut inputs = filled();
        inputs.set(IdentityField::Name, "   ");
        inputs.set(IdentityField::Email, "not-an-email");
        inputs.set(IdentityField::Phone, "123");
        let errors = inputs.check();
        assert_eq!(
            errors.keys().copied().collect::<Vec<_>>(),
            vec![
                IdentityField::Name,
                IdentityField::Email,
                IdentityField::Phone
            ]
        );
    }

    #[test]
    fn test_phone_is_optional() {
        let mut inputs = filled();
        inputs.set(IdentityField::Phone, "");
        assert!(inputs.check().is_empty());
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_clear() {
        let mut inputs = filled();
        inputs.clear();
        assert_eq!(inputs, IdentityInputs::default());
        for field in IdentityField::all() {
            assert_eq!(inputs.get(*field), "");
        }
    }
}
