//! Six-track star rating for the frustration page.

use serde::{Deserialize, Serialize};

use super::catalog::FRUSTRATION_TITLES;
use super::error::WizardError;

pub const TRACK_COUNT: usize = FRUSTRATION_TITLES.len();
pub const MAX_STARS: u8 = 5;
pub const FILLED_STAR: char = '★';
pub const UNFILLED_STAR: char = '☆';

/// One rated struggle as it is submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub title: String,
    pub value: u8,
}

/// Per-track ratings; 0 means unrated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrustrationRatings {
    values: [u8; TRACK_COUNT],
}

impl FrustrationRatings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, track: usize) -> Option<u8> {
        self.values.get(track).copied()
    }

    pub fn values(&self) -> &[u8; TRACK_COUNT] {
        &self.values
    }

    /// Click on star `value` of `track`. Clicking the value already set
    /// clears the track. Returns the track's new rating.
    pub fn click(&mut self, track: usize, value: u8) -> Result<u8, WizardError> {
        if !(1..=MAX_STARS).contains(&value) {
            return Err(WizardError::RatingOutOfRange(value));
        }
        let slot = self
            .values
            .get_mut(track)
            .ok_or(WizardError::RatingTrackOutOfRange(track))?;

        *slot = if *slot == value { 0 } else { value };
        Ok(*slot)
    }

    pub fn reset(&mut self) {
        self.values = [0; TRACK_COUNT];
    }

    /// Ratings paired with their struggle titles, in track order
    pub fn entries(&self) -> Vec<RatingEntry> {
        FRUSTRATION_TITLES
            .iter()
            .zip(self.values)
            .map(|(title, value)| RatingEntry {
                title: (*title).to_string(),
                value,
            })
            .collect()
    }
}

/// Companion label for a rating
pub fn rating_label(rating: u8) -> String {
    match rating {
        0 => "0 rated".to_string(),
        1 => "1 star".to_string(),
        n => format!("{} stars", n),
    }
}

/// Star row for a rating: filled up to `rating`, unfilled after
pub fn star_row(rating: u8) -> String {
    (0..MAX_STARS)
        .map(|i| if i < rating { FILLED_STAR } else { UNFILLED_STAR })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_sets_value() {
        let mut ratings = FrustrationRatings::new();
        assert_eq!(ratings.click(0, 4).unwrap(), 4);
        assert_eq!(ratings.get(0), Some(4));
        assert_eq!(ratings.get(1), Some(0));
    }

    #[test]
    fn test_click_same_value_toggles_off() {
        let mut ratings = FrustrationRatings::new();
        ratings.click(2, 3).unwrap();
        assert_eq!(ratings.click(2, 3).unwrap(), 0);
        assert_eq!(ratings.get(2), Some(0));
    }

    #[test]
    fn test_click_other_value_replaces() {
        let mut ratings = FrustrationRatings::new();
        ratings.click(5, 2).unwrap();
        assert_eq!(ratings.click(5, 5).unwrap(), 5);
        assert_eq!(ratings.get(5), Some(5));
    }

    #[test]
    fn test_click_rejects_bad_input() {
        let mut ratings = FrustrationRatings::new();
        assert_eq!(
            ratings.click(0, 0).unwrap_err(),
            WizardError::RatingOutOfRange(0)
        );
        assert_eq!(
            ratings.click(0, 6).unwrap_err(),
            WizardError::RatingOutOfRange(6)
        );
        assert_eq!(
            ratings.click(6, 1).unwrap_err(),
            WizardError::RatingTrackOutOfRange(6)
        );
        assert_eq!(ratings, FrustrationRatings::new());
    }

    #[test]
    fn test_rating_label_law() {
        assert_eq!(rating_label(0), "0 rated");
        assert_eq!(rating_label(1), "1 star");
        for r in 2..=5 {
            assert_eq!(rating_label(r), format!("{} stars", r));
        }
    }

    #[test]
    fn test_star_row() {
        assert_eq!(star_row(0), "☆☆☆☆☆");
        assert_eq!(star_row(3), "★★★☆☆");
        assert_eq!(star_row(5), "★★★★★");
    }

    #[test]
    fn test_entries_follow_catalog_order() {
        let mut ratings = FrustrationRatings::new();
        ratings.click(1, 2).unwrap();
        let entries = ratings.entries();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].title, "No event buddies");
        assert_eq!(entries[1].value, 2);
        assert_eq!(entries[5].title, "Feeling isolated in a new place");
    }

    #[test]
    fn test_reset() {
        let mut ratings = FrustrationRatings::new();
        ratings.click(0, 5).unwrap();
        ratings.click(3, 1).unwrap();
        ratings.reset();
        assert_eq!(ratings.values(), &[0; 6]);
    }
}
