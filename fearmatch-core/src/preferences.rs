//! Coarse, persisted user preferences consumed by the scorer.

use serde::{Deserialize, Serialize};

use crate::{CostRange, DifficultyLevel, Environment, LocationId, Ordinal, TimeCommitment};

/// A user's persisted preferences with every field resolved.
///
/// Missing collaborator fields are filled from [`PreferenceSet::default`]:
/// the lowest difficulty, a medium cost ceiling, a half-day time ceiling,
/// either environment and no preferred locations.
///
/// # Examples
/// ```
/// use fearmatch_core::{CostRange, DifficultyLevel, PreferenceSet, TimeCommitment};
///
/// let defaults = PreferenceSet::default();
/// assert_eq!(defaults.difficulty, DifficultyLevel::Beginner);
/// assert_eq!(defaults.max_cost, CostRange::Medium);
/// assert_eq!(defaults.time_commitment, TimeCommitment::HalfDay);
/// assert!(!defaults.has_location_preference());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceSet {
    /// Preferred difficulty; also the comfortable ceiling.
    pub difficulty: DifficultyLevel,
    /// Cost ceiling.
    pub max_cost: CostRange,
    /// Preferred time commitment; also the ceiling.
    pub time_commitment: TimeCommitment,
    /// Indoor/outdoor preference.
    pub environment: Environment,
    /// Preferred locations; empty means no preference.
    pub preferred_locations: Vec<LocationId>,
}

impl PreferenceSet {
    /// Report whether the user declared any preferred location.
    #[must_use]
    pub fn has_location_preference(&self) -> bool {
        !self.preferred_locations.is_empty()
    }

    /// Report whether `id` is among the preferred locations.
    #[must_use]
    pub fn prefers_location(&self, id: &LocationId) -> bool {
        self.preferred_locations.contains(id)
    }
}

impl Default for PreferenceSet {
    fn default() -> Self {
        Self {
            difficulty: DifficultyLevel::lowest(),
            max_cost: CostRange::Medium,
            time_commitment: TimeCommitment::HalfDay,
            environment: Environment::Both,
            preferred_locations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn location_preference_lookup() {
        let preferences = PreferenceSet {
            preferred_locations: vec![LocationId::new("lisbon")],
            ..PreferenceSet::default()
        };
        assert!(preferences.has_location_preference());
        assert!(preferences.prefers_location(&LocationId::new("lisbon")));
        assert!(!preferences.prefers_location(&LocationId::new("porto")));
    }
}
