//! User-editable filter criteria and sort orders.
//!
//! Criteria are independent of persisted preferences. They only change
//! through discrete [`CriteriaChange`] operations, so a value is never
//! partially valid.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{CostRange, DifficultyLevel, Environment, FearCategory, LocationId, TimeCommitment};

/// Inclusion predicates applied after scoring.
///
/// Empty sets, `None` ceilings and [`Environment::Both`] are unset and act as
/// no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Keep activities confronting any of these categories.
    pub fear_categories: BTreeSet<FearCategory>,
    /// Difficulty ceiling.
    pub max_difficulty: Option<DifficultyLevel>,
    /// Time commitment ceiling.
    pub max_time: Option<TimeCommitment>,
    /// Cost ceiling.
    pub max_cost: Option<CostRange>,
    /// Required environment.
    pub environment: Environment,
    /// Keep activities offered at any of these locations.
    pub locations: BTreeSet<LocationId>,
}

/// A single mutation of [`FilterCriteria`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaChange {
    /// Replace the selected fear categories.
    ReplaceFearCategories(BTreeSet<FearCategory>),
    /// Set or clear the difficulty ceiling.
    SetMaxDifficulty(Option<DifficultyLevel>),
    /// Set or clear the time commitment ceiling.
    SetMaxTime(Option<TimeCommitment>),
    /// Set or clear the cost ceiling.
    SetMaxCost(Option<CostRange>),
    /// Set the required environment.
    SetEnvironment(Environment),
    /// Replace the selected locations.
    ReplaceLocations(BTreeSet<LocationId>),
}

impl FilterCriteria {
    /// Apply one change in place.
    pub fn apply(&mut self, change: CriteriaChange) {
        match change {
            CriteriaChange::ReplaceFearCategories(categories) => self.fear_categories = categories,
            CriteriaChange::SetMaxDifficulty(ceiling) => self.max_difficulty = ceiling,
            CriteriaChange::SetMaxTime(ceiling) => self.max_time = ceiling,
            CriteriaChange::SetMaxCost(ceiling) => self.max_cost = ceiling,
            CriteriaChange::SetEnvironment(environment) => self.environment = environment,
            CriteriaChange::ReplaceLocations(locations) => self.locations = locations,
        }
    }

    /// Apply a change while returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, change: CriteriaChange) -> Self {
        self.apply(change);
        self
    }

    /// Decompose into the changes that rebuild `self` from the defaults.
    #[must_use]
    pub fn into_changes(self) -> [CriteriaChange; 6] {
        [
            CriteriaChange::ReplaceFearCategories(self.fear_categories),
            CriteriaChange::SetMaxDifficulty(self.max_difficulty),
            CriteriaChange::SetMaxTime(self.max_time),
            CriteriaChange::SetMaxCost(self.max_cost),
            CriteriaChange::SetEnvironment(self.environment),
            CriteriaChange::ReplaceLocations(self.locations),
        ]
    }

    /// Report whether every criterion is unset.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self == &Self::default()
    }
}

/// Final ordering of the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Descending match score; unscored items count as `0.0` and keep their
    /// relative order among zero scores.
    #[default]
    Recommended,
    /// Ascending by title.
    Alphabetical,
    /// Easiest first.
    DifficultyAsc,
    /// Hardest first.
    DifficultyDesc,
}

impl SortOrder {
    /// Every supported order.
    pub const ALL: [Self; 4] = [
        Self::Recommended,
        Self::Alphabetical,
        Self::DifficultyAsc,
        Self::DifficultyDesc,
    ];

    /// Return the wire name of the order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Alphabetical => "alphabetical",
            Self::DifficultyAsc => "difficulty_asc",
            Self::DifficultyDesc => "difficulty_desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == normalised)
            .ok_or_else(|| format!("unknown sort order '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    fn default_criteria_are_neutral() {
        assert!(FilterCriteria::default().is_neutral());
    }

    #[rstest]
    fn changes_replace_fields_wholesale() {
        let criteria = FilterCriteria::default()
            .with(CriteriaChange::ReplaceFearCategories(BTreeSet::from([
                FearCategory::Water,
                FearCategory::Heights,
            ])))
            .with(CriteriaChange::ReplaceFearCategories(BTreeSet::from([
                FearCategory::Social,
            ])))
            .with(CriteriaChange::SetMaxCost(Some(CostRange::Low)));
        assert_eq!(
            criteria.fear_categories,
            BTreeSet::from([FearCategory::Social])
        );
        assert_eq!(criteria.max_cost, Some(CostRange::Low));
        assert!(!criteria.is_neutral());
    }

    #[rstest]
    fn changes_rebuild_the_same_criteria() {
        let criteria = FilterCriteria::default()
            .with(CriteriaChange::SetMaxTime(Some(TimeCommitment::FullDay)))
            .with(CriteriaChange::SetEnvironment(Environment::Outdoor));
        let rebuilt = criteria
            .clone()
            .into_changes()
            .into_iter()
            .fold(FilterCriteria::default(), FilterCriteria::with);
        assert_eq!(rebuilt, criteria);
    }

    #[rstest]
    fn clearing_restores_neutrality() {
        let mut criteria =
            FilterCriteria::default().with(CriteriaChange::SetEnvironment(Environment::Indoor));
        criteria.apply(CriteriaChange::SetEnvironment(Environment::Both));
        assert!(criteria.is_neutral());
    }

    #[rstest]
    #[case("recommended", SortOrder::Recommended)]
    #[case("Alphabetical", SortOrder::Alphabetical)]
    #[case("difficulty_desc", SortOrder::DifficultyDesc)]
    fn sort_orders_parse(#[case] raw: &str, #[case] expected: SortOrder) {
        assert_eq!(SortOrder::from_str(raw), Ok(expected));
    }
}
