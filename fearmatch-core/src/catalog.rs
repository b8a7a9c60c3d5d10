//! The static, read-only activity catalog.
//!
//! A [`Catalog`] is loaded once and shared for the process lifetime. The
//! activities are reference counted so scored copies never duplicate them.

use std::collections::HashSet;
use std::sync::Arc;

use log::warn;
use thiserror::Error;

use crate::{Activity, ActivityId, ActivityRecord};

/// Errors returned by [`Catalog::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two activities share an identifier.
    #[error("activity id {id} appears more than once in the catalog")]
    DuplicateId {
        /// The repeated identifier.
        id: ActivityId,
    },
}

/// Immutable, ordered set of activities with unique identifiers.
///
/// # Examples
/// ```
/// use fearmatch_core::{
///     Activity, Catalog, CostRange, DifficultyLevel, Environment, FearCategory, TimeCommitment,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let activity = Activity::new(
///     "zip",
///     "Zip Line",
///     vec![FearCategory::Heights],
///     DifficultyLevel::Easy,
///     CostRange::Low,
///     TimeCommitment::UnderOneHour,
///     Environment::Outdoor,
/// )?;
/// let catalog = Catalog::new(vec![activity])?;
/// assert_eq!(catalog.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    activities: Vec<Arc<Activity>>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate identifiers.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateId`] for the first repeated id.
    pub fn new(activities: Vec<Activity>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(activities.len());
        for activity in &activities {
            if !seen.insert(&activity.id) {
                return Err(CatalogError::DuplicateId {
                    id: activity.id.clone(),
                });
            }
        }
        Ok(Self {
            activities: activities.into_iter().map(Arc::new).collect(),
        })
    }

    /// Normalise collaborator records into a catalog.
    ///
    /// Records that cannot form an activity, and later duplicates of an id,
    /// are skipped and logged rather than failing the whole load.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ActivityRecord>,
    {
        let mut seen = HashSet::new();
        let mut activities = Vec::new();
        for record in records {
            match Activity::try_from(record) {
                Ok(activity) if seen.insert(activity.id.clone()) => {
                    activities.push(Arc::new(activity));
                }
                Ok(activity) => {
                    warn!("skipping duplicate catalog activity {}", activity.id);
                }
                Err(err) => warn!("skipping malformed catalog record: {err}"),
            }
        }
        Self { activities }
    }

    /// Activities in catalog order.
    #[must_use]
    pub fn activities(&self) -> &[Arc<Activity>] {
        &self.activities
    }

    /// Look up an activity by id.
    #[must_use]
    pub fn get(&self, id: &ActivityId) -> Option<&Arc<Activity>> {
        self.activities.iter().find(|activity| &activity.id == id)
    }

    /// Number of activities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Report whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::activity;
    use crate::{DifficultyLevel, FearCategory};
    use rstest::rstest;

    #[rstest]
    fn rejects_duplicate_ids() {
        let first = activity("a", "First", &[FearCategory::Water], DifficultyLevel::Easy);
        let second = activity("a", "Second", &[FearCategory::Heights], DifficultyLevel::Easy);
        let err = Catalog::new(vec![first, second]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                id: ActivityId::new("a")
            }
        );
    }

    #[rstest]
    fn preserves_order_and_supports_lookup() {
        let catalog = Catalog::new(vec![
            activity("b", "Bee Keeping", &[FearCategory::Animals], DifficultyLevel::Easy),
            activity("a", "Abseil", &[FearCategory::Heights], DifficultyLevel::Moderate),
        ])
        .unwrap();
        let ids: Vec<&str> = catalog.activities().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(catalog.get(&ActivityId::new("a")).is_some());
        assert!(catalog.get(&ActivityId::new("zzz")).is_none());
    }

    #[rstest]
    fn from_records_skips_malformed_and_duplicate_entries() {
        let records: Vec<ActivityRecord> = serde_json::from_str(
            r#"[
                {"id": "a", "title": "Abseil", "fearCategories": ["heights"], "difficulty": "moderate"},
                {"id": "b", "title": "No fears", "fearCategories": []},
                {"id": "a", "title": "Duplicate", "fearCategories": ["water"]}
            ]"#,
        )
        .unwrap();
        let catalog = Catalog::from_records(records);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.activities()[0].title, "Abseil");
    }
}
