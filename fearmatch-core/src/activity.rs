//! Catalog activities and their transiently scored copies.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CostRange, DifficultyLevel, Environment, FearCategory, TimeCommitment};

/// Unique key of an [`Activity`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(String);

impl ActivityId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique key of a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A place where an activity can be done.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Identifier referenced by preferences and filters.
    pub id: LocationId,
    /// Display name, searchable.
    pub name: String,
}

impl Location {
    /// Construct a location.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(id),
            name: name.into(),
        }
    }
}

/// A fear-confrontation activity from the catalog.
///
/// Fields are public so callers can inspect them cheaply; prefer
/// [`Activity::new`], which enforces a non-empty fear-category list.
///
/// # Examples
/// ```
/// use fearmatch_core::{
///     Activity, CostRange, DifficultyLevel, Environment, FearCategory, TimeCommitment,
/// };
///
/// # fn main() -> Result<(), fearmatch_core::ActivityError> {
/// let activity = Activity::new(
///     "kayak-1",
///     "White Water Kayaking",
///     vec![FearCategory::Water],
///     DifficultyLevel::Challenging,
///     CostRange::Medium,
///     TimeCommitment::HalfDay,
///     Environment::Outdoor,
/// )?;
/// assert_eq!(activity.id.as_str(), "kayak-1");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique key.
    pub id: ActivityId,
    /// Short title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Fears the activity confronts; never empty for validated activities.
    pub fear_categories: Vec<FearCategory>,
    /// How demanding it is.
    pub difficulty: DifficultyLevel,
    /// Price bracket.
    pub cost: CostRange,
    /// Time it takes.
    pub time_commitment: TimeCommitment,
    /// Indoor, outdoor or either.
    pub environment: Environment,
    /// Places where it is offered.
    pub locations: Vec<Location>,
}

/// Errors returned by [`Activity::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    /// No fear categories were supplied.
    #[error("activity {id} must confront at least one fear category")]
    NoFearCategories {
        /// Identifier of the rejected activity.
        id: ActivityId,
    },
    /// The identifier was blank.
    #[error("activity identifier must not be blank")]
    BlankId,
}

impl Activity {
    /// Validate and construct an activity without description or locations.
    ///
    /// Duplicate categories are collapsed, keeping first occurrences.
    ///
    /// # Errors
    /// Returns [`ActivityError`] when the id is blank or no category is given.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        fear_categories: Vec<FearCategory>,
        difficulty: DifficultyLevel,
        cost: CostRange,
        time_commitment: TimeCommitment,
        environment: Environment,
    ) -> Result<Self, ActivityError> {
        let raw_id = id.into();
        if raw_id.trim().is_empty() {
            return Err(ActivityError::BlankId);
        }
        let id = ActivityId::new(raw_id);
        let mut categories = Vec::with_capacity(fear_categories.len());
        for category in fear_categories {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        if categories.is_empty() {
            return Err(ActivityError::NoFearCategories { id });
        }
        Ok(Self {
            id,
            title: title.into(),
            description: String::new(),
            fear_categories: categories,
            difficulty,
            cost,
            time_commitment,
            environment,
            locations: Vec::new(),
        })
    }

    /// Set the description while returning `self` for chaining.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a location while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// Report whether the activity confronts `category`.
    #[must_use]
    pub fn confronts(&self, category: FearCategory) -> bool {
        self.fear_categories.contains(&category)
    }

    /// Iterate over the identifiers of the activity's locations.
    pub fn location_ids(&self) -> impl Iterator<Item = &LocationId> {
        self.locations.iter().map(|location| &location.id)
    }
}

impl AsRef<Self> for Activity {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// An activity paired with a transient match score.
///
/// Scored copies are derived on every recomputation and never persisted.
/// The activity itself is shared with the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredActivity {
    /// The catalog activity.
    #[serde(flatten)]
    pub activity: Arc<Activity>,
    /// Score in `0.0..=1.0`; `None` when the activity was not scored.
    pub match_score: Option<f32>,
}

impl ScoredActivity {
    /// Pair an activity with a score.
    #[must_use]
    pub const fn scored(activity: Arc<Activity>, score: f32) -> Self {
        Self {
            activity,
            match_score: Some(score),
        }
    }

    /// Wrap an activity without a score.
    #[must_use]
    pub const fn unscored(activity: Arc<Activity>) -> Self {
        Self {
            activity,
            match_score: None,
        }
    }
}

impl AsRef<Activity> for ScoredActivity {
    fn as_ref(&self) -> &Activity {
        &self.activity
    }
}

/// Items that can be ranked by the recommended sort order.
pub trait Ranked: AsRef<Activity> {
    /// Match score, if one has been computed.
    fn match_score(&self) -> Option<f32>;
}

impl Ranked for Activity {
    fn match_score(&self) -> Option<f32> {
        None
    }
}

impl Ranked for ScoredActivity {
    fn match_score(&self) -> Option<f32> {
        self.match_score
    }
}
