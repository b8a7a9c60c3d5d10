//! Fear profiles: a user's ranked per-category fear intensities.
//!
//! Intensities live on the assessment scale
//! [`MIN_INTENSITY`]`..=`[`MAX_INTENSITY`]. Profiles are replaced wholesale
//! whenever a new assessment arrives; they are never merged.

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{AssessmentRecord, FearCategory};

/// Lowest intensity an assessment can report.
pub const MIN_INTENSITY: f32 = 1.0;

/// Highest intensity an assessment can report.
pub const MAX_INTENSITY: f32 = 4.0;

/// Intensity given to categories synthesised from selected fear tags.
pub const NEUTRAL_INTENSITY: f32 = 2.5;

/// Identifier of the user a profile belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
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

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One ranked entry of a [`FearProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FearScore {
    /// The assessed category.
    pub category: FearCategory,
    /// Raw intensity on the assessment scale.
    pub intensity: f32,
}

/// A user's most recent fear assessment.
///
/// Entries are unique per category and ranked by descending intensity.
///
/// # Examples
/// ```
/// use fearmatch_core::{FearCategory, FearProfile, UserId};
///
/// let profile = FearProfile::new(
///     UserId::new("u1"),
///     None,
///     [(FearCategory::Water, 2.0), (FearCategory::Heights, 4.0)],
/// );
/// assert_eq!(profile.scores()[0].category, FearCategory::Heights);
/// assert_eq!(profile.normalised_intensity(FearCategory::Water), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FearProfile {
    user_id: UserId,
    recorded_at: Option<DateTime<Utc>>,
    scores: Vec<FearScore>,
}

impl FearProfile {
    /// Build a profile from `(category, intensity)` pairs.
    ///
    /// Non-finite intensities are dropped, the rest are clamped into the
    /// assessment scale, repeated categories keep their first occurrence and
    /// the result is ranked by descending intensity.
    pub fn new<I>(user_id: UserId, recorded_at: Option<DateTime<Utc>>, entries: I) -> Self
    where
        I: IntoIterator<Item = (FearCategory, f32)>,
    {
        let mut scores: Vec<FearScore> = Vec::new();
        for (category, intensity) in entries {
            if !intensity.is_finite() {
                warn!("dropping non-finite intensity for fear category {category}");
                continue;
            }
            if scores.iter().any(|score| score.category == category) {
                continue;
            }
            scores.push(FearScore {
                category,
                intensity: intensity.clamp(MIN_INTENSITY, MAX_INTENSITY),
            });
        }
        scores.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
        Self {
            user_id,
            recorded_at,
            scores,
        }
    }

    /// Synthesise a profile from a flat list of selected fear tags.
    ///
    /// Every recognised tag receives [`NEUTRAL_INTENSITY`]; unknown tags are
    /// logged and skipped.
    pub fn from_key_fears<I, S>(user_id: UserId, key_fears: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(user_id, None, key_fear_entries(key_fears))
    }

    /// Build a profile from one assessment record.
    ///
    /// An assessment without any recognised result falls back to the
    /// record's selected fear tags.
    #[must_use]
    pub fn from_assessment(user_id: UserId, record: &AssessmentRecord) -> Self {
        let mut entries = record.entries().peekable();
        if entries.peek().is_none() && !record.key_fears.is_empty() {
            return Self::new(user_id, record.timestamp, key_fear_entries(&record.key_fears));
        }
        Self::new(user_id, record.timestamp, entries)
    }

    /// Build a profile from the most recent of several assessment records.
    ///
    /// Records without a timestamp rank below dated ones; among equals the
    /// later record in iteration order wins. Returns `None` when no record
    /// is supplied.
    pub fn from_assessments<'a, I>(user_id: UserId, records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a AssessmentRecord>,
    {
        records
            .into_iter()
            .max_by_key(|record| record.timestamp)
            .map(|record| Self::from_assessment(user_id, record))
    }

    /// Owner of the profile.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// When the underlying assessment was taken, if known.
    #[must_use]
    pub const fn recorded_at(&self) -> Option<DateTime<Utc>> {
        self.recorded_at
    }

    /// Ranked entries, highest intensity first.
    #[must_use]
    pub fn scores(&self) -> &[FearScore] {
        &self.scores
    }

    /// Raw intensity for `category`, if assessed.
    #[must_use]
    pub fn intensity(&self, category: FearCategory) -> Option<f32> {
        self.scores
            .iter()
            .find(|score| score.category == category)
            .map(|score| score.intensity)
    }

    /// Intensity for `category` divided by [`MAX_INTENSITY`].
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "normalising divides by the scale maximum"
    )]
    pub fn normalised_intensity(&self, category: FearCategory) -> Option<f32> {
        self.intensity(category)
            .map(|intensity| intensity / MAX_INTENSITY)
    }

    /// Report whether the profile has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Test helpers for constructing profiles that bypass validation.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::{FearProfile, FearScore};
    use crate::FearCategory;

    /// Extension trait exposing raw intensity insertion for tests.
    pub trait FearProfileTestExt {
        /// Append an entry without clamping, deduplication or ranking.
        fn insert_raw_intensity(&mut self, category: FearCategory, intensity: f32);
    }

    impl FearProfileTestExt for FearProfile {
        fn insert_raw_intensity(&mut self, category: FearCategory, intensity: f32) {
            self.scores.push(FearScore {
                category,
                intensity,
            });
        }
    }
}

fn key_fear_entries<I, S>(key_fears: I) -> impl Iterator<Item = (FearCategory, f32)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    key_fears.into_iter().filter_map(|tag| {
        tag.as_ref()
            .parse::<FearCategory>()
            .map_err(|err| warn!("ignoring key fear: {err}"))
            .ok()
            .map(|category| (category, NEUTRAL_INTENSITY))
    })
}
