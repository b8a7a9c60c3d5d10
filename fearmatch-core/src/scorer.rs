//! Score activities for a user's fear profile and preferences.
//!
//! The `Scorer` trait assigns a match score to an
//! [`Activity`](crate::Activity) given the user's optional
//! [`FearProfile`](crate::FearProfile) and
//! [`PreferenceSet`](crate::PreferenceSet).

use crate::{Activity, FearProfile, PreferenceSet};

/// Score returned when no preferences are known.
pub const NEUTRAL_SCORE: f32 = 0.5;

/// Calculate a match score for an activity.
///
/// Higher scores indicate a better fit. Implementations must be thread-safe
/// (`Send` + `Sync`) and total: they return a value for every input and never
/// panic.
///
/// Implementations must:
/// - Produce finite (`f32::is_finite`) scores.
/// - Normalise results to the range `0.0..=1.0`.
///
/// Use [`sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use fearmatch_core::{Activity, FearProfile, PreferenceSet, Scorer};
///
/// struct UnitScorer;
///
/// impl Scorer for UnitScorer {
///     fn score(
///         &self,
///         _activity: &Activity,
///         _profile: Option<&FearProfile>,
///         _preferences: Option<&PreferenceSet>,
///     ) -> f32 {
///         1.0
///     }
/// }
///
/// # fn main() -> Result<(), fearmatch_core::ActivityError> {
/// use fearmatch_core::{CostRange, DifficultyLevel, Environment, FearCategory, TimeCommitment};
/// let activity = Activity::new(
///     "a",
///     "Cave Tour",
///     vec![FearCategory::Darkness],
///     DifficultyLevel::Easy,
///     CostRange::Low,
///     TimeCommitment::HalfDay,
///     Environment::Indoor,
/// )?;
/// assert_eq!(UnitScorer.score(&activity, None, None), 1.0);
/// # Ok(())
/// # }
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `activity`.
    fn score(
        &self,
        activity: &Activity,
        profile: Option<&FearProfile>,
        preferences: Option<&PreferenceSet>,
    ) -> f32;
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn score(
        &self,
        activity: &Activity,
        profile: Option<&FearProfile>,
        preferences: Option<&PreferenceSet>,
    ) -> f32 {
        (**self).score(activity, profile, preferences)
    }
}

/// Clamp and validate a raw score.
///
/// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
#[must_use]
pub fn sanitise(score: f32) -> f32 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}
