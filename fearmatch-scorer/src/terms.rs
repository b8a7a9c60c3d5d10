//! Individual match sub-scores.
//!
//! Each term returns `Ok(Some(value))` with `value` in `0.0..=1.0`,
//! `Ok(None)` when it does not apply and should be left out of the weighted
//! average, or an error that the aggregator treats as `0.0`.
#![forbid(unsafe_code)]

use fearmatch_core::{Activity, FearProfile, Ordinal, PreferenceSet};

use crate::ScoreError;

/// Outcome of a single sub-score.
pub(crate) type TermResult = Result<Option<f32>, ScoreError>;

const EXACT: f32 = 1.0;
const PARTIAL: f32 = 0.5;
const MISS: f32 = 0.0;

/// Mean normalised intensity over the activity's categories present in the
/// profile; `0.0` when none are present or no profile exists.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging normalised intensities over a handful of categories"
)]
pub(crate) fn fear_match(activity: &Activity, profile: Option<&FearProfile>) -> TermResult {
    let Some(profile) = profile else {
        return Ok(Some(MISS));
    };
    let mut total = 0.0_f32;
    let mut matched = 0_usize;
    for &category in &activity.fear_categories {
        let Some(normalised) = profile.normalised_intensity(category) else {
            continue;
        };
        if !normalised.is_finite() {
            return Err(ScoreError::NonFiniteIntensity { category });
        }
        if !(0.0..=1.0).contains(&normalised) {
            return Err(ScoreError::IntensityOutOfRange {
                category,
                intensity: profile.intensity(category).unwrap_or(normalised),
            });
        }
        total += normalised;
        matched += 1;
    }
    if matched == 0 {
        return Ok(Some(MISS));
    }
    Ok(Some(total / matched as f32))
}

/// Full credit for the preferred difficulty, half for a neighbour.
pub(crate) fn difficulty_match(activity: &Activity, preferences: &PreferenceSet) -> TermResult {
    let value = match activity.difficulty.distance(preferences.difficulty) {
        0 => EXACT,
        1 => PARTIAL,
        _ => MISS,
    };
    Ok(Some(value))
}

/// Full credit when any activity location is preferred, none when the user
/// prefers other places, and not applicable without a preference.
pub(crate) fn location_match(activity: &Activity, preferences: &PreferenceSet) -> TermResult {
    if !preferences.has_location_preference() {
        return Ok(None);
    }
    let hit = activity
        .location_ids()
        .any(|id| preferences.prefers_location(id));
    Ok(Some(if hit { EXACT } else { MISS }))
}

/// Full credit for the preferred time commitment, partial otherwise.
pub(crate) fn time_match(activity: &Activity, preferences: &PreferenceSet) -> TermResult {
    let value = if activity.time_commitment == preferences.time_commitment {
        EXACT
    } else {
        PARTIAL
    };
    Ok(Some(value))
}
