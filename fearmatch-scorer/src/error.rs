//! Error types raised while configuring or computing match scores.
#![forbid(unsafe_code)]

use fearmatch_core::FearCategory;
use thiserror::Error;

/// A sub-score could not be computed.
///
/// The scorer never surfaces these to callers: a failing term counts as `0.0`
/// with its weight kept in the denominator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// A profile intensity fell outside the normalised range.
    #[error("intensity {intensity} for fear category {category} is outside the assessment scale")]
    IntensityOutOfRange {
        /// Affected category.
        category: FearCategory,
        /// Raw intensity found in the profile.
        intensity: f32,
    },
    /// A profile intensity was NaN or infinite.
    #[error("intensity for fear category {category} is not finite")]
    NonFiniteIntensity {
        /// Affected category.
        category: FearCategory,
    },
}

/// Weights supplied to [`MatchScorer`](crate::MatchScorer) were unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WeightsError {
    /// A weight was NaN, infinite or negative, or all weights were zero.
    #[error("weights must be finite, non-negative and sum to a positive value")]
    InvalidWeights,
}
