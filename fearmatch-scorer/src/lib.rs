//! Weighted match scoring for fear-confrontation activities.
//!
//! [`MatchScorer`] blends four sub-scores into a single value in
//! `0.0..=1.0`:
//! - **fear match**: mean normalised intensity of the user's fears that the
//!   activity confronts;
//! - **difficulty match**: full credit at the preferred difficulty, half a
//!   step away;
//! - **location match**: full credit when the activity runs at a preferred
//!   location, left out entirely when the user has no location preference;
//! - **time match**: full credit at the preferred time commitment, partial
//!   otherwise.
//!
//! The terms are weighted by [`ScoreWeights`] and divided by the sum of the
//! weights that applied.
//!
//! # Examples
//!
//! ```
//! use fearmatch_core::{
//!     Activity, CostRange, DifficultyLevel, Environment, FearCategory, FearProfile,
//!     PreferenceSet, Scorer, TimeCommitment, UserId,
//! };
//! use fearmatch_scorer::MatchScorer;
//!
//! # fn main() -> Result<(), fearmatch_core::ActivityError> {
//! let activity = Activity::new(
//!     "bridge",
//!     "Glass Bridge Walk",
//!     vec![FearCategory::Heights],
//!     DifficultyLevel::Beginner,
//!     CostRange::Low,
//!     TimeCommitment::HalfDay,
//!     Environment::Outdoor,
//! )?;
//! let profile = FearProfile::new(UserId::new("u"), None, [(FearCategory::Heights, 4.0)]);
//! let score = MatchScorer::new().score(&activity, Some(&profile), Some(&PreferenceSet::default()));
//! assert_eq!(score, 1.0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use fearmatch_core::{Activity, FearProfile, NEUTRAL_SCORE, PreferenceSet, Scorer, sanitise};
use log::debug;

mod error;
mod terms;
mod weights;

pub use error::{ScoreError, WeightsError};
pub use weights::ScoreWeights;

use terms::TermResult;

/// Default [`Scorer`] combining fear, difficulty, location and time fit.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    weights: ScoreWeights,
}

impl MatchScorer {
    /// Construct a scorer using [`ScoreWeights::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a scorer with custom weights.
    ///
    /// # Errors
    /// Returns [`WeightsError::InvalidWeights`] when the weights cannot form
    /// a weighted average.
    pub fn with_weights(weights: ScoreWeights) -> Result<Self, WeightsError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// Weights applied by this scorer.
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "weighted average of sub-scores"
    )]
    fn blend(&self, activity: &Activity, terms: [(f32, TermResult); 4]) -> f32 {
        let mut weighted = 0.0_f32;
        let mut total = 0.0_f32;
        for (weight, term) in terms {
            match term {
                Ok(Some(value)) => {
                    weighted += weight * value;
                    total += weight;
                }
                Ok(None) => {}
                Err(err) => {
                    debug!("scoring {} counted a failed term as zero: {err}", activity.id);
                    total += weight;
                }
            }
        }
        if total <= 0.0_f32 {
            return 0.0;
        }
        sanitise(weighted / total)
    }
}

impl Scorer for MatchScorer {
    fn score(
        &self,
        activity: &Activity,
        profile: Option<&FearProfile>,
        preferences: Option<&PreferenceSet>,
    ) -> f32 {
        let Some(preferences) = preferences else {
            return NEUTRAL_SCORE;
        };
        if activity.fear_categories.is_empty() {
            return 0.0;
        }
        let weights = self.weights;
        self.blend(
            activity,
            [
                (weights.fear, terms::fear_match(activity, profile)),
                (weights.difficulty, terms::difficulty_match(activity, preferences)),
                (weights.location, terms::location_match(activity, preferences)),
                (weights.time, terms::time_match(activity, preferences)),
            ],
        )
    }
}
