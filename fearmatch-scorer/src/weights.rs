//! Relative weighting of the match sub-scores.
#![forbid(unsafe_code)]

use crate::WeightsError;

/// Multipliers applied to each sub-score before normalising by their sum.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreWeights {
    /// Weight of the fear-match term.
    pub fear: f32,
    /// Weight of the difficulty-match term.
    pub difficulty: f32,
    /// Weight of the location-match term.
    pub location: f32,
    /// Weight of the time-match term.
    pub time: f32,
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`WeightsError::InvalidWeights`] when any value is not finite,
    /// any value is negative, or the total weight is zero.
    pub fn validate(self) -> Result<Self, WeightsError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(WeightsError::InvalidWeights)
        }
    }

    fn is_valid(self) -> bool {
        let values = self.values();
        values
            .iter()
            .all(|weight| weight.is_finite() && *weight >= 0.0_f32)
            && values.iter().any(|weight| *weight > 0.0_f32)
    }

    const fn values(self) -> [f32; 4] {
        [self.fear, self.difficulty, self.location, self.time]
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            fear: 4.0_f32,
            difficulty: 2.0_f32,
            location: 1.5_f32,
            time: 1.0_f32,
        }
    }
}
