//! Ordinal activity attributes: difficulty, cost and time commitment.
//!
//! Each scale is totally ordered by declaration order. Filters treat them as
//! ceilings and the scorer measures distances along them.
//!
//! # Examples
//! ```
//! use fearmatch_core::{DifficultyLevel, Ordinal, TimeCommitment};
//!
//! assert!(DifficultyLevel::Beginner < DifficultyLevel::Moderate);
//! assert_eq!(DifficultyLevel::Easy.distance(DifficultyLevel::Challenging), 2);
//! assert_eq!(TimeCommitment::OneToThreeHours.as_str(), "1-3_hours");
//! ```

use serde::{Deserialize, Serialize};

/// A finite, totally ordered scale.
pub trait Ordinal: Copy + Ord + 'static {
    /// Every value on the scale, lowest first.
    const ALL: &'static [Self];

    /// Zero-based position on the scale.
    fn rank(self) -> u8;

    /// Absolute number of steps between two values.
    fn distance(self, other: Self) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    /// Lowest value on the scale.
    fn lowest() -> Self;
}

macro_rules! ordinal_scale {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Return the wire name of the value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl Ordinal for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn rank(self) -> u8 {
                self as u8
            }

            fn lowest() -> Self {
                ordinal_scale!(@first $(Self::$variant),+)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalised = s.trim().to_lowercase();
                <Self as Ordinal>::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == normalised)
                    .ok_or_else(|| format!(concat!("unknown ", $what, " '{}'"), s))
            }
        }
    };
    (@first $first:expr $(, $rest:expr)*) => {
        $first
    };
}

ordinal_scale! {
    /// How demanding an activity is.
    DifficultyLevel, "difficulty level" {
        /// Suitable for a first step.
        Beginner => "beginner",
        /// Mild exposure.
        Easy => "easy",
        /// Noticeable exposure.
        Moderate => "moderate",
        /// Strong exposure.
        Challenging => "challenging",
        /// Intense exposure.
        Difficult => "difficult",
    }
}

ordinal_scale! {
    /// Rough price bracket of an activity.
    CostRange, "cost range" {
        /// No cost.
        Free => "free",
        /// Inexpensive.
        Low => "low",
        /// Mid-priced.
        Medium => "medium",
        /// Expensive.
        High => "high",
        /// Luxury pricing.
        Premium => "premium",
    }
}

ordinal_scale! {
    /// How much time an activity takes.
    TimeCommitment, "time commitment" {
        /// Less than an hour.
        UnderOneHour => "under_1_hour",
        /// Between one and three hours.
        OneToThreeHours => "1-3_hours",
        /// Roughly half a day.
        HalfDay => "half_day",
        /// A full day.
        FullDay => "full_day",
        /// Several days.
        MultiDay => "multi_day",
    }
}

/// Where an activity takes place.
///
/// `Both` describes activities that work indoors or outdoors; as a filter it
/// is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Indoors only.
    Indoor,
    /// Outdoors only.
    Outdoor,
    /// Indoors or outdoors.
    #[default]
    Both,
}

impl Environment {
    /// Return the wire name of the value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
            Self::Both => "both",
        }
    }

    /// Report whether an activity set in `self` is acceptable for a
    /// `wanted` environment.
    ///
    /// Activities marked `Both` satisfy either side.
    #[must_use]
    pub const fn satisfies(self, wanted: Self) -> bool {
        matches!(
            (self, wanted),
            (_, Self::Both)
                | (Self::Both, _)
                | (Self::Indoor, Self::Indoor)
                | (Self::Outdoor, Self::Outdoor)
        )
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indoor" => Ok(Self::Indoor),
            "outdoor" => Ok(Self::Outdoor),
            "both" | "any" => Ok(Self::Both),
            _ => Err(format!("unknown environment '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    fn scales_are_ranked_by_declaration_order() {
        let ranks: Vec<u8> = DifficultyLevel::ALL.iter().map(|d| d.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
        assert_eq!(CostRange::lowest(), CostRange::Free);
        assert_eq!(TimeCommitment::lowest(), TimeCommitment::UnderOneHour);
    }

    #[rstest]
    #[case(DifficultyLevel::Beginner, DifficultyLevel::Beginner, 0)]
    #[case(DifficultyLevel::Beginner, DifficultyLevel::Easy, 1)]
    #[case(DifficultyLevel::Difficult, DifficultyLevel::Beginner, 4)]
    fn distance_is_symmetric(
        #[case] a: DifficultyLevel,
        #[case] b: DifficultyLevel,
        #[case] expected: u8,
    ) {
        assert_eq!(a.distance(b), expected);
        assert_eq!(b.distance(a), expected);
    }

    #[rstest]
    #[case("1-3_hours", TimeCommitment::OneToThreeHours)]
    #[case("Under_1_Hour", TimeCommitment::UnderOneHour)]
    #[case("multi_day", TimeCommitment::MultiDay)]
    fn time_commitment_parses_wire_names(#[case] raw: &str, #[case] expected: TimeCommitment) {
        assert_eq!(TimeCommitment::from_str(raw), Ok(expected));
    }

    #[rstest]
    fn unknown_values_are_rejected() {
        let err = CostRange::from_str("priceless").unwrap_err();
        assert!(err.contains("unknown cost range"));
    }

    #[rstest]
    fn serde_round_trips_wire_names() {
        let json = serde_json::to_string(&TimeCommitment::OneToThreeHours).unwrap();
        assert_eq!(json, "\"1-3_hours\"");
        let parsed: DifficultyLevel = serde_json::from_str("\"challenging\"").unwrap();
        assert_eq!(parsed, DifficultyLevel::Challenging);
    }

    #[rstest]
    #[case(Environment::Indoor, Environment::Indoor, true)]
    #[case(Environment::Indoor, Environment::Outdoor, false)]
    #[case(Environment::Both, Environment::Outdoor, true)]
    #[case(Environment::Outdoor, Environment::Both, true)]
    fn environment_satisfaction(
        #[case] activity: Environment,
        #[case] wanted: Environment,
        #[case] expected: bool,
    ) {
        assert_eq!(activity.satisfies(wanted), expected);
    }
}
