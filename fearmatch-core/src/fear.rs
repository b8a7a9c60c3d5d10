//! Fear categories describing what an activity confronts.
//!
//! The enum offers compile-time safety for profile lookups and filtering.
//!
//! # Examples
//! ```
//! use fearmatch_core::FearCategory;
//!
//! assert_eq!(FearCategory::Heights.as_str(), "heights");
//! assert_eq!(FearCategory::PublicSpeaking.to_string(), "public_speaking");
//! ```

use serde::{Deserialize, Serialize};

/// A type of fear an activity helps a user confront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FearCategory {
    /// Fear of heights.
    Heights,
    /// Fear of deep or open water.
    Water,
    /// Social anxiety and meeting strangers.
    Social,
    /// Fear of enclosed spaces.
    Confined,
    /// Fear of flying.
    Flying,
    /// Fear of animals.
    Animals,
    /// Fear of the dark.
    Darkness,
    /// Fear of speaking in front of an audience.
    PublicSpeaking,
}

impl FearCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Heights,
        Self::Water,
        Self::Social,
        Self::Confined,
        Self::Flying,
        Self::Animals,
        Self::Darkness,
        Self::PublicSpeaking,
    ];

    /// Return the category as its lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heights => "heights",
            Self::Water => "water",
            Self::Social => "social",
            Self::Confined => "confined",
            Self::Flying => "flying",
            Self::Animals => "animals",
            Self::Darkness => "darkness",
            Self::PublicSpeaking => "public_speaking",
        }
    }

    /// Return a human-readable label, used by free-text search.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Heights => "Heights",
            Self::Water => "Water",
            Self::Social => "Social situations",
            Self::Confined => "Confined spaces",
            Self::Flying => "Flying",
            Self::Animals => "Animals",
            Self::Darkness => "Darkness",
            Self::PublicSpeaking => "Public speaking",
        }
    }
}

impl std::fmt::Display for FearCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FearCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalised)
            .ok_or_else(|| format!("unknown fear category '{s}'"))
    }
}
