//! Core domain types for the fearmatch engine.
//!
//! The crate defines the static activity catalog, the user's fear profile
//! and preferences, the user-editable filter criteria, and the [`Scorer`]
//! seam used to rank activities. Collaborator records are normalised into
//! these canonical types in one place, [`record`], so scoring and filtering
//! never see ambiguous input.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod activity;
pub mod catalog;
pub mod criteria;
pub mod fear;
pub mod ordinal;
pub mod preferences;
pub mod profile;
pub mod record;
pub mod scorer;
pub mod source;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use activity::{
    Activity, ActivityError, ActivityId, Location, LocationId, Ranked, ScoredActivity,
};
pub use catalog::{Catalog, CatalogError};
pub use criteria::{CriteriaChange, FilterCriteria, SortOrder};
pub use fear::FearCategory;
pub use ordinal::{CostRange, DifficultyLevel, Environment, Ordinal, TimeCommitment};
pub use preferences::PreferenceSet;
pub use profile::{
    FearProfile, FearScore, MAX_INTENSITY, MIN_INTENSITY, NEUTRAL_INTENSITY, UserId,
};
pub use record::{
    ActivityRecord, AssessmentRecord, AssessmentResult, KeyFearsRecord, LocationRecord,
    PreferenceRecord, ProfileRecord, RecordError,
};
pub use scorer::{NEUTRAL_SCORE, Scorer, sanitise};
pub use source::{LoadError, PreferenceSource, ProfileSource};
