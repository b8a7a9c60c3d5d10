//! Facade crate for the fearmatch activity matching engine.
//!
//! This crate re-exports the domain types, the default scorer and the
//! filter, sort and orchestration pipeline.

#![forbid(unsafe_code)]

pub use fearmatch_core::{
    Activity, ActivityId, Catalog, CostRange, CriteriaChange, DifficultyLevel, Environment,
    FearCategory, FearProfile, FilterCriteria, LoadError, Location, LocationId, Ordinal,
    PreferenceSet, PreferenceSource, ProfileSource, ScoredActivity, Scorer, SortOrder,
    TimeCommitment, UserId,
};
pub use fearmatch_pipeline::{
    LoadTicket, MatchEvent, MatchOrchestrator, MatchState, MatchSummary, Recompute, filter, sort,
};
pub use fearmatch_scorer::{MatchScorer, ScoreWeights};
