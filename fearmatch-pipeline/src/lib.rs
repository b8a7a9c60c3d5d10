//! Filtering, sorting and orchestration of scored activity lists.
//!
//! - [`filter`] narrows a list by [`FilterCriteria`](fearmatch_core::FilterCriteria)
//!   and free-text search, preserving order.
//! - [`sort`] returns a new list in a [`SortOrder`](fearmatch_core::SortOrder),
//!   stable for every order.
//! - [`MatchOrchestrator`] owns the catalog and collaborators, tracks the
//!   load state of the active session and republishes the visible list when
//!   named events arrive.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod filter;
mod orchestrator;
mod sort;

pub use filter::{filter, matches_criteria, matches_search};
pub use orchestrator::{
    LoadTicket, MatchEvent, MatchOrchestrator, MatchState, MatchSummary, Recompute,
};
pub use sort::sort;
