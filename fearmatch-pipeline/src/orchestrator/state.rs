//! Published state of a [`MatchOrchestrator`](super::MatchOrchestrator).

use std::fmt;

/// Lifecycle of the active session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchState {
    /// No user context yet; the catalog is published with neutral scores.
    #[default]
    Uninitialized,
    /// Profile or preference loads are in flight.
    Loading,
    /// The last load succeeded and its results are published.
    Ready,
    /// A load or the scoring pass failed; the best available list remains
    /// published.
    Error,
}

impl MatchState {
    /// Lower-case identifier used in logs and output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts backing the "showing N of M" summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    /// Activities currently visible after filtering.
    pub visible: usize,
    /// Scored activities before filtering.
    pub matched: usize,
}
