//! Events that drive recomputation and the table mapping them to work.

use fearmatch_core::{
    CriteriaChange, LoadError, PreferenceRecord, ProfileRecord, SortOrder,
};

/// Identifies one load request within one session.
///
/// Tickets are issued from a monotonically increasing counter; completions
/// carrying anything but the latest ticket are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub(crate) session: u64,
    pub(crate) request: u64,
}

impl LoadTicket {
    /// Session the request belongs to.
    #[must_use]
    pub const fn session(self) -> u64 {
        self.session
    }

    /// Request token, unique across sessions.
    #[must_use]
    pub const fn request(self) -> u64 {
        self.request
    }
}

/// Named inputs to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    /// The profile collaborator finished.
    ProfileLoaded {
        /// Ticket handed out when the load started.
        ticket: LoadTicket,
        /// Record, absence of a record, or failure.
        outcome: Result<Option<ProfileRecord>, LoadError>,
    },
    /// The preference collaborator finished.
    PreferencesLoaded {
        /// Ticket handed out when the load started.
        ticket: LoadTicket,
        /// Record, absence of a record, or failure.
        outcome: Result<Option<PreferenceRecord>, LoadError>,
    },
    /// A filter criterion changed.
    CriteriaChanged(CriteriaChange),
    /// The sort order changed.
    SortChanged(SortOrder),
    /// The free-text search changed.
    SearchChanged(String),
    /// Criteria, sort order and search text return to their defaults.
    Reset,
}

/// Work performed in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Score the catalog, then filter and sort.
    Full,
    /// Filter and sort the cached scores.
    FilterSort,
}

impl MatchEvent {
    /// Work this event triggers once accepted.
    ///
    /// Load completions only trigger work once both loads of the current
    /// ticket have settled.
    #[must_use]
    pub const fn recompute(&self) -> Recompute {
        match self {
            Self::ProfileLoaded { .. } | Self::PreferencesLoaded { .. } => Recompute::Full,
            Self::CriteriaChanged(_) | Self::SortChanged(_) | Self::SearchChanged(_) | Self::Reset => {
                Recompute::FilterSort
            }
        }
    }
}
