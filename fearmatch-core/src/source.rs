//! Collaborators that load per-user profile and preference records.
//!
//! Transport is out of scope: implementations may read files, call a
//! service or return fixtures. Both loads are independent and may fail
//! independently; `Ok(None)` means the user simply has no record yet.

use thiserror::Error;

use crate::{PreferenceRecord, ProfileRecord, UserId};

/// Errors from [`ProfileSource`] and [`PreferenceSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The backing store could not be reached or read.
    #[error("{what} for user {user} is unavailable: {reason}")]
    Unavailable {
        /// Which record failed to load.
        what: &'static str,
        /// Owner of the record.
        user: UserId,
        /// Human-readable cause.
        reason: String,
    },
    /// The load did not complete in time.
    #[error("{what} for user {user} timed out")]
    TimedOut {
        /// Which record failed to load.
        what: &'static str,
        /// Owner of the record.
        user: UserId,
    },
}

/// Fetch the fear profile record for a user.
pub trait ProfileSource {
    /// Return the user's profile record, if any.
    ///
    /// # Errors
    /// Returns [`LoadError`] when the record cannot be fetched.
    fn fetch_profile(&self, user: &UserId) -> Result<Option<ProfileRecord>, LoadError>;
}

/// Fetch the preference record for a user.
pub trait PreferenceSource {
    /// Return the user's preference record, if any.
    ///
    /// # Errors
    /// Returns [`LoadError`] when the record cannot be fetched.
    fn fetch_preferences(&self, user: &UserId) -> Result<Option<PreferenceRecord>, LoadError>;
}
