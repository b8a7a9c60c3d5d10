//! Session-scoped orchestration of scoring, filtering and sorting.
//!
//! The orchestrator is not reentrant: each event runs to completion before
//! the next is dispatched. Loads are asynchronous from its point of view; a
//! caller starts them with [`MatchOrchestrator::begin_session`] or
//! [`MatchOrchestrator::request_refresh`] and reports completions as
//! [`MatchEvent`]s in any order. [`MatchOrchestrator::load_session`] and
//! [`MatchOrchestrator::refresh`] drive the injected collaborators inline.

use std::collections::BTreeSet;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use fearmatch_core::{
    Catalog, CostRange, CriteriaChange, DifficultyLevel, Environment, FearCategory, FearProfile,
    FilterCriteria, LoadError, LocationId, PreferenceRecord, PreferenceSet, PreferenceSource,
    ProfileRecord, ProfileSource, ScoredActivity, Scorer, SortOrder, TimeCommitment, UserId,
    sanitise,
};
use log::{debug, warn};

use crate::{filter, sort};

mod event;
mod state;

pub use event::{LoadTicket, MatchEvent, Recompute};
pub use state::{MatchState, MatchSummary};

/// Progress of the loads issued under one ticket.
#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: LoadTicket,
    profile_settled: bool,
    preferences_settled: bool,
    failed: bool,
}

impl InFlight {
    const fn new(ticket: LoadTicket) -> Self {
        Self {
            ticket,
            profile_settled: false,
            preferences_settled: false,
            failed: false,
        }
    }

    const fn is_settled(self) -> bool {
        self.profile_settled && self.preferences_settled
    }
}

/// Which collaborator a completion came from.
#[derive(Debug, Clone, Copy)]
enum Load {
    Profile,
    Preferences,
}

impl Load {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Preferences => "preferences",
        }
    }
}

/// Owns the catalog, collaborators and published list for one consumer.
///
/// # Examples
///
/// ```
/// use fearmatch_core::test_support::{
///     sample_catalog, StaticPreferenceSource, StaticProfileSource,
/// };
/// use fearmatch_core::{NEUTRAL_SCORE, PreferenceRecord, UserId};
/// use fearmatch_pipeline::{MatchOrchestrator, MatchState};
/// # use fearmatch_core::{Activity, FearProfile, PreferenceSet, Scorer};
/// # struct Flat;
/// # impl Scorer for Flat {
/// #     fn score(&self, _: &Activity, _: Option<&FearProfile>, p: Option<&PreferenceSet>) -> f32 {
/// #         if p.is_some() { 1.0 } else { NEUTRAL_SCORE }
/// #     }
/// # }
///
/// let mut orchestrator = MatchOrchestrator::new(
///     sample_catalog(),
///     StaticProfileSource::returning(None),
///     StaticPreferenceSource::returning(Some(PreferenceRecord::default())),
///     Flat,
/// );
/// assert_eq!(orchestrator.state(), MatchState::Uninitialized);
///
/// let state = orchestrator.load_session(UserId::new("u1"));
/// assert_eq!(state, MatchState::Ready);
/// assert_eq!(orchestrator.summary().visible, 10);
/// ```
pub struct MatchOrchestrator<P, Q, S>
where
    P: ProfileSource,
    Q: PreferenceSource,
    S: Scorer,
{
    catalog: Catalog,
    profile_source: P,
    preference_source: Q,
    scorer: S,
    state: MatchState,
    user: Option<UserId>,
    last_token: u64,
    session: u64,
    in_flight: Option<InFlight>,
    profile: Option<FearProfile>,
    preferences: Option<PreferenceSet>,
    scored: Vec<ScoredActivity>,
    visible: Vec<ScoredActivity>,
    criteria: FilterCriteria,
    sort_order: SortOrder,
    search: String,
}

impl<P, Q, S> MatchOrchestrator<P, Q, S>
where
    P: ProfileSource,
    Q: PreferenceSource,
    S: Scorer,
{
    /// Construct an orchestrator and publish the catalog without user
    /// context.
    pub fn new(catalog: Catalog, profile_source: P, preference_source: Q, scorer: S) -> Self {
        let mut orchestrator = Self {
            catalog,
            profile_source,
            preference_source,
            scorer,
            state: MatchState::Uninitialized,
            user: None,
            last_token: 0,
            session: 0,
            in_flight: None,
            profile: None,
            preferences: None,
            scored: Vec::new(),
            visible: Vec::new(),
            criteria: FilterCriteria::default(),
            sort_order: SortOrder::default(),
            search: String::new(),
        };
        orchestrator.rescore();
        orchestrator
    }

    /// Enter a new user context and return the ticket for its loads.
    ///
    /// Loads issued for any earlier session are abandoned and the inputs
    /// they produced are forgotten. The published list stays in place until
    /// the new loads settle.
    pub fn begin_session(&mut self, user: UserId) -> LoadTicket {
        let token = self.next_token();
        self.session = token;
        self.user = Some(user);
        self.profile = None;
        self.preferences = None;
        self.start_loads(token)
    }

    /// Reload profile and preferences for the current user.
    ///
    /// Returns `None` when no session has begun.
    pub fn request_refresh(&mut self) -> Option<LoadTicket> {
        if self.user.is_none() {
            debug!("ignoring refresh without a user session");
            return None;
        }
        let token = self.next_token();
        Some(self.start_loads(token))
    }

    /// Begin a session and run both loads through the injected collaborators.
    pub fn load_session(&mut self, user: UserId) -> MatchState {
        let ticket = self.begin_session(user);
        self.fetch(ticket);
        self.state
    }

    /// Refresh the current session through the injected collaborators.
    pub fn refresh(&mut self) -> MatchState {
        if let Some(ticket) = self.request_refresh() {
            self.fetch(ticket);
        }
        self.state
    }

    /// Apply an event and return the recomputation it caused, if any.
    ///
    /// Stale or duplicate load completions are discarded. A completion that
    /// leaves its sibling load pending is recorded without recomputing.
    pub fn dispatch(&mut self, event: MatchEvent) -> Option<Recompute> {
        let recompute = event.recompute();
        let accepted = match event {
            MatchEvent::ProfileLoaded { ticket, outcome } => self.receive_profile(ticket, outcome),
            MatchEvent::PreferencesLoaded { ticket, outcome } => {
                self.receive_preferences(ticket, outcome)
            }
            MatchEvent::CriteriaChanged(change) => {
                self.criteria.apply(change);
                true
            }
            MatchEvent::SortChanged(order) => {
                self.sort_order = order;
                true
            }
            MatchEvent::SearchChanged(text) => {
                self.search = text;
                true
            }
            MatchEvent::Reset => {
                self.criteria = FilterCriteria::default();
                self.sort_order = SortOrder::default();
                self.search.clear();
                true
            }
        };
        if !accepted {
            return None;
        }
        match recompute {
            Recompute::Full => self.rescore(),
            Recompute::FilterSort => self.refilter(),
        }
        Some(recompute)
    }

    /// Replace the selected fear categories.
    pub fn replace_fear_categories(&mut self, categories: BTreeSet<FearCategory>) {
        self.change_criteria(CriteriaChange::ReplaceFearCategories(categories));
    }

    /// Set or clear the difficulty ceiling.
    pub fn set_max_difficulty(&mut self, ceiling: Option<DifficultyLevel>) {
        self.change_criteria(CriteriaChange::SetMaxDifficulty(ceiling));
    }

    /// Set or clear the time commitment ceiling.
    pub fn set_max_time(&mut self, ceiling: Option<TimeCommitment>) {
        self.change_criteria(CriteriaChange::SetMaxTime(ceiling));
    }

    /// Set or clear the cost ceiling.
    pub fn set_max_cost(&mut self, ceiling: Option<CostRange>) {
        self.change_criteria(CriteriaChange::SetMaxCost(ceiling));
    }

    /// Set the required environment.
    pub fn set_environment(&mut self, environment: Environment) {
        self.change_criteria(CriteriaChange::SetEnvironment(environment));
    }

    /// Replace the selected locations.
    pub fn replace_locations(&mut self, locations: BTreeSet<LocationId>) {
        self.change_criteria(CriteriaChange::ReplaceLocations(locations));
    }

    /// Set the free-text search.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.dispatch(MatchEvent::SearchChanged(text.into()));
    }

    /// Set the sort order.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.dispatch(MatchEvent::SortChanged(order));
    }

    /// Restore default criteria, sort order and search text.
    pub fn reset_to_defaults(&mut self) {
        self.dispatch(MatchEvent::Reset);
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> MatchState {
        self.state
    }

    /// Filtered and sorted activities with their match scores.
    #[must_use]
    pub fn visible(&self) -> &[ScoredActivity] {
        &self.visible
    }

    /// Visible and pre-filter counts.
    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            visible: self.visible.len(),
            matched: self.scored.len(),
        }
    }

    /// Active filter criteria.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Active sort order.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Active search text, untrimmed.
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// User of the current session.
    #[must_use]
    pub const fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// Profile loaded for the current session, if any.
    #[must_use]
    pub const fn profile(&self) -> Option<&FearProfile> {
        self.profile.as_ref()
    }

    /// Preferences loaded for the current session, if any.
    #[must_use]
    pub const fn preferences(&self) -> Option<&PreferenceSet> {
        self.preferences.as_ref()
    }

    /// Catalog being matched.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    const fn next_token(&mut self) -> u64 {
        self.last_token = self.last_token.saturating_add(1);
        self.last_token
    }

    fn start_loads(&mut self, request: u64) -> LoadTicket {
        let ticket = LoadTicket {
            session: self.session,
            request,
        };
        if let Some(abandoned) = self.in_flight.replace(InFlight::new(ticket)) {
            debug!("abandoning loads for request {}", abandoned.ticket.request);
        }
        self.state = MatchState::Loading;
        ticket
    }

    fn fetch(&mut self, ticket: LoadTicket) {
        let Some(user) = self.user.clone() else {
            return;
        };
        let profile = self.profile_source.fetch_profile(&user);
        self.dispatch(MatchEvent::ProfileLoaded {
            ticket,
            outcome: profile,
        });
        let preferences = self.preference_source.fetch_preferences(&user);
        self.dispatch(MatchEvent::PreferencesLoaded {
            ticket,
            outcome: preferences,
        });
    }

    fn change_criteria(&mut self, change: CriteriaChange) {
        self.dispatch(MatchEvent::CriteriaChanged(change));
    }

    fn receive_profile(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Option<ProfileRecord>, LoadError>,
    ) -> bool {
        if !self.accepts(ticket, Load::Profile) {
            return false;
        }
        match outcome {
            Ok(record) => {
                self.profile = match (record, self.user.clone()) {
                    (Some(found), Some(user)) => found.into_profile(user),
                    _ => None,
                };
            }
            Err(err) => self.record_failure(&err),
        }
        self.settle(Load::Profile)
    }

    fn receive_preferences(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Option<PreferenceRecord>, LoadError>,
    ) -> bool {
        if !self.accepts(ticket, Load::Preferences) {
            return false;
        }
        match outcome {
            Ok(record) => self.preferences = record.map(PreferenceSet::from),
            Err(err) => self.record_failure(&err),
        }
        self.settle(Load::Preferences)
    }

    fn accepts(&self, ticket: LoadTicket, load: Load) -> bool {
        let current = self.in_flight.filter(|flight| flight.ticket == ticket);
        let pending = current.is_some_and(|flight| match load {
            Load::Profile => !flight.profile_settled,
            Load::Preferences => !flight.preferences_settled,
        });
        if !pending {
            debug!(
                "discarding stale {} load for request {}",
                load.as_str(),
                ticket.request
            );
        }
        pending
    }

    fn record_failure(&mut self, err: &LoadError) {
        warn!("{err}");
        if let Some(flight) = self.in_flight.as_mut() {
            flight.failed = true;
        }
        self.state = MatchState::Error;
    }

    /// Mark `load` settled; return whether both loads have now settled.
    fn settle(&mut self, load: Load) -> bool {
        let Some(flight) = self.in_flight.as_mut() else {
            return false;
        };
        match load {
            Load::Profile => flight.profile_settled = true,
            Load::Preferences => flight.preferences_settled = true,
        }
        if !flight.is_settled() {
            return false;
        }
        self.state = if flight.failed {
            MatchState::Error
        } else {
            MatchState::Ready
        };
        self.in_flight = None;
        true
    }

    fn rescore(&mut self) {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            score_catalog(
                &self.catalog,
                &self.scorer,
                self.profile.as_ref(),
                self.preferences.as_ref(),
            )
        }));
        match outcome {
            Ok(scored) => self.scored = scored,
            Err(_) => {
                warn!("scorer panicked; keeping the last scored list");
                self.state = MatchState::Error;
                if self.scored.is_empty() {
                    self.scored = unscored_catalog(&self.catalog);
                }
            }
        }
        self.refilter();
    }

    fn refilter(&mut self) {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let filtered = filter(&self.scored, &self.criteria, &self.search);
            sort(&filtered, self.sort_order)
        }));
        match outcome {
            Ok(visible) => self.visible = visible,
            Err(_) => {
                warn!("filtering panicked; keeping the last visible list");
                self.state = MatchState::Error;
                if self.visible.is_empty() {
                    self.visible.clone_from(&self.scored);
                }
            }
        }
        debug!(
            "published {} of {} activities ({})",
            self.visible.len(),
            self.scored.len(),
            self.state
        );
    }
}

fn score_catalog<S: Scorer>(
    catalog: &Catalog,
    scorer: &S,
    profile: Option<&FearProfile>,
    preferences: Option<&PreferenceSet>,
) -> Vec<ScoredActivity> {
    catalog
        .activities()
        .iter()
        .map(|activity| {
            let score = sanitise(scorer.score(activity, profile, preferences));
            ScoredActivity::scored(Arc::clone(activity), score)
        })
        .collect()
}

fn unscored_catalog(catalog: &Catalog) -> Vec<ScoredActivity> {
    catalog
        .activities()
        .iter()
        .map(|activity| ScoredActivity::unscored(Arc::clone(activity)))
        .collect()
}
