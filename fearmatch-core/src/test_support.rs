//! Test-only fixtures and in-memory collaborators used by unit and
//! behaviour tests across the workspace.

use std::collections::HashMap;

use crate::{
    Activity, ActivityId, Catalog, CostRange, DifficultyLevel, Environment, FearCategory,
    FearProfile, LoadError, Location, PreferenceRecord, PreferenceSet, PreferenceSource,
    ProfileRecord, ProfileSource, Scorer, TimeCommitment, UserId,
};

/// Build a valid activity with neutral cost, time and environment.
///
/// # Panics
/// Panics when `categories` is empty or `id` is blank.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures should fail fast on bad input")]
pub fn activity(
    id: &str,
    title: &str,
    categories: &[FearCategory],
    difficulty: DifficultyLevel,
) -> Activity {
    Activity::new(
        id,
        title,
        categories.to_vec(),
        difficulty,
        CostRange::Medium,
        TimeCommitment::HalfDay,
        Environment::Both,
    )
    .expect("fixture activity must be valid")
}

/// Ten activities covering every difficulty, several locations and exactly
/// one title containing "kayak".
#[must_use]
pub fn sample_activities() -> Vec<Activity> {
    let lisbon = Location::new("lisbon", "Lisbon");
    let alps = Location::new("alps", "Chamonix Alps");
    let berlin = Location::new("berlin", "Berlin");
    vec![
        activity(
            "kayak",
            "White Water Kayaking",
            &[FearCategory::Water],
            DifficultyLevel::Challenging,
        )
        .with_description("Paddle grade III rapids with a guide")
        .with_location(alps.clone()),
        activity("zipline", "Canopy Zip Line", &[FearCategory::Heights], DifficultyLevel::Easy)
            .with_location(alps.clone()),
        activity(
            "toastmasters",
            "Toastmasters Evening",
            &[FearCategory::PublicSpeaking, FearCategory::Social],
            DifficultyLevel::Moderate,
        )
        .with_location(berlin.clone()),
        activity("cave", "Cave Crawl", &[FearCategory::Confined, FearCategory::Darkness], DifficultyLevel::Difficult),
        activity("snorkel", "Reef Snorkelling", &[FearCategory::Water], DifficultyLevel::Beginner)
            .with_location(lisbon.clone()),
        activity("glider", "Tandem Glider Flight", &[FearCategory::Flying, FearCategory::Heights], DifficultyLevel::Challenging),
        activity("farm", "Petting Farm Visit", &[FearCategory::Animals], DifficultyLevel::Beginner)
            .with_location(lisbon),
        activity("meetup", "Board Game Meetup", &[FearCategory::Social], DifficultyLevel::Easy)
            .with_location(berlin),
        activity("bridge", "Suspension Bridge Walk", &[FearCategory::Heights], DifficultyLevel::Moderate),
        activity("night", "Night Forest Walk", &[FearCategory::Darkness], DifficultyLevel::Easy)
            .with_location(alps),
    ]
}

/// [`sample_activities`] wrapped in a [`Catalog`].
///
/// # Panics
/// Panics if the fixture ever contains duplicate ids.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures should fail fast on bad input")]
pub fn sample_catalog() -> Catalog {
    Catalog::new(sample_activities()).expect("sample catalog ids are unique")
}

/// A profile holding a single category at `intensity`.
#[must_use]
pub fn single_fear_profile(category: FearCategory, intensity: f32) -> FearProfile {
    FearProfile::new(UserId::new("test-user"), None, [(category, intensity)])
}

/// Preferences differing from the defaults only in difficulty.
#[must_use]
pub fn preferences_for(difficulty: DifficultyLevel) -> PreferenceSet {
    PreferenceSet {
        difficulty,
        ..PreferenceSet::default()
    }
}

/// Test `Scorer` returning fixed scores per activity id, `0.0` otherwise.
#[derive(Debug, Clone, Default)]
pub struct FixedScorer {
    scores: HashMap<ActivityId, f32>,
}

impl FixedScorer {
    /// Assign a score to an activity id while returning `self` for chaining.
    #[must_use]
    pub fn with_score(mut self, id: &str, score: f32) -> Self {
        self.scores.insert(ActivityId::new(id), score);
        self
    }
}

impl Scorer for FixedScorer {
    fn score(
        &self,
        activity: &Activity,
        _profile: Option<&FearProfile>,
        _preferences: Option<&PreferenceSet>,
    ) -> f32 {
        self.scores.get(&activity.id).copied().unwrap_or(0.0)
    }
}

/// In-memory [`ProfileSource`] returning the same outcome for every user.
#[derive(Debug, Clone)]
pub struct StaticProfileSource {
    outcome: Result<Option<ProfileRecord>, LoadError>,
}

impl StaticProfileSource {
    /// Always return `record`.
    #[must_use]
    pub const fn returning(record: Option<ProfileRecord>) -> Self {
        Self {
            outcome: Ok(record),
        }
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn failing(error: LoadError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl ProfileSource for StaticProfileSource {
    fn fetch_profile(&self, _user: &UserId) -> Result<Option<ProfileRecord>, LoadError> {
        self.outcome.clone()
    }
}

/// In-memory [`PreferenceSource`] returning the same outcome for every user.
#[derive(Debug, Clone)]
pub struct StaticPreferenceSource {
    outcome: Result<Option<PreferenceRecord>, LoadError>,
}

impl StaticPreferenceSource {
    /// Always return `record`.
    #[must_use]
    pub const fn returning(record: Option<PreferenceRecord>) -> Self {
        Self {
            outcome: Ok(record),
        }
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn failing(error: LoadError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl PreferenceSource for StaticPreferenceSource {
    fn fetch_preferences(&self, _user: &UserId) -> Result<Option<PreferenceRecord>, LoadError> {
        self.outcome.clone()
    }
}
