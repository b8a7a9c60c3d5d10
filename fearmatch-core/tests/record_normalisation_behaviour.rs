//! Behavioural coverage for collaborator record normalisation.

use std::cell::RefCell;

use fearmatch_core::{
    ActivityRecord, Catalog, CostRange, DifficultyLevel, FearProfile, NEUTRAL_INTENSITY,
    PreferenceRecord, PreferenceSet, ProfileRecord, UserId,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Scenario state shared between steps.
#[derive(Debug, Default)]
struct RecordWorld {
    activity_records: RefCell<Vec<ActivityRecord>>,
    profile_record: RefCell<Option<ProfileRecord>>,
    preference_record: RefCell<Option<PreferenceRecord>>,
    catalog: RefCell<Option<Catalog>>,
    profile: RefCell<Option<FearProfile>>,
    preferences: RefCell<Option<PreferenceSet>>,
}

#[fixture]
fn world() -> RecordWorld {
    RecordWorld::default()
}

fn parse_activities(json: &str) -> Vec<ActivityRecord> {
    serde_json::from_str(json).expect("fixture JSON must parse")
}

#[given("a catalog record using difficultyLevel and costRange")]
fn legacy_activity(world: &RecordWorld) {
    world.activity_records.replace(parse_activities(
        r#"[{"id": "dive", "title": "Open Water Dive", "fearCategories": ["water"],
             "difficultyLevel": "challenging", "costRange": "high"}]"#,
    ));
}

#[given("a catalog record whose fear list is a plain string")]
fn string_fear_list(world: &RecordWorld) {
    world.activity_records.replace(parse_activities(
        r#"[{"id": "dive", "title": "Open Water Dive", "fearCategories": "water"}]"#,
    ));
}

#[given("a profile record listing key fears heights and water")]
fn key_fears(world: &RecordWorld) {
    let record: ProfileRecord = serde_json::from_str(r#"{"keyFears": ["heights", "water"]}"#)
        .expect("fixture JSON must parse");
    world.profile_record.replace(Some(record));
}

#[given("an empty preference record")]
fn empty_preferences(world: &RecordWorld) {
    world
        .preference_record
        .replace(Some(PreferenceRecord::default()));
}

#[when("I normalise the catalog")]
fn normalise_catalog(world: &RecordWorld) {
    let records = world.activity_records.take();
    world.catalog.replace(Some(Catalog::from_records(records)));
}

#[when("I normalise the profile")]
fn normalise_profile(world: &RecordWorld) {
    let record = world
        .profile_record
        .take()
        .expect("profile record should be set");
    world
        .profile
        .replace(record.into_profile(UserId::new("scenario-user")));
}

#[when("I normalise the preferences")]
fn normalise_preferences(world: &RecordWorld) {
    let record = world
        .preference_record
        .take()
        .expect("preference record should be set");
    world.preferences.replace(Some(PreferenceSet::from(record)));
}

#[then("the activity is challenging and expensive")]
fn activity_is_challenging(world: &RecordWorld) {
    let catalog = world.catalog.borrow();
    let catalog = catalog.as_ref().expect("catalog should be normalised");
    let activity = catalog.activities().first().expect("one activity");
    assert_eq!(activity.difficulty, DifficultyLevel::Challenging);
    assert_eq!(activity.cost, CostRange::High);
}

#[then("the catalog is empty")]
fn catalog_is_empty(world: &RecordWorld) {
    let catalog = world.catalog.borrow();
    assert!(catalog.as_ref().is_some_and(Catalog::is_empty));
}

#[then("every synthesised fear has the neutral intensity")]
fn neutral_intensity(world: &RecordWorld) {
    let profile = world.profile.borrow();
    let profile = profile.as_ref().expect("profile should be normalised");
    assert_eq!(profile.scores().len(), 2);
    assert!(
        profile
            .scores()
            .iter()
            .all(|score| (score.intensity - NEUTRAL_INTENSITY).abs() < f32::EPSILON)
    );
}

#[then("the preferences equal the defaults")]
fn preferences_are_defaults(world: &RecordWorld) {
    let preferences = world.preferences.borrow();
    assert_eq!(preferences.as_ref(), Some(&PreferenceSet::default()));
}

#[scenario(path = "tests/features/record_normalisation.feature", index = 0)]
fn legacy_field_names(world: RecordWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/record_normalisation.feature", index = 1)]
fn malformed_fear_list(world: RecordWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/record_normalisation.feature", index = 2)]
fn synthesised_key_fears(world: RecordWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/record_normalisation.feature", index = 3)]
fn preference_defaults(world: RecordWorld) {
    let _ = world;
}
