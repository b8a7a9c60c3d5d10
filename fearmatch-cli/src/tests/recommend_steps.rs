//! Behaviour-driven step definitions driving the recommend CLI scenarios.

use super::helpers::{CATALOG_JSON, Inputs, PREFERENCES_JSON, PROFILE_JSON, write_utf8};
use super::*;
use crate::recommend::{RecommendReport, run_recommend_with};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct RecommendWorld {
    inputs: Inputs,
    catalog_path: Utf8PathBuf,
    include_catalog: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RecommendWorld {
    fn new() -> Self {
        let inputs = Inputs::new();
        let catalog_path = inputs.path("catalog.json");
        Self {
            inputs,
            catalog_path,
            include_catalog: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn push_args<const N: usize>(&self, args: [String; N]) {
        self.cli_args.borrow_mut().extend(args);
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["fearmatch".to_owned(), "recommend".to_owned()];
        if *self.include_catalog.borrow() {
            argv.extend([
                format!("--{ARG_CATALOG}"),
                self.catalog_path.as_str().to_owned(),
            ]);
        }
        argv.extend([format!("--{ARG_USER}"), "bdd-user".to_owned()]);
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }

    fn report(&self) -> RecommendReport {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be a JSON report")
    }
}

#[fixture]
fn world() -> RecommendWorld {
    RecommendWorld::new()
}

#[given("a catalog exists on disk")]
fn catalog_exists(#[from(world)] world: &RecommendWorld) {
    write_utf8(&world.catalog_path, CATALOG_JSON.as_bytes());
}

#[given("a fear profile and preferences exist on disk")]
fn profile_and_preferences_exist(#[from(world)] world: &RecommendWorld) {
    let profile = world.inputs.write("profile.json", PROFILE_JSON);
    let preferences = world.inputs.write("preferences.json", PREFERENCES_JSON);
    world.push_args([
        format!("--{ARG_PROFILE}"),
        profile.into_string(),
        format!("--{ARG_PREFERENCES}"),
        preferences.into_string(),
    ]);
}

#[given("I limit difficulty to moderate and sort alphabetically")]
fn limit_difficulty_and_sort(#[from(world)] world: &RecommendWorld) {
    world.push_args([
        format!("--{ARG_MAX_DIFFICULTY}"),
        "moderate".to_owned(),
        format!("--{ARG_SORT}"),
        "alphabetical".to_owned(),
    ]);
}

#[given("I filter by the fear category lava")]
fn filter_by_unknown_fear(#[from(world)] world: &RecommendWorld) {
    world.push_args([format!("--{ARG_FEARS}"), "water,lava".to_owned()]);
}

#[given("I omit the catalog path")]
fn omit_catalog_path(#[from(world)] world: &RecommendWorld) {
    *world.include_catalog.borrow_mut() = false;
}

#[given("the catalog contains invalid JSON")]
fn catalog_contains_invalid_json(#[from(world)] world: &RecommendWorld) {
    write_utf8(&world.catalog_path, b"{ not valid json");
}

#[when("I run the recommend command")]
fn run_recommend_command(#[from(world)] world: &RecommendWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Recommend(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_recommend_with(args, &mut *buffer)
        }
    });

    world.result.replace(Some(outcome));
}

#[then("the command succeeds and ranks the open water swim first")]
fn command_ranks_swim_first(#[from(world)] world: &RecommendWorld) {
    let report = world.report();
    assert_eq!(report.state, "ready");
    let first = report.activities.first().expect("visible activity");
    assert_eq!(first.id, "swim");
}

#[then("the command succeeds and shows two activities")]
fn command_shows_two_activities(#[from(world)] world: &RecommendWorld) {
    let report = world.report();
    let titles: Vec<_> = report
        .activities
        .iter()
        .map(|entry| entry.title.as_str())
        .collect();
    assert_eq!(titles, ["Five Minute Talk", "Indoor Climbing Taster"]);
    assert_eq!(report.matched, 3);
}

#[then("the command fails because the catalog path is missing")]
fn command_fails_missing_catalog(#[from(world)] world: &RecommendWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_CATALOG),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the catalog JSON is invalid")]
fn command_fails_invalid_catalog(#[from(world)] world: &RecommendWorld) {
    match &*world.error() {
        CliError::ParseCatalog { .. } => {}
        other => panic!("expected ParseCatalog, found {other:?}"),
    }
}

#[then("the command fails because a fear category is unknown")]
fn command_fails_unknown_fear(#[from(world)] world: &RecommendWorld) {
    match &*world.error() {
        CliError::InvalidFearCategory { reason } => assert!(reason.contains("lava")),
        other => panic!("expected InvalidFearCategory, found {other:?}"),
    }
}

macro_rules! register_recommend_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/recommend_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RecommendWorld) {
            let _ = world;
        }
    };
}

register_recommend_scenario!(
    recommend_happy_path,
    "recommending from a catalog with profile and preferences"
);
register_recommend_scenario!(recommend_with_filters, "narrowing recommendations with filters");
register_recommend_scenario!(recommend_missing_catalog, "rejecting a missing catalog path");
register_recommend_scenario!(recommend_invalid_catalog, "rejecting invalid catalog JSON");
register_recommend_scenario!(recommend_unknown_fear, "rejecting unknown fear categories");
