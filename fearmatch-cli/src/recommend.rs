//! Recommend command implementation.

use std::collections::BTreeSet;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fearmatch_core::{
    ActivityRecord, Catalog, CostRange, DifficultyLevel, Environment, FearCategory,
    FilterCriteria, LocationId, SortOrder, TimeCommitment, UserId,
};
use fearmatch_fs::read_utf8_file;
use fearmatch_pipeline::{MatchEvent, MatchOrchestrator};
use fearmatch_scorer::MatchScorer;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::sources::{FilePreferenceSource, FileProfileSource};
use crate::{
    ARG_CATALOG, ARG_ENVIRONMENT, ARG_FEARS, ARG_LOCATIONS, ARG_MAX_COST, ARG_MAX_DIFFICULTY,
    ARG_MAX_TIME, ARG_PREFERENCES, ARG_PROFILE, ARG_SEARCH, ARG_SORT, ARG_USER, CliError,
    DEFAULT_USER, ENV_CATALOG,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score an activity catalog against a user's fear profile and \
                 preferences, apply filters and search, and print the visible \
                 list as JSON. Options can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Recommend activities from a catalog"
)]
#[ortho_config(prefix = "FEARMATCH")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON array of activity records.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Path to a JSON fear profile record.
    #[arg(long = ARG_PROFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) profile: Option<Utf8PathBuf>,
    /// Path to a JSON preference record.
    #[arg(long = ARG_PREFERENCES, value_name = "path")]
    #[serde(default)]
    pub(crate) preferences: Option<Utf8PathBuf>,
    /// User the records belong to.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Comma-separated fear categories; activities must confront any of them.
    #[arg(long = ARG_FEARS, value_name = "list")]
    #[serde(default)]
    pub(crate) fears: Option<String>,
    /// Hardest difficulty to include.
    #[arg(long = ARG_MAX_DIFFICULTY, value_name = "level")]
    #[serde(default)]
    pub(crate) max_difficulty: Option<DifficultyLevel>,
    /// Longest time commitment to include.
    #[arg(long = ARG_MAX_TIME, value_name = "time")]
    #[serde(default)]
    pub(crate) max_time: Option<TimeCommitment>,
    /// Most expensive cost range to include.
    #[arg(long = ARG_MAX_COST, value_name = "cost")]
    #[serde(default)]
    pub(crate) max_cost: Option<CostRange>,
    /// Required environment: indoor, outdoor or both.
    #[arg(long = ARG_ENVIRONMENT, value_name = "environment")]
    #[serde(default)]
    pub(crate) environment: Option<Environment>,
    /// Comma-separated location ids; activities must run at any of them.
    #[arg(long = ARG_LOCATIONS, value_name = "list")]
    #[serde(default)]
    pub(crate) locations: Option<String>,
    /// Free-text search over titles, descriptions, fears and locations.
    #[arg(long = ARG_SEARCH, value_name = "text")]
    #[serde(default)]
    pub(crate) search: Option<String>,
    /// Sort order: recommended, alphabetical, difficulty_asc or difficulty_desc.
    #[arg(long = ARG_SORT, value_name = "order")]
    #[serde(default)]
    pub(crate) sort: Option<SortOrder>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    /// Catalog file.
    pub(crate) catalog: Utf8PathBuf,
    /// Optional profile record file.
    pub(crate) profile: Option<Utf8PathBuf>,
    /// Optional preference record file.
    pub(crate) preferences: Option<Utf8PathBuf>,
    /// Session user.
    pub(crate) user: UserId,
    /// Filters to apply once loaded.
    pub(crate) criteria: FilterCriteria,
    /// Final ordering.
    pub(crate) sort: SortOrder,
    /// Search text.
    pub(crate) search: String,
}

impl RecommendConfig {
    /// Check the catalog path up front.
    ///
    /// Profile and preference files are left to their sources: a missing or
    /// unreadable record is a load failure reported through the match state.
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.catalog, ARG_CATALOG)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match fearmatch_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_CATALOG,
        })?;
        let fear_categories = split_list(args.fears.as_deref())
            .map(str::parse::<FearCategory>)
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|reason| CliError::InvalidFearCategory { reason })?;
        let locations = split_list(args.locations.as_deref())
            .map(LocationId::new)
            .collect();
        let user = args
            .user
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER.to_owned());

        Ok(Self {
            catalog,
            profile: args.profile,
            preferences: args.preferences,
            user: UserId::new(user),
            criteria: FilterCriteria {
                fear_categories,
                max_difficulty: args.max_difficulty,
                max_time: args.max_time,
                max_cost: args.max_cost,
                environment: args.environment.unwrap_or_default(),
                locations,
            },
            sort: args.sort.unwrap_or_default(),
            search: args.search.unwrap_or_default(),
        })
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// JSON document printed by `recommend`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecommendReport {
    /// Final orchestrator state.
    pub(crate) state: String,
    /// Number of visible activities.
    pub(crate) visible: usize,
    /// Number of scored activities before filtering.
    pub(crate) matched: usize,
    /// Visible activities in display order.
    pub(crate) activities: Vec<ReportEntry>,
}

/// One visible activity.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportEntry {
    /// Activity id.
    pub(crate) id: String,
    /// Activity title.
    pub(crate) title: String,
    /// Match score, absent when scoring failed.
    pub(crate) match_score: Option<f32>,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_recommend_config(args)?;
    let report = execute_recommend(config)?;
    write_report(writer, &report)
}

fn resolve_recommend_config(args: RecommendArgs) -> Result<RecommendConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn execute_recommend(config: RecommendConfig) -> Result<RecommendReport, CliError> {
    let catalog = load_catalog(&config.catalog)?;
    let mut orchestrator = MatchOrchestrator::new(
        catalog,
        FileProfileSource::new(config.profile),
        FilePreferenceSource::new(config.preferences),
        MatchScorer::new(),
    );
    let state = orchestrator.load_session(config.user);
    for change in config.criteria.into_changes() {
        orchestrator.dispatch(MatchEvent::CriteriaChanged(change));
    }
    orchestrator.set_sort_order(config.sort);
    orchestrator.set_search_text(config.search);
    debug!("recommend finished in state {state}");

    let summary = orchestrator.summary();
    Ok(RecommendReport {
        state: orchestrator.state().as_str().to_owned(),
        visible: summary.visible,
        matched: summary.matched,
        activities: orchestrator
            .visible()
            .iter()
            .map(|item| ReportEntry {
                id: item.activity.id.to_string(),
                title: item.activity.title.clone(),
                match_score: item.match_score,
            })
            .collect(),
    })
}

/// Load and normalise a JSON catalog file.
pub(crate) fn load_catalog(path: &Utf8Path) -> Result<Catalog, CliError> {
    let contents = read_utf8_file(path).map_err(|source| CliError::ReadCatalog {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<ActivityRecord> =
        serde_json::from_str(&contents).map_err(|source| CliError::ParseCatalog {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Catalog::from_records(records))
}

fn write_report(writer: &mut dyn Write, report: &RecommendReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
