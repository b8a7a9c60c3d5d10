//! Command-line interface for matching fear-confrontation activities.
//!
//! `fearmatch recommend` loads an activity catalog together with optional
//! fear profile and preference records, runs them through the matching
//! pipeline and prints the visible list as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod recommend;
mod sources;

pub use error::CliError;

use recommend::{RecommendArgs, run_recommend};

pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ARG_PROFILE: &str = "profile";
pub(crate) const ARG_PREFERENCES: &str = "preferences";
pub(crate) const ARG_USER: &str = "user";
pub(crate) const ARG_FEARS: &str = "fears";
pub(crate) const ARG_MAX_DIFFICULTY: &str = "max-difficulty";
pub(crate) const ARG_MAX_TIME: &str = "max-time";
pub(crate) const ARG_MAX_COST: &str = "max-cost";
pub(crate) const ARG_ENVIRONMENT: &str = "environment";
pub(crate) const ARG_LOCATIONS: &str = "locations";
pub(crate) const ARG_SEARCH: &str = "search";
pub(crate) const ARG_SORT: &str = "sort";
pub(crate) const ENV_CATALOG: &str = "FEARMATCH_CMDS_RECOMMEND_CATALOG";

/// User id assumed when none is configured.
pub(crate) const DEFAULT_USER: &str = "local";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments are invalid, inputs cannot be read or
/// the report cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fearmatch",
    about = "Recommend fear-confrontation activities for a user",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score, filter and sort a catalog for one user.
    Recommend(RecommendArgs),
}

#[cfg(test)]
mod tests;
