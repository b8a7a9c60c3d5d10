//! Collaborator records and their normalisation into canonical types.
//!
//! Catalog, profile and preference collaborators hand over loosely shaped
//! JSON: optional fields, alternative spellings (`difficulty` or
//! `difficultyLevel`, `cost` or `costRange`) and lists that may be `null` or
//! not lists at all. This module is the single place where that ambiguity is
//! resolved. Malformed lists become empty lists and are logged; nothing here
//! reaches the scorer or the filters in raw form.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::{
    Activity, ActivityError, CostRange, DifficultyLevel, Environment, FearCategory, FearProfile,
    Location, LocationId, PreferenceSet, TimeCommitment, UserId,
};

/// Errors raised while normalising an [`ActivityRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record carried no usable identifier.
    #[error("activity record has no identifier")]
    MissingId,
    /// The record carried no title.
    #[error("activity record {id} has no title")]
    MissingTitle {
        /// Identifier of the rejected record.
        id: String,
    },
    /// An ordinal or environment field held an unknown value.
    #[error("activity record {id} has invalid {field} '{value}'")]
    InvalidField {
        /// Identifier of the rejected record.
        id: String,
        /// Name of the offending field.
        field: &'static str,
        /// Raw value found.
        value: String,
    },
    /// The record failed activity validation.
    #[error(transparent)]
    Activity(#[from] ActivityError),
}

/// Raw catalog entry as supplied by the catalog loader.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityRecord {
    /// Identifier; numbers are accepted and stringified.
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Title.
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Description.
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Fear category tags; unknown tags are skipped.
    #[serde(alias = "fears", alias = "categories", deserialize_with = "lenient_items")]
    pub fear_categories: Vec<String>,
    /// Difficulty (`difficulty` or `difficultyLevel`).
    #[serde(alias = "difficultyLevel", deserialize_with = "lenient_string")]
    pub difficulty: Option<String>,
    /// Cost (`cost` or `costRange`).
    #[serde(alias = "costRange", deserialize_with = "lenient_string")]
    pub cost: Option<String>,
    /// Time commitment (`timeCommitment` or `time`).
    #[serde(alias = "time", deserialize_with = "lenient_string")]
    pub time_commitment: Option<String>,
    /// Environment (`environment` or `indoorOutdoor`).
    #[serde(alias = "indoorOutdoor", deserialize_with = "lenient_string")]
    pub environment: Option<String>,
    /// Locations as bare ids or `{ id, name }` objects.
    #[serde(deserialize_with = "lenient_items")]
    pub locations: Vec<LocationRecord>,
}

/// A location reference inside an [`ActivityRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LocationRecord {
    /// Bare identifier; the name defaults to the id.
    Id(String),
    /// Identifier with an optional display name.
    Named {
        /// Identifier.
        id: String,
        /// Display name.
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        match record {
            LocationRecord::Id(id) => Self::new(id.clone(), id),
            LocationRecord::Named { id, name } => {
                let display = name.unwrap_or_else(|| id.clone());
                Self::new(id, display)
            }
        }
    }
}

impl TryFrom<ActivityRecord> for Activity {
    type Error = RecordError;

    /// Normalise a record, defaulting absent ordinal fields to
    /// moderate difficulty, medium cost, half-day and either environment.
    fn try_from(record: ActivityRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(RecordError::MissingId)?;
        let title = record
            .title
            .ok_or_else(|| RecordError::MissingTitle { id: id.clone() })?;
        let categories = parse_categories(&record.fear_categories);
        let difficulty = required_field(&id, "difficulty", record.difficulty.as_deref())?
            .unwrap_or(DifficultyLevel::Moderate);
        let cost = required_field(&id, "cost", record.cost.as_deref())?.unwrap_or(CostRange::Medium);
        let time = required_field(&id, "timeCommitment", record.time_commitment.as_deref())?
            .unwrap_or(TimeCommitment::HalfDay);
        let environment = required_field(&id, "environment", record.environment.as_deref())?
            .unwrap_or(Environment::Both);

        let mut activity = Self::new(id, title, categories, difficulty, cost, time, environment)?;
        activity.description = record.description.unwrap_or_default();
        activity.locations = record.locations.into_iter().map(Location::from).collect();
        Ok(activity)
    }
}

/// A single fear-assessment result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssessmentResult {
    /// Category tag.
    pub category: String,
    /// Raw intensity on the assessment scale.
    pub score: f32,
}

/// A dedicated fear-assessment record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssessmentRecord {
    /// When the assessment was taken (RFC 3339).
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Per-category results; malformed entries are skipped.
    #[serde(deserialize_with = "lenient_items")]
    pub results: Vec<AssessmentResult>,
    /// Selected fear tags sent alongside the results, used when no result
    /// is recognised.
    #[serde(
        default,
        rename = "keyFears",
        alias = "key_fears",
        deserialize_with = "lenient_items"
    )]
    pub key_fears: Vec<String>,
}

impl AssessmentRecord {
    /// Recognised `(category, score)` pairs in record order.
    pub fn entries(&self) -> impl Iterator<Item = (FearCategory, f32)> + '_ {
        self.results.iter().filter_map(|result| {
            FearCategory::from_str(&result.category)
                .map_err(|err| warn!("ignoring assessment result: {err}"))
                .ok()
                .map(|category| (category, result.score))
        })
    }
}

/// The flat "selected fear tags" profile field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeyFearsRecord {
    /// Selected fear tags.
    #[serde(rename = "keyFears", alias = "key_fears", deserialize_with = "lenient_items")]
    pub key_fears: Vec<String>,
}

/// Whatever the profile collaborator supplies for a user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProfileRecord {
    /// One assessment.
    Assessment(AssessmentRecord),
    /// Several assessments; the most recent wins.
    Assessments(Vec<AssessmentRecord>),
    /// Selected fear tags only.
    KeyFears(KeyFearsRecord),
}

impl ProfileRecord {
    /// Normalise into a [`FearProfile`] for `user_id`.
    ///
    /// Returns `None` only for an empty list of assessments.
    #[must_use]
    pub fn into_profile(self, user_id: UserId) -> Option<FearProfile> {
        match self {
            Self::Assessment(record) => Some(FearProfile::from_assessment(user_id, &record)),
            Self::Assessments(records) => FearProfile::from_assessments(user_id, &records),
            Self::KeyFears(record) => Some(FearProfile::from_key_fears(user_id, record.key_fears)),
        }
    }
}

/// Raw preference record as supplied by the preference collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceRecord {
    /// Preferred or maximum difficulty.
    #[serde(
        alias = "preferredDifficulty",
        alias = "difficultyLevel",
        alias = "maxDifficulty",
        deserialize_with = "lenient_string"
    )]
    pub difficulty: Option<String>,
    /// Cost ceiling.
    #[serde(
        alias = "costRange",
        alias = "cost",
        alias = "maxCostRange",
        deserialize_with = "lenient_string"
    )]
    pub max_cost: Option<String>,
    /// Preferred or maximum time commitment.
    #[serde(
        alias = "time",
        alias = "maxTimeCommitment",
        deserialize_with = "lenient_string"
    )]
    pub time_commitment: Option<String>,
    /// Indoor/outdoor preference.
    #[serde(
        alias = "indoorOutdoor",
        alias = "indoorOutdoorPreference",
        deserialize_with = "lenient_string"
    )]
    pub environment: Option<String>,
    /// Preferred location ids.
    #[serde(
        alias = "locations",
        alias = "preferredLocationIds",
        deserialize_with = "lenient_items"
    )]
    pub preferred_locations: Vec<String>,
}

impl From<PreferenceRecord> for PreferenceSet {
    /// Resolve every field, substituting defaults for absent or unknown
    /// values.
    fn from(record: PreferenceRecord) -> Self {
        let defaults = Self::default();
        Self {
            difficulty: lenient_field("difficulty", record.difficulty.as_deref())
                .unwrap_or(defaults.difficulty),
            max_cost: lenient_field("maxCost", record.max_cost.as_deref())
                .unwrap_or(defaults.max_cost),
            time_commitment: lenient_field("timeCommitment", record.time_commitment.as_deref())
                .unwrap_or(defaults.time_commitment),
            environment: lenient_field("environment", record.environment.as_deref())
                .unwrap_or(defaults.environment),
            preferred_locations: record
                .preferred_locations
                .into_iter()
                .filter(|id| !id.trim().is_empty())
                .map(LocationId::new)
                .collect(),
        }
    }
}

fn parse_categories(tags: &[String]) -> Vec<FearCategory> {
    tags.iter()
        .filter_map(|tag| {
            FearCategory::from_str(tag)
                .map_err(|err| warn!("ignoring activity tag: {err}"))
                .ok()
        })
        .collect()
}

fn required_field<T>(id: &str, field: &'static str, raw: Option<&str>) -> Result<Option<T>, RecordError>
where
    T: FromStr<Err = String>,
{
    raw.map(|value| {
        T::from_str(value).map_err(|_| RecordError::InvalidField {
            id: id.to_owned(),
            field,
            value: value.to_owned(),
        })
    })
    .transpose()
}

fn lenient_field<T>(field: &'static str, raw: Option<&str>) -> Option<T>
where
    T: FromStr<Err = String>,
{
    raw.and_then(|value| {
        T::from_str(value)
            .map_err(|err| warn!("using default preference {field}: {err}"))
            .ok()
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Null => None,
        other => {
            warn!("expected a string, found {other}; treating as absent");
            None
        }
    })
}

fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(items_from_value(value))
}

fn items_from_value<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| {
                serde_json::from_value(item)
                    .map_err(|err| warn!("skipping malformed list entry: {err}"))
                    .ok()
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            warn!("expected a list, found {other}; using an empty list");
            Vec::new()
        }
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient_string(deserializer)?;
    Ok(raw.and_then(|text| {
        DateTime::parse_from_rfc3339(&text)
            .map(|stamp| stamp.with_timezone(&Utc))
            .map_err(|err| warn!("ignoring assessment timestamp '{text}': {err}"))
            .ok()
    }))
}
