//! Order-preserving inclusion filters.

use fearmatch_core::{Activity, FilterCriteria, Ordinal};

type Step = fn(&Activity, &FilterCriteria) -> bool;

/// Criteria steps in application order. Unset criteria always pass.
const STEPS: [Step; 6] = [
    fear_categories,
    max_difficulty,
    max_time,
    max_cost,
    environment,
    locations,
];

/// Keep the items satisfying `criteria` and matching `search`.
///
/// The result is a subsequence of `items`. A blank `search` matches every
/// item, and [`FilterCriteria::default`] keeps everything.
///
/// # Examples
///
/// ```
/// use fearmatch_core::{CriteriaChange, DifficultyLevel, FilterCriteria};
/// use fearmatch_core::test_support::sample_activities;
/// use fearmatch_pipeline::filter;
///
/// let activities = sample_activities();
/// let criteria = FilterCriteria::default()
///     .with(CriteriaChange::SetMaxDifficulty(Some(DifficultyLevel::Beginner)));
/// let kept = filter(&activities, &criteria, "");
/// assert!(kept.iter().all(|a| a.difficulty == DifficultyLevel::Beginner));
/// ```
#[must_use]
pub fn filter<T>(items: &[T], criteria: &FilterCriteria, search: &str) -> Vec<T>
where
    T: AsRef<Activity> + Clone,
{
    let needle = search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            let activity = item.as_ref();
            matches_criteria(activity, criteria) && contains_needle(activity, &needle)
        })
        .cloned()
        .collect()
}

/// Report whether `activity` passes every set criterion.
#[must_use]
pub fn matches_criteria(activity: &Activity, criteria: &FilterCriteria) -> bool {
    STEPS.iter().all(|step| step(activity, criteria))
}

/// Case-insensitive substring match over title, description, fear category
/// names and location names. Blank search text matches everything.
#[must_use]
pub fn matches_search(activity: &Activity, search: &str) -> bool {
    contains_needle(activity, &search.trim().to_lowercase())
}

fn contains_needle(activity: &Activity, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(needle);
    hit(&activity.title)
        || hit(&activity.description)
        || activity
            .fear_categories
            .iter()
            .any(|category| hit(category.as_str()) || hit(category.label()))
        || activity.locations.iter().any(|location| hit(&location.name))
}

fn fear_categories(activity: &Activity, criteria: &FilterCriteria) -> bool {
    criteria.fear_categories.is_empty()
        || activity
            .fear_categories
            .iter()
            .any(|category| criteria.fear_categories.contains(category))
}

fn max_difficulty(activity: &Activity, criteria: &FilterCriteria) -> bool {
    criteria
        .max_difficulty
        .is_none_or(|ceiling| activity.difficulty.rank() <= ceiling.rank())
}

fn max_time(activity: &Activity, criteria: &FilterCriteria) -> bool {
    criteria
        .max_time
        .is_none_or(|ceiling| activity.time_commitment.rank() <= ceiling.rank())
}

fn max_cost(activity: &Activity, criteria: &FilterCriteria) -> bool {
    criteria
        .max_cost
        .is_none_or(|ceiling| activity.cost.rank() <= ceiling.rank())
}

fn environment(activity: &Activity, criteria: &FilterCriteria) -> bool {
    activity.environment.satisfies(criteria.environment)
}

fn locations(activity: &Activity, criteria: &FilterCriteria) -> bool {
    criteria.locations.is_empty()
        || activity
            .location_ids()
            .any(|id| criteria.locations.contains(id))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use fearmatch_core::test_support::{activity, sample_activities};
    use fearmatch_core::{
        CriteriaChange, DifficultyLevel, Environment, FearCategory, LocationId, TimeCommitment,
    };
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn activities() -> Vec<Activity> {
        sample_activities()
    }

    fn ids(items: &[Activity]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[rstest]
    fn default_criteria_keep_everything(activities: Vec<Activity>) {
        assert_eq!(filter(&activities, &FilterCriteria::default(), "  "), activities);
    }

    #[rstest]
    fn fear_categories_use_any_semantics(activities: Vec<Activity>) {
        let criteria = FilterCriteria::default().with(CriteriaChange::ReplaceFearCategories(
            BTreeSet::from([FearCategory::Water, FearCategory::Animals]),
        ));
        assert_eq!(ids(&filter(&activities, &criteria, "")), ["kayak", "snorkel", "farm"]);
    }

    #[rstest]
    fn difficulty_ceiling_is_inclusive() {
        let activities = vec![
            activity("a", "A", &[FearCategory::Water], DifficultyLevel::Beginner),
            activity("b", "B", &[FearCategory::Water], DifficultyLevel::Moderate),
            activity("c", "C", &[FearCategory::Water], DifficultyLevel::Difficult),
        ];
        let criteria = FilterCriteria::default()
            .with(CriteriaChange::SetMaxDifficulty(Some(DifficultyLevel::Moderate)));
        assert_eq!(ids(&filter(&activities, &criteria, "")), ["a", "b"]);
    }

    #[rstest]
    fn time_ceiling_excludes_longer_activities(activities: Vec<Activity>) {
        let criteria = FilterCriteria::default()
            .with(CriteriaChange::SetMaxTime(Some(TimeCommitment::OneToThreeHours)));
        assert!(filter(&activities, &criteria, "").is_empty());
    }

    #[rstest]
    fn environment_both_is_a_no_op_on_either_side() {
        let mut indoor = activity("in", "In", &[FearCategory::Social], DifficultyLevel::Easy);
        indoor.environment = Environment::Indoor;
        let mut outdoor = activity("out", "Out", &[FearCategory::Social], DifficultyLevel::Easy);
        outdoor.environment = Environment::Outdoor;
        let either = activity("both", "Both", &[FearCategory::Social], DifficultyLevel::Easy);
        let activities = vec![indoor, outdoor, either];

        let criteria =
            FilterCriteria::default().with(CriteriaChange::SetEnvironment(Environment::Indoor));
        assert_eq!(ids(&filter(&activities, &criteria, "")), ["in", "both"]);
    }

    #[rstest]
    fn locations_use_any_semantics(activities: Vec<Activity>) {
        let criteria = FilterCriteria::default().with(CriteriaChange::ReplaceLocations(
            BTreeSet::from([LocationId::new("lisbon")]),
        ));
        assert_eq!(ids(&filter(&activities, &criteria, "")), ["snorkel", "farm"]);
    }

    #[rstest]
    #[case("kayak", &["kayak"])]
    #[case("  KAYAK ", &["kayak"])]
    #[case("rapids", &["kayak"])]
    #[case("public speaking", &["toastmasters"])]
    #[case("confined", &["cave"])]
    #[case("berlin", &["toastmasters", "meetup"])]
    #[case("no such thing", &[])]
    fn search_matches_any_field(
        activities: Vec<Activity>,
        #[case] search: &str,
        #[case] expected: &[&str],
    ) {
        let kept = filter(&activities, &FilterCriteria::default(), search);
        assert_eq!(ids(&kept), expected);
    }

    #[rstest]
    fn blank_search_matches_everything(activities: Vec<Activity>) {
        assert!(activities.iter().all(|a| matches_search(a, "\t ")));
    }
}
