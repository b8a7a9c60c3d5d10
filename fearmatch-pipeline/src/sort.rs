//! Stable ordering of activity lists.

use std::cmp::Reverse;

use fearmatch_core::{Ordinal, Ranked, SortOrder, sanitise};

/// Return a copy of `items` arranged in `order`.
///
/// Every order is stable, so sorting an already sorted list is a no-op.
/// [`SortOrder::Recommended`] ranks by descending match score with unscored
/// items treated as `0.0`; [`SortOrder::Alphabetical`] compares titles
/// case-insensitively and falls back to the raw title.
#[must_use]
pub fn sort<T>(items: &[T], order: SortOrder) -> Vec<T>
where
    T: Ranked + Clone,
{
    let mut sorted = items.to_vec();
    match order {
        SortOrder::Recommended => {
            sorted.sort_by(|a, b| recommended_score(b).total_cmp(&recommended_score(a)));
        }
        SortOrder::Alphabetical => sorted.sort_by_cached_key(|item| {
            let title = &item.as_ref().title;
            (title.to_lowercase(), title.clone())
        }),
        SortOrder::DifficultyAsc => sorted.sort_by_key(|item| item.as_ref().difficulty.rank()),
        SortOrder::DifficultyDesc => {
            sorted.sort_by_key(|item| Reverse(item.as_ref().difficulty.rank()));
        }
    }
    sorted
}

fn recommended_score<T: Ranked>(item: &T) -> f32 {
    sanitise(item.match_score().unwrap_or(0.0))
}
