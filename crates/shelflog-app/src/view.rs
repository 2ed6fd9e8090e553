// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use std::collections::BTreeSet;

use time::{OffsetDateTime, Time};

use crate::model::{
    BUILTIN_CATEGORIES, Column, ColumnKind, Item, ItemStatus, OTHER_CATEGORY, SortDirection,
    SortSpec,
};

pub const RATING_THRESHOLDS: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Conjunctive filter; `None` and blank values impose no constraint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub min_rating: Option<f64>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        active_text(&self.category).is_none()
            && active_text(&self.tag).is_none()
            && self.min_rating.is_none()
    }

    pub fn without_rating(&self) -> Self {
        Self {
            min_rating: None,
            ..self.clone()
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(category) = active_text(&self.category)
            && item.category != category
        {
            return false;
        }
        if let Some(tag) = active_text(&self.tag)
            && !item.tags.iter().any(|candidate| candidate == tag)
        {
            return false;
        }
        if let Some(min_rating) = self.min_rating
            && item.rating.unwrap_or(0.0) < min_rating
        {
            return false;
        }
        true
    }
}

fn active_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    pub in_progress: Vec<Item>,
    pub completed: Vec<Item>,
}

/// Distinct values offered by the filter selectors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

pub fn filter_items(all: &[Item], criteria: &FilterCriteria) -> Vec<Item> {
    all.iter()
        .filter(|item| criteria.matches(item))
        .cloned()
        .collect()
}

/// Stable sort; descending reverses the comparator so ties keep input order.
pub fn sort_items(mut items: Vec<Item>, column: Column, direction: SortDirection) -> Vec<Item> {
    items.sort_by(|left, right| {
        let ordering = compare_by_column(left, right, column);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    items
}

pub fn apply_sort(items: Vec<Item>, sort: Option<SortSpec>) -> Vec<Item> {
    match sort {
        Some(spec) => sort_items(items, spec.column, spec.direction),
        None => items,
    }
}

/// The in-progress side ignores the rating filter since nothing is rated yet.
pub fn partition_items(all: &[Item], criteria: &FilterCriteria) -> Partition {
    let progress_criteria = criteria.without_rating();
    let mut partition = Partition::default();
    for item in all {
        match item.effective_status() {
            ItemStatus::InProgress if progress_criteria.matches(item) => {
                partition.in_progress.push(item.clone());
            }
            ItemStatus::Completed if criteria.matches(item) => {
                partition.completed.push(item.clone());
            }
            ItemStatus::InProgress | ItemStatus::Completed => {}
        }
    }
    partition
}

/// Clicking the active column flips its direction; any other column starts ascending.
pub fn next_sort(current: Option<SortSpec>, column: Column) -> SortSpec {
    match current {
        Some(spec) if spec.column == column => SortSpec {
            column,
            direction: spec.direction.toggled(),
        },
        _ => SortSpec {
            column,
            direction: SortDirection::Asc,
        },
    }
}

pub fn filter_options(all: &[Item]) -> FilterOptions {
    let categories = all
        .iter()
        .map(|item| item.category.clone())
        .filter(|category| !category.is_empty())
        .collect::<BTreeSet<_>>();
    let tags = all
        .iter()
        .flat_map(|item| item.tags.iter().cloned())
        .collect::<BTreeSet<_>>();
    FilterOptions {
        categories: categories.into_iter().collect(),
        tags: tags.into_iter().collect(),
    }
}

/// Built-ins, then custom categories, then the `Other` sentinel.
pub fn category_choices(custom: &[String]) -> Vec<String> {
    let mut choices = BUILTIN_CATEGORIES
        .iter()
        .map(|category| (*category).to_owned())
        .collect::<Vec<_>>();
    for category in custom {
        if !choices.contains(category) && category != OTHER_CATEGORY {
            choices.push(category.clone());
        }
    }
    choices.push(OTHER_CATEGORY.to_owned());
    choices
}

/// Inserts `value` at its sorted position; returns false when already present.
pub fn insert_custom_category(categories: &mut Vec<String>, value: &str) -> bool {
    match categories.binary_search_by(|existing| existing.as_str().cmp(value)) {
        Ok(_) => false,
        Err(index) => {
            categories.insert(index, value.to_owned());
            true
        }
    }
}

fn compare_by_column(left: &Item, right: &Item, column: Column) -> Ordering {
    match column.kind() {
        ColumnKind::Timestamp => timestamp_key(left, column).cmp(&timestamp_key(right, column)),
        ColumnKind::Numeric => numeric_key(left, column).total_cmp(&numeric_key(right, column)),
        ColumnKind::Text => text_key(left, column).cmp(&text_key(right, column)),
    }
}

fn timestamp_key(item: &Item, column: Column) -> i128 {
    let instant = match column {
        Column::CreatedAt => item.created_at,
        Column::CompletedAt => item.completed_at,
        Column::DateExperienced => item
            .date_experienced
            .map(|date| date.with_time(Time::MIDNIGHT).assume_utc()),
        _ => None,
    };
    instant.map_or(0, OffsetDateTime::unix_timestamp_nanos)
}

fn numeric_key(item: &Item, column: Column) -> f64 {
    match column {
        Column::Rating => item.rating.unwrap_or(0.0),
        Column::Progress => item.progress_percent().map_or(0.0, f64::from),
        _ => 0.0,
    }
}

fn text_key(item: &Item, column: Column) -> String {
    let raw = match column {
        Column::Category => item.category.clone(),
        Column::Name => item.name.clone(),
        Column::Creator => item.creator.clone(),
        Column::Tags => crate::tags_label(&item.tags),
        Column::Comments => item.comments.clone(),
        _ => String::new(),
    };
    raw.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{
        FilterCriteria, apply_sort, category_choices, filter_items, filter_options,
        insert_custom_category, next_sort, partition_items, sort_items,
    };
    use crate::{Column, Item, ItemId, ItemStatus, SortDirection, SortSpec};
    use proptest::prelude::*;
    use time::{Date, Month, OffsetDateTime};

    fn item(id: i64, name: &str, category: &str, rating: Option<f64>) -> Item {
        Item {
            id: ItemId::new(id),
            category: category.to_owned(),
            name: name.to_owned(),
            creator: String::new(),
            tags: Vec::new(),
            rating,
            comments: String::new(),
            date_experienced: None,
            created_at: None,
            completed_at: None,
            status: None,
            current_units: None,
            total_units: None,
        }
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            item(1, "A", "Books", Some(7.0)),
            item(2, "B", "Film", Some(9.0)),
        ]
    }

    #[test]
    fn min_rating_filter_keeps_higher_rated_items() {
        let criteria = FilterCriteria {
            min_rating: Some(8.0),
            ..FilterCriteria::default()
        };
        assert_eq!(names(&filter_items(&sample(), &criteria)), vec!["B"]);
    }

    #[test]
    fn rating_desc_orders_highest_first() {
        let sorted = sort_items(sample(), Column::Rating, SortDirection::Desc);
        assert_eq!(names(&sorted), vec!["B", "A"]);
    }

    #[test]
    fn empty_criteria_pass_everything() {
        let criteria = FilterCriteria {
            category: Some(String::new()),
            tag: None,
            min_rating: None,
        };
        assert!(criteria.is_empty());
        assert_eq!(filter_items(&sample(), &criteria), sample());
    }

    #[test]
    fn category_and_tag_filters_are_exact() {
        let mut tagged = item(3, "C", "Books", Some(5.0));
        tagged.tags = vec!["sci-fi".to_owned(), "classic".to_owned()];
        let all = vec![tagged, item(4, "D", "books", Some(6.0))];

        let by_category = FilterCriteria {
            category: Some("Books".to_owned()),
            ..FilterCriteria::default()
        };
        assert_eq!(names(&filter_items(&all, &by_category)), vec!["C"]);

        let by_tag = FilterCriteria {
            tag: Some("sci".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(filter_items(&all, &by_tag).is_empty());

        let by_full_tag = FilterCriteria {
            tag: Some("classic".to_owned()),
            ..FilterCriteria::default()
        };
        assert_eq!(names(&filter_items(&all, &by_full_tag)), vec!["C"]);
    }

    #[test]
    fn unrated_items_count_as_zero_for_rating_filter() {
        let all = vec![item(1, "unrated", "Game", None)];
        let criteria = FilterCriteria {
            min_rating: Some(1.0),
            ..FilterCriteria::default()
        };
        assert!(filter_items(&all, &criteria).is_empty());
    }

    #[test]
    fn text_sort_ignores_case_and_missing_values_sort_first() {
        let mut lower = item(1, "alpha", "Book", None);
        lower.creator = "zed".to_owned();
        let mut upper = item(2, "Beta", "Book", None);
        upper.creator = "Adams".to_owned();
        let blank = item(3, "gamma", "Book", None);

        let by_name = sort_items(
            vec![upper.clone(), blank.clone(), lower.clone()],
            Column::Name,
            SortDirection::Asc,
        );
        assert_eq!(names(&by_name), vec!["alpha", "Beta", "gamma"]);

        let by_creator = sort_items(vec![lower, upper, blank], Column::Creator, SortDirection::Asc);
        assert_eq!(names(&by_creator), vec!["gamma", "Beta", "alpha"]);
    }

    #[test]
    fn timestamp_sort_treats_missing_as_epoch() {
        let mut dated = item(1, "dated", "Movie", None);
        dated.date_experienced = Some(Date::from_calendar_date(2025, Month::May, 1).expect("date"));
        let mut created = item(2, "created", "Movie", None);
        created.created_at = Some(OffsetDateTime::from_unix_timestamp(1_000).expect("stamp"));
        let missing = item(3, "missing", "Movie", None);

        let by_date = sort_items(
            vec![dated.clone(), missing.clone(), created.clone()],
            Column::DateExperienced,
            SortDirection::Asc,
        );
        assert_eq!(names(&by_date), vec!["missing", "created", "dated"]);

        let by_created = sort_items(vec![created, dated, missing], Column::CreatedAt, SortDirection::Desc);
        assert_eq!(names(&by_created), vec!["created", "dated", "missing"]);
    }

    #[test]
    fn descending_sort_keeps_ties_in_input_order() {
        let all = vec![
            item(1, "first", "Book", Some(5.0)),
            item(2, "second", "Book", Some(5.0)),
            item(3, "top", "Book", Some(8.0)),
        ];
        let sorted = sort_items(all, Column::Rating, SortDirection::Desc);
        assert_eq!(names(&sorted), vec!["top", "first", "second"]);
    }

    #[test]
    fn next_sort_toggles_active_column_and_resets_new_column() {
        let first = next_sort(None, Column::Name);
        assert_eq!(first.direction, SortDirection::Asc);
        let second = next_sort(Some(first), Column::Name);
        assert_eq!(second.direction, SortDirection::Desc);
        let other = next_sort(Some(second), Column::Rating);
        assert_eq!(
            other,
            SortSpec {
                column: Column::Rating,
                direction: SortDirection::Asc
            }
        );
    }

    #[test]
    fn partition_skips_rating_filter_for_in_progress_items() {
        let mut reading = item(1, "reading", "Book", None);
        reading.status = Some(ItemStatus::InProgress);
        reading.current_units = Some(3);
        reading.total_units = Some(10);
        let low = item(2, "low", "Book", Some(2.0));
        let high = item(3, "high", "Book", Some(9.0));

        let criteria = FilterCriteria {
            min_rating: Some(5.0),
            ..FilterCriteria::default()
        };
        let split = partition_items(&[reading, low, high], &criteria);
        assert_eq!(names(&split.in_progress), vec!["reading"]);
        assert_eq!(names(&split.completed), vec!["high"]);
    }

    #[test]
    fn filter_options_are_sorted_and_distinct() {
        let mut first = item(1, "A", "Game", None);
        first.tags = vec!["rpg".to_owned(), "co-op".to_owned()];
        let mut second = item(2, "B", "Book", None);
        second.tags = vec!["rpg".to_owned()];
        let options = filter_options(&[first, second]);
        assert_eq!(options.categories, vec!["Book", "Game"]);
        assert_eq!(options.tags, vec!["co-op", "rpg"]);
    }

    #[test]
    fn category_choices_place_custom_before_other() {
        let choices = category_choices(&["Anime".to_owned(), "Board Game".to_owned()]);
        let tail = &choices[choices.len() - 3..];
        assert_eq!(tail, ["Anime", "Board Game", "Other"]);
        assert_eq!(choices[0], "Movie");
    }

    #[test]
    fn custom_category_insert_is_sorted_and_deduplicated() {
        let mut categories = vec!["Anime".to_owned(), "Comics".to_owned()];
        assert!(insert_custom_category(&mut categories, "Board Game"));
        assert!(!insert_custom_category(&mut categories, "Comics"));
        assert_eq!(categories, vec!["Anime", "Board Game", "Comics"]);
    }

    #[test]
    fn apply_sort_without_spec_keeps_storage_order() {
        let all = sample();
        assert_eq!(apply_sort(all.clone(), None), all);
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (
            1_i64..500,
            prop::sample::select(vec!["Book", "Game", "Movie"]),
            "[a-zA-Z]{0,6}",
            prop::option::of(0_u8..=10),
            prop::collection::vec(prop::sample::select(vec!["rpg", "indie", "classic"]), 0..3),
            prop::option::of(prop::bool::ANY),
        )
            .prop_map(|(id, category, name, rating, tags, in_progress)| Item {
                id: ItemId::new(id),
                category: category.to_owned(),
                name,
                creator: String::new(),
                tags: tags.into_iter().map(str::to_owned).collect(),
                rating: rating.map(f64::from),
                comments: String::new(),
                date_experienced: None,
                created_at: None,
                completed_at: None,
                status: in_progress.map(|flag| {
                    if flag {
                        ItemStatus::InProgress
                    } else {
                        ItemStatus::Completed
                    }
                }),
                current_units: Some(1),
                total_units: Some(4),
            })
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            prop::option::of(prop::sample::select(vec!["Book", "Game", ""])),
            prop::option::of(prop::sample::select(vec!["rpg", "indie"])),
            prop::option::of(0_u8..=10),
        )
            .prop_map(|(category, tag, min_rating)| FilterCriteria {
                category: category.map(str::to_owned),
                tag: tag.map(str::to_owned),
                min_rating: min_rating.map(f64::from),
            })
    }

    fn arb_column() -> impl Strategy<Value = Column> {
        prop::sample::select(vec![
            Column::Category,
            Column::Name,
            Column::Tags,
            Column::Rating,
            Column::Progress,
            Column::CreatedAt,
        ])
    }

    proptest! {
        #[test]
        fn filter_returns_matching_subset(
            all in prop::collection::vec(arb_item(), 0..20),
            criteria in arb_criteria(),
        ) {
            let filtered = filter_items(&all, &criteria);
            for kept in &filtered {
                prop_assert!(all.contains(kept));
                prop_assert!(criteria.matches(kept));
            }
            let expected = all.iter().filter(|item| criteria.matches(item)).count();
            prop_assert_eq!(filtered.len(), expected);
        }

        #[test]
        fn empty_filter_is_identity(all in prop::collection::vec(arb_item(), 0..20)) {
            prop_assert_eq!(filter_items(&all, &FilterCriteria::default()), all);
        }

        #[test]
        fn sort_is_idempotent(
            all in prop::collection::vec(arb_item(), 0..20),
            column in arb_column(),
            descending in prop::bool::ANY,
        ) {
            let direction = if descending { SortDirection::Desc } else { SortDirection::Asc };
            let once = sort_items(all, column, direction);
            let twice = sort_items(once.clone(), column, direction);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn toggling_twice_restores_order(
            all in prop::collection::vec(arb_item(), 0..20),
            column in arb_column(),
        ) {
            let first = next_sort(None, column);
            let flipped = next_sort(Some(first), column);
            let restored = next_sort(Some(flipped), column);
            prop_assert_eq!(restored, first);
            let ascending = sort_items(all.clone(), first.column, first.direction);
            let again = sort_items(
                sort_items(all, flipped.column, flipped.direction),
                restored.column,
                restored.direction,
            );
            prop_assert_eq!(ascending.len(), again.len());
            for (left, right) in ascending.iter().zip(again.iter()) {
                prop_assert_eq!(
                    super::compare_by_column(left, right, column),
                    std::cmp::Ordering::Equal
                );
            }
        }

        #[test]
        fn partition_is_disjoint_and_covering(
            all in prop::collection::vec(arb_item(), 0..20),
            criteria in arb_criteria(),
        ) {
            let split = partition_items(&all, &criteria);
            let relaxed = criteria.without_rating();
            let expected_progress = all
                .iter()
                .filter(|item| item.is_in_progress() && relaxed.matches(item))
                .count();
            let expected_completed = all
                .iter()
                .filter(|item| !item.is_in_progress() && criteria.matches(item))
                .count();
            prop_assert_eq!(split.in_progress.len(), expected_progress);
            prop_assert_eq!(split.completed.len(), expected_completed);
            prop_assert!(split.in_progress.iter().all(Item::is_in_progress));
            prop_assert!(split.completed.iter().all(|item| !item.is_in_progress()));
        }
    }
}
