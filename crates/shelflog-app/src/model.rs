// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::ids::ItemId;

pub const OTHER_CATEGORY: &str = "Other";

pub const BUILTIN_CATEGORIES: [&str; 6] = ["Movie", "TV Show", "Book", "Game", "Music", "Podcast"];

pub const MAX_RATING: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    InProgress,
    Completed,
}

impl ItemStatus {
    pub const ALL: [Self; 2] = [Self::InProgress, Self::Completed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub category: String,
    pub name: String,
    pub creator: String,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub comments: String,
    pub date_experienced: Option<Date>,
    pub created_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub status: Option<ItemStatus>,
    pub current_units: Option<u32>,
    pub total_units: Option<u32>,
}

impl Item {
    /// Rows written before progress tracking carry no status and read as completed.
    pub fn effective_status(&self) -> ItemStatus {
        self.status.unwrap_or(ItemStatus::Completed)
    }

    pub fn is_in_progress(&self) -> bool {
        self.effective_status() == ItemStatus::InProgress
    }

    pub fn progress_percent(&self) -> Option<u32> {
        if !self.is_in_progress() {
            return None;
        }
        Some(crate::completion_percent(
            self.current_units.unwrap_or(0),
            self.total_units.unwrap_or(0),
        ))
    }
}

/// Marker for a timestamp the store resolves against its own clock at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerTimestamp;

#[derive(Debug, Clone, PartialEq)]
pub enum ItemDetail {
    InProgress {
        current_units: u32,
        total_units: u32,
    },
    Completed {
        rating: Option<f64>,
        comments: String,
    },
}

/// Canonical create/update payload produced by the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub category: String,
    pub name: String,
    pub creator: String,
    pub tags: Vec<String>,
    pub date_experienced: Option<Date>,
    pub detail: ItemDetail,
    pub completed_at: Option<ServerTimestamp>,
}

impl ItemRecord {
    pub fn status(&self) -> ItemStatus {
        match self.detail {
            ItemDetail::InProgress { .. } => ItemStatus::InProgress,
            ItemDetail::Completed { .. } => ItemStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Category,
    Name,
    Creator,
    Tags,
    Rating,
    Comments,
    Progress,
    DateExperienced,
    CreatedAt,
    CompletedAt,
}

impl Column {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Name => "Name",
            Self::Creator => "Creator",
            Self::Tags => "Tags",
            Self::Rating => "Rating",
            Self::Comments => "Comments",
            Self::Progress => "Progress",
            Self::DateExperienced => "Date Experienced",
            Self::CreatedAt => "Date Added",
            Self::CompletedAt => "Completed",
        }
    }

    pub const fn kind(self) -> ColumnKind {
        match self {
            Self::Rating | Self::Progress => ColumnKind::Numeric,
            Self::DateExperienced | Self::CreatedAt | Self::CompletedAt => ColumnKind::Timestamp,
            Self::Category | Self::Name | Self::Creator | Self::Tags | Self::Comments => {
                ColumnKind::Text
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: Column,
    pub direction: SortDirection,
}

/// Storage-side ordering of the full item list before any client sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListOrder {
    CreatedDesc,
    NameAsc,
}

impl ListOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedDesc => "created_desc",
            Self::NameAsc => "name_asc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created_desc" => Some(Self::CreatedDesc),
            "name_asc" => Some(Self::NameAsc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// One table holding every filtered item.
    Flat,
    /// In-progress and completed items in separate tables.
    Split,
}

impl Layout {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Split => "split",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "flat" => Some(Self::Flat),
            "split" => Some(Self::Split),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingKey {
    CustomCategories,
}

impl SettingKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CustomCategories => "customCategories",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, ColumnKind, Item, ItemStatus, Layout, ListOrder, SortDirection};
    use crate::ItemId;

    fn bare_item() -> Item {
        Item {
            id: ItemId::new(1),
            category: "Book".to_owned(),
            name: "Dune".to_owned(),
            creator: String::new(),
            tags: Vec::new(),
            rating: None,
            comments: String::new(),
            date_experienced: None,
            created_at: None,
            completed_at: None,
            status: None,
            current_units: None,
            total_units: None,
        }
    }

    #[test]
    fn status_less_items_read_as_completed() {
        let item = bare_item();
        assert_eq!(item.effective_status(), ItemStatus::Completed);
        assert_eq!(item.progress_percent(), None);
    }

    #[test]
    fn in_progress_item_reports_percentage() {
        let item = Item {
            status: Some(ItemStatus::InProgress),
            current_units: Some(1),
            total_units: Some(3),
            ..bare_item()
        };
        assert_eq!(item.progress_percent(), Some(33));
    }

    #[test]
    fn status_and_order_strings_parse_back() {
        for status in ItemStatus::ALL {
            assert_eq!(ItemStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ListOrder::parse("name_asc"), Some(ListOrder::NameAsc));
        assert_eq!(Layout::parse("split"), Some(Layout::Split));
        assert_eq!(Layout::parse("grid"), None);
    }

    #[test]
    fn direction_toggle_is_an_involution() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Asc.toggled().toggled(), SortDirection::Asc);
    }

    #[test]
    fn column_kinds_follow_comparator_families() {
        assert_eq!(Column::CreatedAt.kind(), ColumnKind::Timestamp);
        assert_eq!(Column::DateExperienced.kind(), ColumnKind::Timestamp);
        assert_eq!(Column::Rating.kind(), ColumnKind::Numeric);
        assert_eq!(Column::Creator.kind(), ColumnKind::Text);
    }
}
