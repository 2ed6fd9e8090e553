// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{
    BUILTIN_CATEGORIES, Item, ItemDetail, ItemRecord, ItemStatus, MAX_RATING, OTHER_CATEGORY,
    ServerTimestamp,
};
use crate::view::insert_custom_category;
use crate::{format_rating, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingCategory,
    MissingCustomCategory,
    MissingName,
    MissingRating,
    InvalidRating,
    RatingOutOfRange,
    MissingTotalUnits,
    InvalidUnits,
    InvalidDate,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCategory => f.write_str("category is required -- choose a category"),
            Self::MissingCustomCategory => {
                f.write_str("custom category is required -- enter a category name for Other")
            }
            Self::MissingName => f.write_str("name is required -- enter a name and retry"),
            Self::MissingRating => f.write_str("rating is required for completed items"),
            Self::InvalidRating => f.write_str("rating must be a number"),
            Self::RatingOutOfRange => f.write_str("rating must be between 0 and 10"),
            Self::MissingTotalUnits => {
                f.write_str("total units is required for items in progress")
            }
            Self::InvalidUnits => f.write_str("units must be whole non-negative numbers"),
            Self::InvalidDate => f.write_str("date must look like YYYY-MM-DD"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Category,
    CustomCategory,
    Name,
    Creator,
    Tags,
    Status,
    CurrentUnits,
    TotalUnits,
    Rating,
    Comments,
    DateExperienced,
}

impl FormField {
    pub const ALL: [Self; 11] = [
        Self::Category,
        Self::CustomCategory,
        Self::Name,
        Self::Creator,
        Self::Tags,
        Self::Status,
        Self::CurrentUnits,
        Self::TotalUnits,
        Self::Rating,
        Self::Comments,
        Self::DateExperienced,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::CustomCategory => "Custom Category",
            Self::Name => "Name",
            Self::Creator => "Creator",
            Self::Tags => "Tags",
            Self::Status => "Status",
            Self::CurrentUnits => "Current Units",
            Self::TotalUnits => "Total Units",
            Self::Rating => "Rating",
            Self::Comments => "Comments",
            Self::DateExperienced => "Date Experienced",
        }
    }

    /// Fields whose value is picked from a fixed list rather than typed.
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Category | Self::Status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Create => "Add New Entry",
            Self::Edit => "Edit Entry",
        }
    }

    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Add Entry",
            Self::Edit => "Update Entry",
        }
    }
}

/// Raw form contents as typed; nothing here is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemForm {
    pub category: String,
    pub custom_category: String,
    pub name: String,
    pub creator: String,
    pub tags: String,
    pub status: ItemStatus,
    pub current_units: String,
    pub total_units: String,
    pub rating: String,
    pub comments: String,
    pub date_experienced: String,
}

impl Default for ItemForm {
    fn default() -> Self {
        Self {
            category: BUILTIN_CATEGORIES[0].to_owned(),
            custom_category: String::new(),
            name: String::new(),
            creator: String::new(),
            tags: String::new(),
            status: ItemStatus::Completed,
            current_units: String::new(),
            total_units: String::new(),
            rating: String::new(),
            comments: String::new(),
            date_experienced: String::new(),
        }
    }
}

impl ItemForm {
    pub fn from_item(item: &Item) -> Self {
        Self {
            category: item.category.clone(),
            custom_category: String::new(),
            name: item.name.clone(),
            creator: item.creator.clone(),
            tags: crate::tags_label(&item.tags),
            status: item.effective_status(),
            current_units: item
                .current_units
                .map_or_else(String::new, |units| units.to_string()),
            total_units: item
                .total_units
                .map_or_else(String::new, |units| units.to_string()),
            rating: item.rating.map_or_else(String::new, format_rating),
            comments: item.comments.clone(),
            date_experienced: crate::format_date(item.date_experienced),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Category => &self.category,
            FormField::CustomCategory => &self.custom_category,
            FormField::Name => &self.name,
            FormField::Creator => &self.creator,
            FormField::Tags => &self.tags,
            FormField::Status => self.status.as_str(),
            FormField::CurrentUnits => &self.current_units,
            FormField::TotalUnits => &self.total_units,
            FormField::Rating => &self.rating,
            FormField::Comments => &self.comments,
            FormField::DateExperienced => &self.date_experienced,
        }
    }

    /// Unknown status strings leave the status untouched.
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Category => self.category = value,
            FormField::CustomCategory => self.custom_category = value,
            FormField::Name => self.name = value,
            FormField::Creator => self.creator = value,
            FormField::Tags => self.tags = value,
            FormField::Status => {
                if let Some(status) = ItemStatus::parse(&value) {
                    self.status = status;
                }
            }
            FormField::CurrentUnits => self.current_units = value,
            FormField::TotalUnits => self.total_units = value,
            FormField::Rating => self.rating = value,
            FormField::Comments => self.comments = value,
            FormField::DateExperienced => self.date_experienced = value,
        }
    }

    pub fn required_fields(&self) -> Vec<FormField> {
        required_fields(self.status, &self.category)
    }

    pub fn visible_fields(&self) -> Vec<FormField> {
        visible_fields(self.status, &self.category)
    }
}

/// Field set shown for a status/category pair. Required fields are always a subset.
pub fn visible_fields(status: ItemStatus, category: &str) -> Vec<FormField> {
    FormField::ALL
        .into_iter()
        .filter(|field| match field {
            FormField::CustomCategory => category == OTHER_CATEGORY,
            FormField::CurrentUnits | FormField::TotalUnits => status == ItemStatus::InProgress,
            FormField::Rating | FormField::Comments => status == ItemStatus::Completed,
            _ => true,
        })
        .collect()
}

pub fn required_fields(status: ItemStatus, category: &str) -> Vec<FormField> {
    visible_fields(status, category)
        .into_iter()
        .filter(|field| {
            matches!(
                field,
                FormField::Category
                    | FormField::CustomCategory
                    | FormField::Name
                    | FormField::Rating
                    | FormField::TotalUnits
            )
        })
        .collect()
}

/// Comma-separated tags, trimmed, blanks dropped, order kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn parse_completion_rating(input: &str) -> ValidationResult<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingRating);
    }
    let rating = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidRating)?;
    if !rating.is_finite() {
        return Err(ValidationError::InvalidRating);
    }
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange);
    }
    Ok(rating)
}

fn parse_optional_rating(input: &str) -> ValidationResult<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_completion_rating(input).map(Some)
}

fn parse_units(input: &str) -> ValidationResult<Option<u32>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidUnits)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertTarget {
    Create,
    Update { previous: Option<ItemStatus> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub record: ItemRecord,
    /// Updated custom category list when the form introduced a new one.
    pub custom_categories: Option<Vec<String>>,
    /// Completed variant of `record`, offered when progress reached the total.
    pub auto_complete: Option<ItemRecord>,
}

pub fn normalize(
    form: &ItemForm,
    custom_categories: &[String],
    target: UpsertTarget,
) -> ValidationResult<NormalizedItem> {
    let (category, new_category) = resolve_category(form)?;
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let date_experienced = if form.date_experienced.trim().is_empty() {
        None
    } else {
        Some(parse_date(&form.date_experienced).ok_or(ValidationError::InvalidDate)?)
    };

    let detail = match form.status {
        ItemStatus::InProgress => {
            let total_units =
                parse_units(&form.total_units)?.ok_or(ValidationError::MissingTotalUnits)?;
            ItemDetail::InProgress {
                current_units: parse_units(&form.current_units)?.unwrap_or(0),
                total_units,
            }
        }
        ItemStatus::Completed => ItemDetail::Completed {
            rating: Some(parse_completion_rating(&form.rating)?),
            comments: form.comments.trim().to_owned(),
        },
    };

    let record = ItemRecord {
        category,
        name: name.to_owned(),
        creator: form.creator.trim().to_owned(),
        tags: parse_tags(&form.tags),
        date_experienced,
        completed_at: completion_stamp(form.status, target),
        detail,
    };

    let auto_complete = if needs_completion_prompt(&record) {
        // Rating is hidden while in progress; leftover text there is ignored.
        let rating = parse_optional_rating(&form.rating).unwrap_or(None);
        Some(complete_record(
            record.clone(),
            rating,
            form.comments.trim().to_owned(),
        ))
    } else {
        None
    };

    let custom_categories = new_category.and_then(|value| {
        let mut updated = custom_categories.to_vec();
        insert_custom_category(&mut updated, &value).then_some(updated)
    });

    Ok(NormalizedItem {
        record,
        custom_categories,
        auto_complete,
    })
}

fn resolve_category(form: &ItemForm) -> ValidationResult<(String, Option<String>)> {
    let category = form.category.trim();
    if category.is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    if category != OTHER_CATEGORY {
        return Ok((category.to_owned(), None));
    }
    let custom = form.custom_category.trim();
    if custom.is_empty() {
        return Err(ValidationError::MissingCustomCategory);
    }
    let is_fixed = custom == OTHER_CATEGORY || BUILTIN_CATEGORIES.contains(&custom);
    Ok((custom.to_owned(), (!is_fixed).then(|| custom.to_owned())))
}

/// Completion is stamped on create-as-completed and on an explicit in-progress to completed edit.
fn completion_stamp(status: ItemStatus, target: UpsertTarget) -> Option<ServerTimestamp> {
    match (status, target) {
        (ItemStatus::Completed, UpsertTarget::Create)
        | (
            ItemStatus::Completed,
            UpsertTarget::Update {
                previous: Some(ItemStatus::InProgress),
            },
        ) => Some(ServerTimestamp),
        _ => None,
    }
}

pub fn needs_completion_prompt(record: &ItemRecord) -> bool {
    match record.detail {
        ItemDetail::InProgress {
            current_units,
            total_units,
        } => total_units > 0 && current_units >= total_units,
        ItemDetail::Completed { .. } => false,
    }
}

pub fn complete_record(record: ItemRecord, rating: Option<f64>, comments: String) -> ItemRecord {
    ItemRecord {
        detail: ItemDetail::Completed { rating, comments },
        completed_at: Some(ServerTimestamp),
        ..record
    }
}
