// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::Duration;

use crate::forms::{
    FormField, FormMode, ItemForm, UpsertTarget, ValidationError, normalize,
    parse_completion_rating,
};
use crate::model::{Column, Item, ItemRecord, Layout, SortDirection, SortSpec};
use crate::view::{
    FilterCriteria, FilterOptions, RATING_THRESHOLDS, apply_sort, category_choices, filter_items,
    filter_options, next_sort, partition_items,
};
use crate::{
    ItemId, format_date, format_timestamp, progress_bar, progress_label, rating_label, tags_label,
};

pub const NOTICE_DISMISS_AFTER: Duration = Duration::from_secs(3);

pub const EMPTY_TABLE_MESSAGE: &str = "No items found. Add your first entry above!";
pub const EMPTY_PROGRESS_MESSAGE: &str = "Nothing in progress.";

const PROGRESS_BAR_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Selected(ItemId),
    Editing(ItemId),
}

impl Selection {
    pub const fn id(self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Selected(id) | Self::Editing(id) => Some(id),
        }
    }

    pub const fn form_mode(self) -> FormMode {
        match self {
            Self::Editing(_) => FormMode::Edit,
            Self::Idle | Self::Selected(_) => FormMode::Create,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    SaveCustomCategories(Vec<String>),
    CreateItem(ItemRecord),
    UpdateItem(ItemId, ItemRecord),
    CompleteItem {
        id: ItemId,
        rating: f64,
        comments: String,
    },
    DeleteItem(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Completed,
    Deleted,
}

impl WriteOutcome {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Created => "Entry added successfully!",
            Self::Updated => "Entry updated successfully!",
            Self::Completed => "Marked as completed!",
            Self::Deleted => "Entry deleted.",
        }
    }
}

/// Ops run in order and stop at the first failure. Earlier ops are not rolled back.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteBatch {
    pub ops: Vec<WriteOp>,
    pub outcome: WriteOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Reload,
    Write(WriteBatch),
    DismissNotice { token: u64, after: Duration },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    ConfirmDelete {
        id: ItemId,
        name: String,
    },
    ConfirmAutoComplete {
        name: String,
        accept: WriteBatch,
        decline: WriteBatch,
    },
    CompletionRating {
        id: ItemId,
        name: String,
        error: Option<ValidationError>,
    },
    CompletionComments {
        id: ItemId,
        name: String,
        rating: f64,
    },
}

impl Prompt {
    pub fn message(&self) -> String {
        match self {
            Self::ConfirmDelete { name, .. } => {
                format!("Are you sure you want to delete \"{name}\"?")
            }
            Self::ConfirmAutoComplete { name, .. } => {
                format!("\"{name}\" reached its total. Mark it as completed?")
            }
            Self::CompletionRating { name, .. } => format!("Rating for \"{name}\" (0-10):"),
            Self::CompletionComments { name, .. } => {
                format!("Comments for \"{name}\" (optional):")
            }
        }
    }

    pub const fn takes_text(&self) -> bool {
        matches!(
            self,
            Self::CompletionRating { .. } | Self::CompletionComments { .. }
        )
    }

    pub fn error(&self) -> Option<ValidationError> {
        match self {
            Self::CompletionRating { error, .. } => *error,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Dismisses itself after a delay.
    Success,
    /// Stays until acknowledged.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub token: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Loaded {
        items: Vec<Item>,
        custom_categories: Vec<String>,
    },
    FilterChanged(FilterCriteria),
    FiltersReset,
    ColumnClicked(Column),
    RowClicked(ItemId),
    EditClicked,
    DeleteClicked,
    MarkCompleteClicked,
    FormFieldEdited(FormField, String),
    FormSubmitted,
    ConfirmAnswered(bool),
    TextPromptSubmitted(String),
    PromptCancelled,
    WriteSucceeded(WriteOutcome),
    StorageFailed(String),
    NoticeDismissed { token: u64 },
    NoticeAcknowledged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub items: Vec<Item>,
    pub custom_categories: Vec<String>,
    pub criteria: FilterCriteria,
    pub sort: Option<SortSpec>,
    pub selection: Selection,
    pub form: ItemForm,
    pub form_error: Option<ValidationError>,
    pub layout: Layout,
    pub prompt: Option<Prompt>,
    pub notice: Option<Notice>,
    notice_seq: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Layout::Split)
    }
}

impl ViewState {
    pub fn new(layout: Layout) -> Self {
        Self {
            items: Vec::new(),
            custom_categories: Vec::new(),
            criteria: FilterCriteria::default(),
            sort: None,
            selection: Selection::Idle,
            form: ItemForm::default(),
            form_error: None,
            layout,
            prompt: None,
            notice: None,
            notice_seq: 0,
        }
    }

    pub fn update(mut self, event: ViewEvent) -> (Self, Vec<Effect>) {
        let effects = self.apply(event);
        (self, effects)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Gestures are ignored while a prompt or an error notice is open.
    pub fn is_blocked(&self) -> bool {
        self.prompt.is_some()
            || self
                .notice
                .as_ref()
                .is_some_and(|notice| notice.kind == NoticeKind::Error)
    }

    fn selected_item(&self) -> Option<&Item> {
        self.selection.id().and_then(|id| self.item(id))
    }

    fn apply(&mut self, event: ViewEvent) -> Vec<Effect> {
        match event {
            ViewEvent::Loaded {
                items,
                custom_categories,
            } => {
                self.items = items;
                self.custom_categories = custom_categories;
                if let Selection::Selected(id) = self.selection
                    && self.item(id).is_none()
                {
                    self.selection = Selection::Idle;
                }
                Vec::new()
            }
            ViewEvent::StorageFailed(message) => {
                self.notice = Some(self.next_notice(NoticeKind::Error, message));
                Vec::new()
            }
            ViewEvent::WriteSucceeded(outcome) => self.write_succeeded(outcome),
            ViewEvent::NoticeDismissed { token } => {
                if self
                    .notice
                    .as_ref()
                    .is_some_and(|notice| notice.token == token && notice.kind == NoticeKind::Success)
                {
                    self.notice = None;
                }
                Vec::new()
            }
            ViewEvent::NoticeAcknowledged => {
                self.notice = None;
                Vec::new()
            }
            ViewEvent::ConfirmAnswered(answer) => self.confirm_answered(answer),
            ViewEvent::TextPromptSubmitted(text) => self.text_submitted(&text),
            ViewEvent::PromptCancelled => {
                self.prompt = None;
                Vec::new()
            }
            _ if self.is_blocked() => Vec::new(),
            ViewEvent::FilterChanged(criteria) => {
                self.criteria = criteria;
                Vec::new()
            }
            ViewEvent::FiltersReset => {
                self.criteria = FilterCriteria::default();
                Vec::new()
            }
            ViewEvent::ColumnClicked(column) => {
                self.sort = Some(next_sort(self.sort, column));
                Vec::new()
            }
            ViewEvent::RowClicked(id) => {
                self.row_clicked(id);
                Vec::new()
            }
            ViewEvent::EditClicked => {
                if let Some(item) = self.selected_item() {
                    let form = ItemForm::from_item(item);
                    self.selection = Selection::Editing(item.id);
                    self.form = form;
                    self.form_error = None;
                }
                Vec::new()
            }
            ViewEvent::DeleteClicked => {
                if let Some(item) = self.selected_item() {
                    self.prompt = Some(Prompt::ConfirmDelete {
                        id: item.id,
                        name: item.name.clone(),
                    });
                }
                Vec::new()
            }
            ViewEvent::MarkCompleteClicked => {
                if let Some(item) = self.selected_item()
                    && item.is_in_progress()
                {
                    self.prompt = Some(Prompt::CompletionRating {
                        id: item.id,
                        name: item.name.clone(),
                        error: None,
                    });
                }
                Vec::new()
            }
            ViewEvent::FormFieldEdited(field, value) => {
                self.form.set(field, value);
                self.form_error = None;
                Vec::new()
            }
            ViewEvent::FormSubmitted => self.form_submitted(),
        }
    }

    fn row_clicked(&mut self, id: ItemId) {
        if self.item(id).is_none() {
            return;
        }
        self.selection = match self.selection {
            Selection::Idle => Selection::Selected(id),
            Selection::Selected(current) if current == id => Selection::Idle,
            Selection::Selected(_) => Selection::Selected(id),
            Selection::Editing(current) => {
                self.reset_form();
                if current == id {
                    Selection::Idle
                } else {
                    Selection::Selected(id)
                }
            }
        };
    }

    fn form_submitted(&mut self) -> Vec<Effect> {
        let (target, editing) = match self.selection {
            Selection::Editing(id) => (
                UpsertTarget::Update {
                    previous: self.item(id).and_then(|item| item.status),
                },
                Some(id),
            ),
            Selection::Idle | Selection::Selected(_) => (UpsertTarget::Create, None),
        };
        let normalized = match normalize(&self.form, &self.custom_categories, target) {
            Ok(normalized) => normalized,
            Err(err) => {
                self.form_error = Some(err);
                return Vec::new();
            }
        };
        self.form_error = None;

        let batch = |record: ItemRecord| {
            let mut ops = Vec::new();
            if let Some(categories) = normalized.custom_categories.clone() {
                ops.push(WriteOp::SaveCustomCategories(categories));
            }
            let (op, outcome) = match editing {
                Some(id) => (WriteOp::UpdateItem(id, record), WriteOutcome::Updated),
                None => (WriteOp::CreateItem(record), WriteOutcome::Created),
            };
            ops.push(op);
            WriteBatch { ops, outcome }
        };

        match normalized.auto_complete.clone() {
            Some(completed) => {
                self.prompt = Some(Prompt::ConfirmAutoComplete {
                    name: normalized.record.name.clone(),
                    accept: batch(completed),
                    decline: batch(normalized.record.clone()),
                });
                Vec::new()
            }
            None => vec![Effect::Write(batch(normalized.record.clone()))],
        }
    }

    fn confirm_answered(&mut self, answer: bool) -> Vec<Effect> {
        match self.prompt.take() {
            Some(Prompt::ConfirmDelete { id, .. }) => {
                if answer {
                    vec![Effect::Write(WriteBatch {
                        ops: vec![WriteOp::DeleteItem(id)],
                        outcome: WriteOutcome::Deleted,
                    })]
                } else {
                    Vec::new()
                }
            }
            Some(Prompt::ConfirmAutoComplete {
                accept, decline, ..
            }) => vec![Effect::Write(if answer { accept } else { decline })],
            other => {
                self.prompt = other;
                Vec::new()
            }
        }
    }

    fn text_submitted(&mut self, text: &str) -> Vec<Effect> {
        match self.prompt.take() {
            Some(Prompt::CompletionRating { id, name, .. }) => {
                self.prompt = Some(match parse_completion_rating(text) {
                    Ok(rating) => Prompt::CompletionComments { id, name, rating },
                    Err(err) => Prompt::CompletionRating {
                        id,
                        name,
                        error: Some(err),
                    },
                });
                Vec::new()
            }
            Some(Prompt::CompletionComments { id, rating, .. }) => {
                vec![Effect::Write(WriteBatch {
                    ops: vec![WriteOp::CompleteItem {
                        id,
                        rating,
                        comments: text.trim().to_owned(),
                    }],
                    outcome: WriteOutcome::Completed,
                })]
            }
            other => {
                self.prompt = other;
                Vec::new()
            }
        }
    }

    fn write_succeeded(&mut self, outcome: WriteOutcome) -> Vec<Effect> {
        match outcome {
            WriteOutcome::Created => self.reset_form(),
            WriteOutcome::Updated => {
                self.selection = Selection::Idle;
                self.reset_form();
            }
            WriteOutcome::Deleted | WriteOutcome::Completed => {
                if matches!(self.selection, Selection::Editing(_)) {
                    self.reset_form();
                }
                self.selection = Selection::Idle;
            }
        }
        let notice = self.next_notice(NoticeKind::Success, outcome.message().to_owned());
        let token = notice.token;
        self.notice = Some(notice);
        vec![
            Effect::Reload,
            Effect::DismissNotice {
                token,
                after: NOTICE_DISMISS_AFTER,
            },
        ]
    }

    fn reset_form(&mut self) {
        self.form = ItemForm::default();
        self.form_error = None;
    }

    fn next_notice(&mut self, kind: NoticeKind, message: String) -> Notice {
        self.notice_seq += 1;
        Notice {
            kind,
            message,
            token: self.notice_seq,
        }
    }

    pub fn view(&self) -> ViewModel {
        let tables = match self.layout {
            Layout::Flat => vec![self.table(
                TableKind::All,
                apply_sort(filter_items(&self.items, &self.criteria), self.sort),
            )],
            Layout::Split => {
                let split = partition_items(&self.items, &self.criteria);
                vec![
                    self.table(
                        TableKind::InProgress,
                        apply_sort(split.in_progress, self.sort),
                    ),
                    self.table(TableKind::Completed, apply_sort(split.completed, self.sort)),
                ]
            }
        };
        ViewModel {
            tables,
            form: self.form_view(),
            filters: FilterView {
                criteria: self.criteria.clone(),
                options: filter_options(&self.items),
                rating_thresholds: RATING_THRESHOLDS.to_vec(),
            },
            selection: self.selection,
            prompt: self.prompt.clone(),
            notice: self.notice.clone(),
        }
    }

    fn table(&self, kind: TableKind, items: Vec<Item>) -> TableView {
        let selected = self.selection.id();
        let columns = kind
            .columns()
            .iter()
            .map(|column| {
                let sort = self
                    .sort
                    .filter(|spec| spec.column == *column)
                    .map(|spec| spec.direction);
                ColumnView {
                    column: *column,
                    label: header_label(*column, sort),
                    sort,
                }
            })
            .collect::<Vec<_>>();
        let rows = items
            .iter()
            .map(|item| RowView {
                id: item.id,
                cells: kind
                    .columns()
                    .iter()
                    .map(|column| cell_text(item, *column))
                    .collect(),
                selected: selected == Some(item.id),
                progress: item.progress_percent(),
            })
            .collect();
        TableView {
            kind,
            title: kind.title(),
            columns,
            rows,
            empty_message: kind.empty_message(),
        }
    }

    fn form_view(&self) -> FormView {
        let mode = self.selection.form_mode();
        let required = self.form.required_fields();
        let fields = self
            .form
            .visible_fields()
            .into_iter()
            .map(|field| FieldView {
                field,
                label: field.label(),
                value: match field {
                    FormField::Status => self.form.status.label().to_owned(),
                    _ => self.form.value(field).to_owned(),
                },
                required: required.contains(&field),
            })
            .collect();
        FormView {
            mode,
            title: mode.title(),
            submit_label: mode.submit_label(),
            fields,
            category_choices: category_choices(&self.custom_categories),
            error: self.form_error.map(|err| err.to_string()),
        }
    }
}

fn header_label(column: Column, sort: Option<SortDirection>) -> String {
    match sort {
        Some(SortDirection::Asc) => format!("{} ↑", column.label()),
        Some(SortDirection::Desc) => format!("{} ↓", column.label()),
        None => column.label().to_owned(),
    }
}

fn cell_text(item: &Item, column: Column) -> String {
    match column {
        Column::Category => item.category.clone(),
        Column::Name => item.name.clone(),
        Column::Creator => item.creator.clone(),
        Column::Tags => tags_label(&item.tags),
        Column::Rating => rating_label(item.rating),
        Column::Comments => item.comments.clone(),
        Column::Progress => match item.progress_percent() {
            Some(percent) => format!(
                "{} {}",
                progress_bar(percent, PROGRESS_BAR_WIDTH),
                progress_label(
                    item.current_units.unwrap_or(0),
                    item.total_units.unwrap_or(0)
                )
            ),
            None => String::new(),
        },
        Column::DateExperienced => format_date(item.date_experienced),
        Column::CreatedAt => format_timestamp(item.created_at),
        Column::CompletedAt => format_timestamp(item.completed_at),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    All,
    InProgress,
    Completed,
}

impl TableKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::All => "Entries",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub const fn columns(self) -> &'static [Column] {
        match self {
            Self::All => &[
                Column::Category,
                Column::Name,
                Column::Creator,
                Column::Tags,
                Column::Rating,
                Column::Comments,
                Column::DateExperienced,
                Column::CreatedAt,
            ],
            Self::InProgress => &[
                Column::Category,
                Column::Name,
                Column::Creator,
                Column::Tags,
                Column::Progress,
                Column::DateExperienced,
                Column::CreatedAt,
            ],
            Self::Completed => &[
                Column::Category,
                Column::Name,
                Column::Creator,
                Column::Tags,
                Column::Rating,
                Column::Comments,
                Column::DateExperienced,
                Column::CompletedAt,
            ],
        }
    }

    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::InProgress => EMPTY_PROGRESS_MESSAGE,
            Self::All | Self::Completed => EMPTY_TABLE_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub tables: Vec<TableView>,
    pub form: FormView,
    pub filters: FilterView,
    pub selection: Selection,
    pub prompt: Option<Prompt>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub kind: TableKind,
    pub title: &'static str,
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
    pub empty_message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub column: Column,
    pub label: String,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: ItemId,
    pub cells: Vec<String>,
    pub selected: bool,
    pub progress: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: FormField,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub mode: FormMode,
    pub title: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FieldView>,
    pub category_choices: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterView {
    pub criteria: FilterCriteria,
    pub options: FilterOptions,
    pub rating_thresholds: Vec<u8>,
}
