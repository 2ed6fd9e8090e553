// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use shelflog_app::{
    Column, CredentialCheck, Effect, FilterCriteria, FormField, Item, ItemId, ItemStatus,
    NoticeKind, Prompt, Selection, SessionGate, TableView, ViewEvent, ViewModel, ViewState, WriteOp,
};
use std::collections::VecDeque;
use std::io;
use std::mem;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Storage seam for the terminal UI. Every call runs synchronously on the UI
/// thread; a failure becomes a blocking error notice.
pub trait AppRuntime {
    fn load_items(&mut self) -> Result<Vec<Item>>;
    fn load_custom_categories(&mut self) -> Result<Vec<String>>;
    fn apply_write(&mut self, op: &WriteOp) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    DismissNotice { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Table(usize),
    Form,
}

impl Default for Focus {
    fn default() -> Self {
        Self::Table(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct LoginUiState {
    input: String,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    focus: Focus,
    cursors: Vec<usize>,
    field_index: usize,
    prompt_input: String,
    help_visible: bool,
    login: LoginUiState,
}

impl ViewData {
    fn cursor(&self, table: usize) -> usize {
        self.cursors.get(table).copied().unwrap_or(0)
    }

    fn cursor_mut(&mut self, table: usize) -> &mut usize {
        if self.cursors.len() <= table {
            self.cursors.resize(table + 1, 0);
        }
        &mut self.cursors[table]
    }
}

pub fn run_app<R: AppRuntime, C: CredentialCheck>(
    state: &mut ViewState,
    runtime: &mut R,
    gate: &mut SessionGate<C>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if gate.is_authenticated() {
        reload(state, runtime, &internal_tx);
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, runtime, &internal_tx, &internal_rx);

        let locked = !gate.is_authenticated();
        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data, locked)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, gate, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::DismissNotice { token } => {
                dispatch(state, runtime, tx, ViewEvent::NoticeDismissed { token });
            }
        }
    }
}

/// Feeds an event through the reducer and keeps executing effects until no
/// follow-up events remain.
fn dispatch<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    tx: &Sender<InternalEvent>,
    event: ViewEvent,
) {
    let mut pending = VecDeque::from([event]);
    while let Some(event) = pending.pop_front() {
        let (next, effects) = mem::take(state).update(event);
        *state = next;
        pending.extend(
            effects
                .into_iter()
                .filter_map(|effect| execute_effect(runtime, tx, effect)),
        );
    }
}

fn reload<R: AppRuntime>(state: &mut ViewState, runtime: &mut R, tx: &Sender<InternalEvent>) {
    if let Some(event) = execute_effect(runtime, tx, Effect::Reload) {
        dispatch(state, runtime, tx, event);
    }
}

fn execute_effect<R: AppRuntime>(
    runtime: &mut R,
    tx: &Sender<InternalEvent>,
    effect: Effect,
) -> Option<ViewEvent> {
    match effect {
        Effect::Reload => {
            let loaded = runtime.load_items().and_then(|items| {
                runtime
                    .load_custom_categories()
                    .map(|custom_categories| (items, custom_categories))
            });
            Some(match loaded {
                Ok((items, custom_categories)) => {
                    debug!(items = items.len(), "reloaded entries");
                    ViewEvent::Loaded {
                        items,
                        custom_categories,
                    }
                }
                Err(error) => {
                    warn!(error = %format!("{error:#}"), "reload failed");
                    ViewEvent::StorageFailed(format!("load failed: {error:#}"))
                }
            })
        }
        Effect::Write(batch) => {
            for op in &batch.ops {
                if let Err(error) = runtime.apply_write(op) {
                    warn!(error = %format!("{error:#}"), ?op, "write failed");
                    return Some(ViewEvent::StorageFailed(format!("save failed: {error:#}")));
                }
            }
            info!(outcome = ?batch.outcome, ops = batch.ops.len(), "write applied");
            Some(ViewEvent::WriteSucceeded(batch.outcome))
        }
        Effect::DismissNotice { token, after } => {
            schedule_notice_dismiss(tx, token, after);
            None
        }
    }
}

fn schedule_notice_dismiss(internal_tx: &Sender<InternalEvent>, token: u64, after: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(after);
        let _ = sender.send(InternalEvent::DismissNotice { token });
    });
}

fn handle_key_event<R: AppRuntime, C: CredentialCheck>(
    state: &mut ViewState,
    runtime: &mut R,
    gate: &mut SessionGate<C>,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if !gate.is_authenticated() {
        return handle_login_key(state, runtime, gate, view_data, internal_tx, key);
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if state.prompt.is_some() {
        handle_prompt_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if state
        .notice
        .as_ref()
        .is_some_and(|notice| notice.kind == NoticeKind::Error)
    {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            dispatch(state, runtime, internal_tx, ViewEvent::NoticeAcknowledged);
        }
        return false;
    }

    match view_data.focus {
        Focus::Form => {
            handle_form_key(state, runtime, view_data, internal_tx, key);
            false
        }
        Focus::Table(table) => handle_table_key(state, runtime, view_data, internal_tx, table, key),
    }
}

fn handle_login_key<R: AppRuntime, C: CredentialCheck>(
    state: &mut ViewState,
    runtime: &mut R,
    gate: &mut SessionGate<C>,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Enter => {
            let secret = mem::take(&mut view_data.login.input);
            match gate.authenticate(&secret) {
                Ok(token) => {
                    info!(session = token.get(), "session opened");
                    view_data.login.error = None;
                    reload(state, runtime, internal_tx);
                }
                Err(error) => {
                    warn!(%error, "authentication failed");
                    view_data.login.error = Some(error.to_string());
                }
            }
        }
        KeyCode::Backspace => {
            view_data.login.input.pop();
        }
        KeyCode::Char(ch) => view_data.login.input.push(ch),
        _ => {}
    }
    false
}

fn handle_prompt_key<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let takes_text = state.prompt.as_ref().is_some_and(Prompt::takes_text);
    let event = match key.code {
        KeyCode::Esc => {
            view_data.prompt_input.clear();
            Some(ViewEvent::PromptCancelled)
        }
        KeyCode::Enter if takes_text => Some(ViewEvent::TextPromptSubmitted(mem::take(
            &mut view_data.prompt_input,
        ))),
        KeyCode::Backspace if takes_text => {
            view_data.prompt_input.pop();
            None
        }
        KeyCode::Char(ch) if takes_text => {
            view_data.prompt_input.push(ch);
            None
        }
        KeyCode::Char('y' | 'Y') => Some(ViewEvent::ConfirmAnswered(true)),
        KeyCode::Char('n' | 'N') => Some(ViewEvent::ConfirmAnswered(false)),
        _ => None,
    };
    if let Some(event) = event {
        dispatch(state, runtime, internal_tx, event);
    }
}

fn handle_table_key<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    table: usize,
    key: KeyEvent,
) -> bool {
    let view = state.view();
    let table_count = view.tables.len();
    let table = table.min(table_count.saturating_sub(1));
    let row_count = view.tables.get(table).map_or(0, |table| table.rows.len());

    let event = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => {
            view_data.help_visible = true;
            None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let cursor = view_data.cursor_mut(table);
            if *cursor + 1 < row_count {
                *cursor += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let cursor = view_data.cursor_mut(table);
            *cursor = cursor.saturating_sub(1);
            None
        }
        KeyCode::Char('g') => {
            *view_data.cursor_mut(table) = 0;
            None
        }
        KeyCode::Char('G') => {
            *view_data.cursor_mut(table) = row_count.saturating_sub(1);
            None
        }
        KeyCode::Tab => {
            view_data.focus = if table + 1 < table_count {
                Focus::Table(table + 1)
            } else {
                Focus::Form
            };
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            row_under_cursor(&view, view_data, table).map(ViewEvent::RowClicked)
        }
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            view.tables
                .get(table)
                .and_then(|table| table.columns.get(index))
                .map(|column| ViewEvent::ColumnClicked(column.column))
        }
        KeyCode::Char('a' | 'i') => {
            view_data.focus = Focus::Form;
            view_data.field_index = 0;
            None
        }
        KeyCode::Char('e') => Some(ViewEvent::EditClicked),
        KeyCode::Char('d') => Some(ViewEvent::DeleteClicked),
        KeyCode::Char('c') => Some(ViewEvent::MarkCompleteClicked),
        KeyCode::Char('f') => Some(ViewEvent::FilterChanged(FilterCriteria {
            category: cycle_option(
                view.filters.criteria.category.as_deref(),
                &view.filters.options.categories,
            ),
            ..view.filters.criteria.clone()
        })),
        KeyCode::Char('t') => Some(ViewEvent::FilterChanged(FilterCriteria {
            tag: cycle_option(
                view.filters.criteria.tag.as_deref(),
                &view.filters.options.tags,
            ),
            ..view.filters.criteria.clone()
        })),
        KeyCode::Char('r') => Some(ViewEvent::FilterChanged(FilterCriteria {
            min_rating: cycle_rating(
                view.filters.criteria.min_rating,
                &view.filters.rating_thresholds,
            ),
            ..view.filters.criteria.clone()
        })),
        KeyCode::Char('x') => Some(ViewEvent::FiltersReset),
        _ => None,
    };

    if let Some(event) = event {
        let was_editing = matches!(event, ViewEvent::EditClicked);
        dispatch(state, runtime, internal_tx, event);
        if was_editing && matches!(state.selection, Selection::Editing(_)) {
            view_data.focus = Focus::Form;
            view_data.field_index = 0;
        }
        clamp_cursors(view_data, &state.view());
    }
    false
}

fn handle_form_key<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let fields = state.form.visible_fields();
    let index = view_data.field_index.min(fields.len().saturating_sub(1));
    let Some(field) = fields.get(index).copied() else {
        return;
    };

    let edit = |value: String| Some(ViewEvent::FormFieldEdited(field, value));
    let event = match key.code {
        KeyCode::Esc => {
            view_data.focus = Focus::Table(0);
            None
        }
        KeyCode::Tab | KeyCode::Down => {
            view_data.field_index = (index + 1) % fields.len();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            view_data.field_index = (index + fields.len() - 1) % fields.len();
            None
        }
        KeyCode::Enter => Some(ViewEvent::FormSubmitted),
        KeyCode::Left | KeyCode::Right if field.is_choice() => {
            let forward = key.code == KeyCode::Right;
            edit(next_choice(state, field, forward))
        }
        KeyCode::Backspace if !field.is_choice() => {
            let mut value = state.form.value(field).to_owned();
            value.pop();
            edit(value)
        }
        KeyCode::Char(ch) if !field.is_choice() => {
            let mut value = state.form.value(field).to_owned();
            value.push(ch);
            edit(value)
        }
        _ => None,
    };

    if let Some(event) = event {
        dispatch(state, runtime, internal_tx, event);
        // Status and category changes reshape the field list.
        let visible = state.form.visible_fields();
        view_data.field_index = visible
            .iter()
            .position(|candidate| *candidate == field)
            .unwrap_or(0);
        clamp_cursors(view_data, &state.view());
    }
}

fn next_choice(state: &ViewState, field: FormField, forward: bool) -> String {
    let choices = match field {
        FormField::Status => ItemStatus::ALL
            .iter()
            .map(|status| status.as_str().to_owned())
            .collect::<Vec<_>>(),
        _ => state.view().form.category_choices,
    };
    if choices.is_empty() {
        return state.form.value(field).to_owned();
    }
    let current = state.form.value(field);
    let position = choices.iter().position(|choice| choice == current);
    let next = match (position, forward) {
        (None, _) => 0,
        (Some(index), true) => (index + 1) % choices.len(),
        (Some(index), false) => (index + choices.len() - 1) % choices.len(),
    };
    choices[next].clone()
}

fn cycle_option(current: Option<&str>, options: &[String]) -> Option<String> {
    match current.and_then(|value| options.iter().position(|option| option == value)) {
        None => options.first().cloned(),
        Some(index) => options.get(index + 1).cloned(),
    }
}

fn cycle_rating(current: Option<f64>, thresholds: &[u8]) -> Option<f64> {
    let next = match current {
        None => thresholds.first(),
        Some(value) => thresholds
            .iter()
            .find(|threshold| f64::from(**threshold) > value),
    };
    next.map(|threshold| f64::from(*threshold))
}

fn row_under_cursor(
    view: &ViewModel,
    view_data: &ViewData,
    table: usize,
) -> Option<ItemId> {
    view.tables
        .get(table)
        .and_then(|table_view| table_view.rows.get(view_data.cursor(table)))
        .map(|row| row.id)
}

fn clamp_cursors(view_data: &mut ViewData, view: &ViewModel) {
    for (index, table) in view.tables.iter().enumerate() {
        let cursor = view_data.cursor_mut(index);
        *cursor = (*cursor).min(table.rows.len().saturating_sub(1));
    }
    if let Focus::Table(table) = view_data.focus
        && table >= view.tables.len()
    {
        view_data.focus = Focus::Table(0);
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &ViewState, view_data: &ViewData, locked: bool) {
    if locked {
        render_login(frame, view_data);
        return;
    }

    let view = state.view();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let filters = Paragraph::new(filter_bar_text(&view))
        .block(Block::default().title("shelflog").borders(Borders::ALL));
    frame.render_widget(filters, layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(layout[1]);

    let table_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Ratio(1, view.tables.len().max(1) as u32);
            view.tables.len().max(1)
        ])
        .split(body[0]);
    for (index, table) in view.tables.iter().enumerate() {
        let focused = view_data.focus == Focus::Table(index);
        render_table(
            frame,
            table_areas[index],
            table,
            focused.then(|| view_data.cursor(index)),
        );
    }

    let form = Paragraph::new(form_lines(&view, view_data))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(view.form.title)
                .borders(Borders::ALL)
                .border_style(focus_border(view_data.focus == Focus::Form)),
        );
    frame.render_widget(form, body[1]);

    let (status, style) = match &view.notice {
        Some(notice) if notice.kind == NoticeKind::Error => (
            format!("{} | enter dismiss", notice.message),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Some(notice) => (notice.message.clone(), Style::default().fg(Color::Green)),
        None => (status_text(view_data), Style::default().fg(Color::Yellow)),
    };
    let status_widget = Paragraph::new(status)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if let Some(prompt) = &view.prompt {
        let area = centered_rect(60, 30, frame.area());
        frame.render_widget(Clear, area);
        let widget = Paragraph::new(prompt_overlay_text(prompt, &view_data.prompt_input))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("confirm")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(widget, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_login(frame: &mut ratatui::Frame<'_>, view_data: &ViewData) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);
    let widget = Paragraph::new(login_text(&view_data.login)).block(
        Block::default()
            .title("shelflog: sign in")
            .borders(Borders::ALL),
    );
    frame.render_widget(widget, area);
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    table: &TableView,
    cursor: Option<usize>,
) {
    let block = Block::default()
        .title(format!("{} ({})", table.title, table.rows.len()))
        .borders(Borders::ALL)
        .border_style(focus_border(cursor.is_some()));

    if table.rows.is_empty() {
        let empty = Paragraph::new(table.empty_message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let widths = table
        .columns
        .iter()
        .map(|column| column_width(column.column))
        .collect::<Vec<_>>();

    let header_cells = table.columns.iter().enumerate().map(|(index, column)| {
        Cell::from(header_label(index, &column.label)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells);

    let rows = table.rows.iter().enumerate().map(|(row_index, row)| {
        let mut style = Style::default();
        if row.selected {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if cursor == Some(row_index) {
            style = style.bg(Color::DarkGray);
        }
        let cells = row
            .cells
            .iter()
            .zip(&table.columns)
            .map(|(text, column)| {
                let cell = Cell::from(text.clone());
                match (column.column, row.progress) {
                    (Column::Progress, Some(100)) => cell.style(Style::default().fg(Color::Green)),
                    _ => cell,
                }
            })
            .collect::<Vec<_>>();
        Row::new(cells).style(style)
    });

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(widget, area);
}

fn column_width(column: Column) -> Constraint {
    match column {
        Column::Name | Column::Comments => Constraint::Min(12),
        Column::Progress => Constraint::Length(24),
        Column::Rating => Constraint::Length(9),
        Column::CreatedAt | Column::CompletedAt => Constraint::Length(17),
        Column::DateExperienced => Constraint::Length(11),
        Column::Category | Column::Creator | Column::Tags => Constraint::Min(8),
    }
}

/// Prefixes the digit that sorts by this column.
fn header_label(index: usize, label: &str) -> String {
    format!("{} {label}", index + 1)
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn filter_bar_text(view: &ViewModel) -> String {
    let criteria = &view.filters.criteria;
    let category = criteria.category.as_deref().unwrap_or("all");
    let tag = criteria.tag.as_deref().unwrap_or("all");
    let rating = criteria
        .min_rating
        .map_or_else(|| "any".to_owned(), |value| format!("{value}+"));
    format!("f category: {category} | t tag: {tag} | r min rating: {rating} | x reset")
}

fn form_lines(view: &ViewModel, view_data: &ViewData) -> Vec<Line<'static>> {
    let focused = view_data.focus == Focus::Form;
    let current = view_data
        .field_index
        .min(view.form.fields.len().saturating_sub(1));
    let mut lines = view
        .form
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let active = focused && index == current;
            let marker = if active { "> " } else { "  " };
            let required = if field.required { "*" } else { "" };
            let value = if field.field.is_choice() {
                format!("< {} >", field.value)
            } else if active {
                format!("{}_", field.value)
            } else {
                field.value.clone()
            };
            let style = if active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{}{required}: ", field.label), style),
                Span::raw(value),
            ])
        })
        .collect::<Vec<_>>();

    lines.push(Line::raw(String::new()));
    if let Some(error) = &view.form.error {
        lines.push(Line::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ));
    }
    lines.push(Line::styled(
        format!("[enter] {}", view.form.submit_label),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines
}

fn prompt_overlay_text(prompt: &Prompt, input: &str) -> String {
    let mut text = prompt.message();
    if prompt.takes_text() {
        text.push_str(&format!("\n\n> {input}_"));
        if let Some(error) = prompt.error() {
            text.push_str(&format!("\n{error}"));
        }
        text.push_str("\n\nenter submit | esc cancel");
    } else {
        text.push_str("\n\ny yes | n no | esc cancel");
    }
    text
}

fn login_text(login: &LoginUiState) -> String {
    let masked = "*".repeat(login.input.chars().count());
    let mut text = format!("password: {masked}_");
    if let Some(error) = &login.error {
        text.push_str(&format!("\n\n{error}"));
    }
    text.push_str("\n\nenter sign in | esc quit");
    text
}

fn status_text(view_data: &ViewData) -> String {
    match view_data.focus {
        Focus::Form => {
            "FORM | tab/shift+tab field | left/right choose | enter submit | esc table | ctrl+q"
                .to_owned()
        }
        Focus::Table(_) => {
            "NAV | j/k move | enter select | 1-9 sort | e edit | d del | c complete | a add | tab next | ? help | q"
                .to_owned()
        }
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: j/k or up/down move | g/G first/last | tab next table/form\n\
nav: enter or space select/deselect | 1-9 sort by column (again to flip)\n\
filter: f category | t tag | r min rating | x reset\n\
edit: a add | e edit selected | d delete selected | c mark selected complete\n\
form: tab/shift+tab field | left/right category/status | enter submit | esc table\n\
prompt: y/n confirm | type + enter answer | esc cancel\n\
error: enter acknowledge"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
