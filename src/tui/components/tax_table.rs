//! # Tax Table Component
//!
//! The main view: one row per visible record, five columns.
//!
//! ```text
//! Entity        Gender   Request date   Country ▾[1]
//! Marco Huel    Male     Jun 16, 2025   Iraq           ✎
//! ```
//!
//! Rows come from `App::visible_records()`; this component only adds an
//! optional presentation sort and the row highlight.

use std::cmp::Ordering;

use chrono::{DateTime, Local, NaiveDate};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::api::Record;
use crate::core::normalize::normalize_country;
use crate::tui::components::truncate_str;

pub const EMPTY_CELL: &str = "-";
pub const EDIT_ICON: &str = "✎";

/// Column widths; the filter popup anchors itself under the Country column.
pub const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Fill(2),
    Constraint::Length(8),
    Constraint::Length(14),
    Constraint::Fill(1),
    Constraint::Length(3),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Entity,
    RequestDate,
    Country,
}

impl SortColumn {
    fn label(self) -> &'static str {
        match self {
            SortColumn::Entity => "Entity",
            SortColumn::RequestDate => "Request date",
            SortColumn::Country => "Country",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub column: Option<SortColumn>,
    pub descending: bool,
}

impl SortOrder {
    /// none → Entity → Request date → Country → none
    pub fn cycle_column(&mut self) {
        self.column = match self.column {
            None => Some(SortColumn::Entity),
            Some(SortColumn::Entity) => Some(SortColumn::RequestDate),
            Some(SortColumn::RequestDate) => Some(SortColumn::Country),
            Some(SortColumn::Country) => None,
        };
    }

    pub fn flip(&mut self) {
        self.descending = !self.descending;
    }

    pub fn label(&self) -> Option<String> {
        let column = self.column?;
        let arrow = if self.descending { "↓" } else { "↑" };
        Some(format!("{} {}", column.label(), arrow))
    }

    /// Stable sort of the rows; with no column set the input order is kept.
    pub fn apply<'a>(&self, mut rows: Vec<&'a Record>) -> Vec<&'a Record> {
        let Some(column) = self.column else {
            return rows;
        };
        rows.sort_by(|a, b| {
            let ordering = compare(column, a, b);
            if self.descending { ordering.reverse() } else { ordering }
        });
        rows
    }
}

fn compare(column: SortColumn, a: &Record, b: &Record) -> Ordering {
    match column {
        SortColumn::Entity => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortColumn::RequestDate => a
            .request_date
            .as_deref()
            .unwrap_or_default()
            .cmp(b.request_date.as_deref().unwrap_or_default()),
        SortColumn::Country => normalize_country(&a.country).cmp(&normalize_country(&b.country)),
    }
}

/// Gender badge: label plus style. `male` gets one style, any other
/// non-empty value the other; blank renders nothing.
pub fn gender_badge(gender: Option<&str>) -> Option<(String, Style)> {
    let g = gender.map(str::trim).filter(|g| !g.is_empty())?.to_lowercase();
    let style = if g == "male" {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Black).bg(Color::Magenta)
    };
    let mut chars = g.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    Some((label, style))
}

/// Formats a request date as `Jun 16, 2025` in local time.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates. Blank → `-`;
/// anything else is shown as-is.
pub fn format_request_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|d| !d.is_empty()) else {
        return EMPTY_CELL.to_string();
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format("%b %-d, %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    raw.to_string()
}

fn text_or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        EMPTY_CELL.to_string()
    } else {
        value.to_string()
    }
}

/// Persistent table state: highlight and sort.
#[derive(Debug, Default)]
pub struct TaxTableState {
    pub table_state: TableState,
    pub sort: SortOrder,
}

impl TaxTableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn select_next(&mut self, row_count: usize) {
        if row_count == 0 {
            self.table_state.select(None);
            return;
        }
        let next = self.selected().map_or(0, |i| (i + 1).min(row_count - 1));
        self.table_state.select(Some(next));
    }

    pub fn select_previous(&mut self, row_count: usize) {
        if row_count == 0 {
            self.table_state.select(None);
            return;
        }
        let prev = self.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    /// Keeps the highlight inside `row_count` after the row set changed.
    pub fn clamp(&mut self, row_count: usize) {
        match (self.selected(), row_count) {
            (_, 0) => self.table_state.select(None),
            (None, _) => self.table_state.select(Some(0)),
            (Some(i), n) if i >= n => self.table_state.select(Some(n - 1)),
            _ => {}
        }
    }

    /// Id of the highlighted record, the target of the row edit action.
    pub fn selected_id(&self, rows: &[&Record]) -> Option<String> {
        rows.get(self.selected()?).map(|r| r.id.clone())
    }
}

/// Transient render wrapper.
pub struct TaxTable<'a> {
    state: &'a mut TaxTableState,
    rows: &'a [&'a Record],
    /// Number of checked filter values, shown in the Country header.
    filter_count: usize,
    filter_open: bool,
    is_loading: bool,
    spinner_frame: usize,
}

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

impl<'a> TaxTable<'a> {
    pub fn new(state: &'a mut TaxTableState, rows: &'a [&'a Record]) -> Self {
        Self {
            state,
            rows,
            filter_count: 0,
            filter_open: false,
            is_loading: false,
            spinner_frame: 0,
        }
    }

    pub fn filter(mut self, count: usize, open: bool) -> Self {
        self.filter_count = count;
        self.filter_open = open;
        self
    }

    pub fn loading(mut self, is_loading: bool, spinner_frame: usize) -> Self {
        self.is_loading = is_loading;
        self.spinner_frame = spinner_frame;
        self
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        if let Some(sort) = self.state.sort.label() {
            block = block.title(Line::from(format!(" Sort: {sort} ")).right_aligned());
        }

        if self.is_loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            let loading = Paragraph::new(format!("{spinner} Loading…"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray))
                .block(block);
            frame.render_widget(loading, area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Entity"),
            Cell::from("Gender"),
            Cell::from("Request date"),
            Cell::from(self.country_header()),
            Cell::from(""),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

        let name_width = area.width.saturating_sub(2) as usize / 3;
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|record| {
                let gender = match gender_badge(record.gender.as_deref()) {
                    Some((label, style)) => Cell::from(Span::styled(format!(" {label} "), style)),
                    None => Cell::from(""),
                };
                Row::new(vec![
                    Cell::from(truncate_str(&text_or_dash(&record.name), name_width)),
                    gender,
                    Cell::from(format_request_date(record.request_date.as_deref())),
                    Cell::from(text_or_dash(&record.country)),
                    Cell::from(EDIT_ICON),
                ])
            })
            .collect();

        if rows.is_empty() {
            let empty = Paragraph::new("No records")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_stateful_widget(table, area, &mut self.state.table_state);
    }

    fn country_header(&self) -> Line<'static> {
        let marker = if self.filter_open { "▴" } else { "▾" };
        let marker_style = if self.filter_count > 0 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::raw("Country "), Span::styled(marker, marker_style)];
        if self.filter_count > 0 {
            spans.push(Span::styled(format!("[{}]", self.filter_count), marker_style));
        }
        Line::from(spans)
    }
}
