//! # Column Filter Component
//!
//! Multi-select popup attached to the Country column header. Opened and
//! closed with `f`. Every toggle emits the full updated selection, which the
//! event loop forwards to the core as `Action::FilterChanged`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ColumnFilterState` lives in `TuiState`
//! - `ColumnFilter` is created each frame with borrowed state
//!
//! Options are props: the loop calls `set_options` each frame with the
//! distinct normalized country names. Selected values whose option disappears
//! stay selected.

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Persistent state for the column filter popup.
#[derive(Debug, Default)]
pub struct ColumnFilterState {
    pub open: bool,
    pub options: Vec<String>,
    pub selected: HashSet<String>,
    pub cursor: usize,
    pub list_state: ListState,
}

/// Events emitted by the column filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    /// The selection changed; carries the full new set.
    Changed(HashSet<String>),
}

impl ColumnFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a closed popup and closes an open one.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
        if self.open {
            self.sync_cursor();
        }
    }

    /// Replaces the option list, keeping the cursor in range.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.sync_cursor();
    }

    /// Flips membership of `value` and returns the updated selection.
    pub fn toggle_option(&mut self, value: &str) -> HashSet<String> {
        if !self.selected.remove(value) {
            self.selected.insert(value.to_string());
        }
        self.selected.clone()
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    fn sync_cursor(&mut self) {
        if self.options.is_empty() {
            self.cursor = 0;
            self.list_state.select(None);
        } else {
            self.cursor = self.cursor.min(self.options.len() - 1);
            self.list_state.select(Some(self.cursor));
        }
    }
}

impl EventHandler for ColumnFilterState {
    type Event = FilterEvent;

    /// Only meaningful while open; a closed filter ignores everything.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<FilterEvent> {
        if !self.open {
            return None;
        }
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('f') => {
                self.open = false;
                None
            }
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                self.sync_cursor();
                None
            }
            TuiEvent::CursorDown => {
                self.cursor += 1;
                self.sync_cursor();
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => {
                let value = self.options.get(self.cursor)?.clone();
                Some(FilterEvent::Changed(self.toggle_option(&value)))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the filter popup.
pub struct ColumnFilter<'a> {
    state: &'a mut ColumnFilterState,
}

impl<'a> ColumnFilter<'a> {
    pub fn new(state: &'a mut ColumnFilterState) -> Self {
        Self { state }
    }

    /// Renders the popup into `area`, which the caller anchors under the
    /// Country header.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Filter country ")
            .title_bottom(Line::from(" Space Toggle  Esc Close ").centered());

        if self.state.options.is_empty() {
            let empty = Paragraph::new("No countries")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let checkbox = if self.state.is_selected(option) { "[x] " } else { "[ ] " };
                let style = if i == self.state.cursor {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(checkbox, style),
                    Span::styled(option.clone(), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn open_filter(options: &[&str]) -> ColumnFilterState {
        let mut state = ColumnFilterState::new();
        state.set_options(options.iter().map(|o| o.to_string()).collect());
        state.toggle_open();
        state
    }

    #[test]
    fn test_toggle_option_adds_then_removes() {
        let mut state = ColumnFilterState::new();
        let after_add = state.toggle_option("Iraq");
        assert!(after_add.contains("Iraq"));
        let after_remove = state.toggle_option("Iraq");
        assert!(after_remove.is_empty());
    }

    #[test]
    fn test_toggle_open_is_independent_of_selection() {
        let mut state = ColumnFilterState::new();
        state.toggle_option("Norway");
        state.toggle_open();
        assert!(state.open);
        state.toggle_open();
        assert!(!state.open);
        assert!(state.is_selected("Norway"));
    }

    #[test]
    fn test_closed_filter_ignores_events() {
        let mut state = ColumnFilterState::new();
        state.set_options(vec!["Iraq".to_string()]);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn test_space_emits_full_selection() {
        let mut state = open_filter(&["Iraq", "Norway"]);
        let first = state.handle_event(&TuiEvent::InputChar(' '));
        assert_eq!(first, Some(FilterEvent::Changed(["Iraq".to_string()].into())));

        state.handle_event(&TuiEvent::CursorDown);
        let second = state.handle_event(&TuiEvent::Submit);
        let expected: HashSet<String> = ["Iraq".to_string(), "Norway".to_string()].into();
        assert_eq!(second, Some(FilterEvent::Changed(expected)));
    }

    #[test]
    fn test_cursor_clamps_to_options() {
        let mut state = open_filter(&["Iraq", "Norway"]);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.cursor, 1);
        state.set_options(vec!["Iraq".to_string()]);
        assert_eq!(state.cursor, 0);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_escape_closes() {
        let mut state = open_filter(&["Iraq"]);
        assert_eq!(state.handle_event(&TuiEvent::Escape), None);
        assert!(!state.open);
    }

    #[test]
    fn test_toggle_with_no_options_is_none() {
        let mut state = open_filter(&[]);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_render_shows_checkboxes() {
        let mut state = open_filter(&["Iraq", "Norway"]);
        state.toggle_option("Norway");

        let backend = TestBackend::new(30, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ColumnFilter::new(&mut state).render(f, f.area()))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("[ ] Iraq"));
        assert!(content.contains("[x] Norway"));
    }
}
