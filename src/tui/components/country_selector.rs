//! # Country Selector Component
//!
//! Dropdown inside the edit dialog. Closed, it shows the name of the country
//! whose id matches the form's `country_id` (or a placeholder). Open, it lists
//! every country; choosing one emits the full `Country` and closes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::api::Country;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

pub const PLACEHOLDER: &str = "Select country";

/// The country whose id equals `selected_id`, if any.
pub fn selected_country<'a>(countries: &'a [Country], selected_id: &str) -> Option<&'a Country> {
    countries.iter().find(|c| c.id == selected_id)
}

#[derive(Debug, Default)]
pub struct CountrySelectorState {
    pub open: bool,
    pub countries: Vec<Country>,
    pub cursor: usize,
    pub list_state: ListState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorEvent {
    Selected(Country),
}

impl CountrySelectorState {
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            countries,
            ..Default::default()
        }
    }

    /// Opens the list with the cursor on the currently selected country.
    pub fn open(&mut self, selected_id: &str) {
        self.open = true;
        self.cursor = self
            .countries
            .iter()
            .position(|c| c.id == selected_id)
            .unwrap_or(0);
        self.sync_list();
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    fn sync_list(&mut self) {
        if self.countries.is_empty() {
            self.cursor = 0;
            self.list_state.select(None);
        } else {
            self.cursor = self.cursor.min(self.countries.len() - 1);
            self.list_state.select(Some(self.cursor));
        }
    }
}

impl EventHandler for CountrySelectorState {
    type Event = SelectorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SelectorEvent> {
        if !self.open {
            return None;
        }
        match event {
            TuiEvent::Escape => {
                self.close();
                None
            }
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                self.sync_list();
                None
            }
            TuiEvent::CursorDown => {
                self.cursor += 1;
                self.sync_list();
                None
            }
            TuiEvent::Submit => {
                let country = self.countries.get(self.cursor)?.clone();
                self.close();
                Some(SelectorEvent::Selected(country))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct CountrySelector<'a> {
    state: &'a mut CountrySelectorState,
    selected_id: &'a str,
    focused: bool,
}

impl<'a> CountrySelector<'a> {
    pub fn new(state: &'a mut CountrySelectorState, selected_id: &'a str, focused: bool) -> Self {
        Self {
            state,
            selected_id,
            focused,
        }
    }

    /// Renders the closed box into `field`. The open list drops down into `menu`.
    pub fn render(&mut self, frame: &mut Frame, field: Rect, menu: Rect) {
        let border = if self.focused || self.state.open {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let arrow = if self.state.open { "▴" } else { "▾" };

        let label = match selected_country(&self.state.countries, self.selected_id) {
            Some(country) => Span::raw(country.name.clone()),
            None => Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        };
        let inner_width = field.width.saturating_sub(4) as usize;
        let pad = inner_width.saturating_sub(label.width());
        let line = Line::from(vec![label, Span::raw(" ".repeat(pad)), Span::raw(arrow)]);

        let field_widget = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Country "),
        );
        frame.render_widget(field_widget, field);

        if !self.state.open {
            return;
        }

        frame.render_widget(Clear, menu);
        let items: Vec<ListItem> = self
            .state
            .countries
            .iter()
            .enumerate()
            .map(|(i, country)| {
                let style = if i == self.state.cursor {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let check = if country.id == self.selected_id { " ✓" } else { "" };
                ListItem::new(Line::from(vec![
                    Span::styled(country.name.clone(), style),
                    Span::styled(check, style.fg(Color::Green)),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_stateful_widget(list, menu, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::country;

    fn countries() -> Vec<Country> {
        vec![country("1", "Bhutan"), country("2", "Norway"), country("3", "Iraq")]
    }

    #[test]
    fn test_selected_country_by_id() {
        let list = countries();
        assert_eq!(selected_country(&list, "2").unwrap().name, "Norway");
        assert!(selected_country(&list, "").is_none());
        assert!(selected_country(&list, "99").is_none());
    }

    #[test]
    fn test_open_puts_cursor_on_current() {
        let mut state = CountrySelectorState::new(countries());
        state.open("3");
        assert!(state.open);
        assert_eq!(state.cursor, 2);

        state.close();
        state.open("missing");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_select_emits_country_and_closes() {
        let mut state = CountrySelectorState::new(countries());
        state.open("");
        state.handle_event(&TuiEvent::CursorDown);
        let event = state.handle_event(&TuiEvent::Submit);
        assert_eq!(event, Some(SelectorEvent::Selected(country("2", "Norway"))));
        assert!(!state.open);
    }

    #[test]
    fn test_escape_closes_without_selection() {
        let mut state = CountrySelectorState::new(countries());
        state.open("1");
        assert_eq!(state.handle_event(&TuiEvent::Escape), None);
        assert!(!state.open);
    }

    #[test]
    fn test_closed_selector_ignores_events() {
        let mut state = CountrySelectorState::new(countries());
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_empty_country_list() {
        let mut state = CountrySelectorState::new(vec![]);
        state.open("");
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }
}
