//! # Edit Dialog Component
//!
//! Modal overlay for editing one record's name and country.
//!
//! ```text
//! ┌ Edit Customer ─────────────────┐
//! │┌ Name * ──────────────────────┐│
//! ││Marco Huel                    ││
//! │└──────────────────────────────┘│
//! │┌ Country ─────────────────────┐│
//! ││Norway                       ▾││
//! │└──────────────────────────────┘│
//! │            [ Cancel ] [ Save ] │
//! └────────────────────────────────┘
//! ```
//!
//! The dialog keeps its own copy of the name and selected country id for
//! editing and reports every change upward; the core's `EditForm` stays the
//! source of truth for what gets saved.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::api::Country;
use crate::core::store::EditForm;
use crate::tui::component::EventHandler;
use crate::tui::components::centered_rect;
use crate::tui::components::country_selector::{
    CountrySelector, CountrySelectorState, SelectorEvent,
};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogField {
    Name,
    Country,
    Save,
    Cancel,
}

impl DialogField {
    fn next(self) -> Self {
        match self {
            DialogField::Name => DialogField::Country,
            DialogField::Country => DialogField::Save,
            DialogField::Save => DialogField::Cancel,
            DialogField::Cancel => DialogField::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            DialogField::Name => DialogField::Cancel,
            DialogField::Country => DialogField::Name,
            DialogField::Save => DialogField::Country,
            DialogField::Cancel => DialogField::Save,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    NameChanged(String),
    CountrySelected(Country),
    Save,
    Cancel,
}

#[derive(Debug)]
pub struct EditDialogState {
    pub focus: DialogField,
    pub name: String,
    pub country_id: String,
    pub selector: CountrySelectorState,
}

impl EditDialogState {
    pub fn new(form: &EditForm, countries: Vec<Country>) -> Self {
        Self {
            focus: DialogField::Name,
            name: form.name.clone(),
            country_id: form.country_id.clone(),
            selector: CountrySelectorState::new(countries),
        }
    }
}

impl EventHandler for EditDialogState {
    type Event = EditEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<EditEvent> {
        if self.selector.open {
            return match self.selector.handle_event(event)? {
                SelectorEvent::Selected(country) => {
                    self.country_id = country.id.clone();
                    Some(EditEvent::CountrySelected(country))
                }
            };
        }

        match event {
            TuiEvent::Escape => return Some(EditEvent::Cancel),
            TuiEvent::NextField => {
                self.focus = self.focus.next();
                return None;
            }
            TuiEvent::PrevField => {
                self.focus = self.focus.prev();
                return None;
            }
            _ => {}
        }

        match (self.focus, event) {
            (DialogField::Name, TuiEvent::InputChar(c)) => {
                self.name.push(*c);
                Some(EditEvent::NameChanged(self.name.clone()))
            }
            (DialogField::Name, TuiEvent::Backspace) => {
                self.name.pop()?;
                Some(EditEvent::NameChanged(self.name.clone()))
            }
            (DialogField::Name, TuiEvent::Submit) => Some(EditEvent::Save),
            (DialogField::Country, TuiEvent::Submit | TuiEvent::InputChar(' ')) => {
                self.selector.open(&self.country_id);
                None
            }
            (DialogField::Save, TuiEvent::Submit) => Some(EditEvent::Save),
            (DialogField::Cancel, TuiEvent::Submit) => Some(EditEvent::Cancel),
            _ => None,
        }
    }
}

/// Transient render wrapper for the dialog.
pub struct EditDialog<'a> {
    state: &'a mut EditDialogState,
    form: &'a EditForm,
    is_saving: bool,
}

impl<'a> EditDialog<'a> {
    pub fn new(state: &'a mut EditDialogState, form: &'a EditForm, is_saving: bool) -> Self {
        Self {
            state,
            form,
            is_saving,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Edit Customer ")
            .title_bottom(Line::from(" Tab Next  Enter Confirm  Esc Cancel ").centered());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [name_area, country_area, menu_area, buttons_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_name(frame, name_area);

        let focused = self.state.focus == DialogField::Country;
        CountrySelector::new(&mut self.state.selector, &self.form.country_id, focused).render(
            frame,
            country_area,
            menu_area,
        );

        self.render_buttons(frame, buttons_area);
    }

    fn render_name(&self, frame: &mut Frame, area: Rect) {
        let focused = self.state.focus == DialogField::Name && !self.state.selector.open;
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = Line::from(vec![
            Span::raw(" Name "),
            Span::styled("*", Style::default().fg(Color::Red)),
            Span::raw(" "),
        ]);
        let field = Paragraph::new(self.state.name.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        );
        frame.render_widget(field, area);

        if focused {
            let max_x = area.x + area.width.saturating_sub(2);
            let name_width = u16::try_from(self.state.name.width()).unwrap_or(u16::MAX);
            let x = area.x.saturating_add(1).saturating_add(name_width).min(max_x);
            frame.set_cursor_position(Position::new(x, area.y + 1));
        }
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let button = |label: &'static str, field: DialogField, disabled: bool| {
            let style = if disabled {
                Style::default().fg(Color::DarkGray)
            } else if self.state.focus == field {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(label, style)
        };

        let save_label = if self.is_saving { "[ Saving... ]" } else { "[ Save ]" };
        let line = Line::from(vec![
            button("[ Cancel ]", DialogField::Cancel, self.is_saving),
            Span::raw(" "),
            button(save_label, DialogField::Save, self.is_saving),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::country;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn dialog() -> EditDialogState {
        let form = EditForm {
            name: "Ann".to_string(),
            country: "Norway".to_string(),
            country_id: "2".to_string(),
        };
        EditDialogState::new(&form, vec![country("2", "Norway"), country("3", "Iraq")])
    }

    #[test]
    fn test_typing_emits_name_changes() {
        let mut state = dialog();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('e')),
            Some(EditEvent::NameChanged("Anne".to_string()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Backspace),
            Some(EditEvent::NameChanged("Ann".to_string()))
        );
    }

    #[test]
    fn test_backspace_on_empty_name_is_silent() {
        let mut state = EditDialogState::new(&EditForm::default(), vec![]);
        assert_eq!(state.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut state = dialog();
        state.handle_event(&TuiEvent::NextField);
        assert_eq!(state.focus, DialogField::Country);
        state.handle_event(&TuiEvent::NextField);
        state.handle_event(&TuiEvent::NextField);
        state.handle_event(&TuiEvent::NextField);
        assert_eq!(state.focus, DialogField::Name);
        state.handle_event(&TuiEvent::PrevField);
        assert_eq!(state.focus, DialogField::Cancel);
    }

    #[test]
    fn test_typing_outside_name_field_does_nothing() {
        let mut state = dialog();
        state.focus = DialogField::Save;
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
        assert_eq!(state.name, "Ann");
    }

    #[test]
    fn test_country_selection_flow() {
        let mut state = dialog();
        state.handle_event(&TuiEvent::NextField);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert!(state.selector.open);
        assert_eq!(state.selector.cursor, 0);

        state.handle_event(&TuiEvent::CursorDown);
        let event = state.handle_event(&TuiEvent::Submit);
        assert_eq!(event, Some(EditEvent::CountrySelected(country("3", "Iraq"))));
        assert_eq!(state.country_id, "3");
        assert!(!state.selector.open);
    }

    #[test]
    fn test_escape_in_open_selector_only_closes_selector() {
        let mut state = dialog();
        state.focus = DialogField::Country;
        state.handle_event(&TuiEvent::Submit);
        assert_eq!(state.handle_event(&TuiEvent::Escape), None);
        assert!(!state.selector.open);
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(EditEvent::Cancel));
    }

    #[test]
    fn test_buttons() {
        let mut state = dialog();
        state.focus = DialogField::Save;
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(EditEvent::Save));
        state.focus = DialogField::Cancel;
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(EditEvent::Cancel));
        state.focus = DialogField::Name;
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(EditEvent::Save));
    }

    #[test]
    fn test_render_shows_saving_label() {
        let mut state = dialog();
        let form = EditForm {
            name: "Ann".to_string(),
            country: "Norway".to_string(),
            country_id: "2".to_string(),
        };
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| EditDialog::new(&mut state, &form, true).render(f, f.area()))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Edit Customer"));
        assert!(content.contains("Saving..."));
        assert!(content.contains("Norway"));
    }

    #[test]
    fn test_cursor_stays_in_field_for_very_long_name() {
        let mut state = dialog();
        state.name = "W".repeat(70_000);
        let form = EditForm {
            name: state.name.clone(),
            country: "Norway".to_string(),
            country_id: "2".to_string(),
        };
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| EditDialog::new(&mut state, &form, false).render(f, f.area()))
            .unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 80);
    }
}
