use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::api::Record;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::tax_table::{COLUMN_WIDTHS, SortOrder};
use crate::tui::components::{ColumnFilter, EditDialog, TaxTable, TitleBar};

/// Rows as displayed: the core's visible records, then the presentation sort.
pub fn table_rows<'a>(app: &'a App, sort: &SortOrder) -> Vec<&'a Record> {
    sort.apply(app.visible_records())
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, table_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    let rows = table_rows(app, &tui.table.sort);

    let mut title_bar = TitleBar::new(
        app.base_url.clone(),
        app.status_message.clone(),
        rows.len(),
        app.records.len(),
    );
    title_bar.render(frame, title_area);

    TaxTable::new(&mut tui.table, &rows)
        .filter(tui.filter.selected.len(), tui.filter.open)
        .loading(app.is_loading, spinner_frame)
        .render(frame, table_area);

    if tui.filter.open && !app.is_loading {
        let popup = filter_popup_area(table_area, tui.filter.options.len());
        ColumnFilter::new(&mut tui.filter).render(frame, popup);
    }

    if let (Some(editor), Some(dialog)) = (app.editor.as_ref(), tui.edit_dialog.as_mut()) {
        EditDialog::new(dialog, &editor.form, app.is_saving).render(frame, frame.area());
    }

    let help = if app.editor.is_some() {
        " Tab Next field  Enter Confirm  Esc Cancel "
    } else if tui.filter.open {
        " ↑↓ Move  Space Toggle  f/Esc Close "
    } else {
        " ↑↓ Move  Enter/e Edit  f Filter  s/S Sort  r Reload  q Quit "
    };
    frame.render_widget(
        Line::styled(help, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

/// Popup rect under the Country column header, clamped to the table area.
pub fn filter_popup_area(table_area: Rect, option_count: usize) -> Rect {
    let inner = table_area.inner(ratatui::layout::Margin::new(1, 1));
    let columns: [Rect; 5] = Layout::horizontal(COLUMN_WIDTHS)
        .spacing(2)
        .areas(inner);
    let country = columns[3];

    let width = country.width.max(24).min(table_area.width);
    let x = country.x.min(table_area.right().saturating_sub(width));
    let y = inner.y + 1;
    let wanted = option_count.max(1) as u16 + 2;
    let height = wanted.min(table_area.bottom().saturating_sub(y));
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{country, loaded_app, record};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_loading() {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = App::new("http://test".to_string());
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();
        assert!(buffer_text(&terminal).contains("Loading"));
    }

    #[test]
    fn test_draw_ui_with_filter_and_dialog() {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = loaded_app(
            vec![record("1", "Ann", "iraq"), record("2", "Bob", "Norway")],
            vec![country("3", "Iraq")],
        );
        let mut tui = TuiState::new();
        tui.filter.set_options(app.distinct_country_options());
        tui.filter.toggle_open();

        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Filter country"));
        assert!(text.contains("[ ] Iraq"));

        tui.filter.toggle_open();
        update(&mut app, Action::BeginEdit("1".to_string()));
        tui.sync_editor(&app);
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Edit Customer"));
        assert!(text.contains("[ Save ]"));
    }

    #[test]
    fn test_table_rows_apply_filter_then_sort() {
        let mut app = loaded_app(
            vec![
                record("1", "Zed", "iraq"),
                record("2", "Bob", "Norway"),
                record("3", "Amy", "IRAQ"),
            ],
            vec![],
        );
        app.filter_selection.insert("Iraq".to_string());
        let mut sort = SortOrder::default();
        sort.cycle_column();
        let ids: Vec<&str> = table_rows(&app, &sort).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_filter_popup_stays_inside_table() {
        let area = Rect::new(0, 1, 60, 10);
        let popup = filter_popup_area(area, 50);
        assert!(popup.right() <= area.right());
        assert!(popup.bottom() <= area.bottom());
        assert!(popup.width >= 24);
    }
}
