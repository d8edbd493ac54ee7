//! # Application State
//!
//! Core business state for taxgrid. Domain data only, no TUI types.
//! Presentation state (scroll, popups, focus) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── records: Vec<Record>             // fetched tax records, server order
//! ├── countries: Vec<Country>          // reference list, loaded once
//! ├── filter_selection: HashSet        // normalized country names
//! ├── editor: Option<Editor>           // Some = edit dialog open
//! ├── is_loading: bool                 // load request outstanding
//! ├── is_saving: bool                  // update request outstanding
//! ├── saving_session: Option<u64>      // editor session that sent it
//! ├── edit_sessions: u64               // counter behind Editor::session
//! ├── status_message: String           // title bar text
//! └── base_url: String                 // API endpoint, for display
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashSet;

use crate::api::{Country, Record};
use crate::core::store::{self, EditForm};

/// An open edit session: the record as it was when editing began, plus the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    /// Distinguishes reopenings of the same record.
    pub session: u64,
    pub original: Record,
    pub form: EditForm,
}

pub struct App {
    pub records: Vec<Record>,
    pub countries: Vec<Country>,
    pub filter_selection: HashSet<String>,
    pub editor: Option<Editor>,
    pub is_loading: bool,
    /// Gate against duplicate submits. Not cleared by cancel.
    pub is_saving: bool,
    pub saving_session: Option<u64>,
    pub edit_sessions: u64,
    pub status_message: String,
    pub base_url: String,
}

impl App {
    /// A fresh App starts in the loading state; the first frame shows a spinner
    /// until the startup load reports back.
    pub fn new(base_url: String) -> Self {
        Self {
            records: Vec::new(),
            countries: Vec::new(),
            filter_selection: HashSet::new(),
            editor: None,
            is_loading: true,
            is_saving: false,
            saving_session: None,
            edit_sessions: 0,
            status_message: String::from("Loading..."),
            base_url,
        }
    }

    pub fn visible_records(&self) -> Vec<&Record> {
        store::visible_records(&self.records, &self.filter_selection)
    }

    pub fn distinct_country_options(&self) -> Vec<String> {
        store::distinct_country_options(&self.records)
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{loaded_app, record};

    #[test]
    fn test_app_new_defaults() {
        let app = App::new("http://localhost".to_string());
        assert!(app.is_loading);
        assert!(!app.is_saving);
        assert!(!app.is_editing());
        assert!(app.records.is_empty());
        assert!(app.filter_selection.is_empty());
    }

    #[test]
    fn test_visible_records_follow_selection() {
        let mut app = loaded_app(
            vec![record("1", "A", "iraq"), record("2", "B", "Norway")],
            vec![],
        );
        assert_eq!(app.visible_records().len(), 2);

        app.filter_selection.insert("Norway".to_string());
        let visible = app.visible_records();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "2");
    }
}
