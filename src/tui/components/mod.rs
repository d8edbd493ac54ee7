//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status line (endpoint, record counter, status)
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it for
//! one frame of rendering:
//!
//! - `TaxTable` / `TaxTableState`: the record table, row highlight, sort
//! - `ColumnFilter` / `ColumnFilterState`: multi-select country filter popup
//! - `EditDialog` / `EditDialogState`: modal form for one record
//! - `CountrySelector` / `CountrySelectorState`: dropdown inside the dialog
//!
//! Components receive external data as props, never by reaching into `App`.
//! They emit high-level events (`FilterEvent`, `EditEvent`, `SelectorEvent`)
//! that the event loop turns into core `Action`s.
//!
//! ```text
//! components/
//! ├── mod.rs               (this file, shared layout helpers)
//! ├── title_bar.rs
//! ├── tax_table.rs
//! ├── column_filter.rs
//! ├── country_selector.rs
//! └── edit_dialog.rs
//! ```

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub mod column_filter;
pub mod country_selector;
pub mod edit_dialog;
pub mod tax_table;
mod title_bar;

pub use column_filter::{ColumnFilter, ColumnFilterState, FilterEvent};
pub use edit_dialog::{EditDialog, EditDialogState, EditEvent};
pub use tax_table::{TaxTable, TaxTableState};
pub use title_bar::TitleBar;

/// Truncate a string to fit within `max_width` display columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
