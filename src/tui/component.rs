use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something drawn into a single `Rect` from props alone.
///
/// Stateful pieces (table, filter popup, edit dialog) instead pair a
/// persistent `*State` held in `TuiState` with a short-lived wrapper that
/// borrows it for one frame; those wrappers have their own `render`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Persistent component state that consumes key events.
///
/// Returns `None` when the event was swallowed or changed only local state
/// (cursor moves, popup open/close). A `Some` is handed to the event loop,
/// which turns it into a core `Action`.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
