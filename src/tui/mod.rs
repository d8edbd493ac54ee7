//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One synchronous loop on the main thread. Network calls run as tokio tasks
//! and report back through an mpsc channel of `Action`s, drained once per
//! iteration. Each `update()` returns an `Effect` naming the I/O to spawn.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on input, resize or a
//!   background action.

mod component;
pub mod components;
mod event;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{HttpTaxApi, Record, TaxApi, load_all};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ColumnFilterState, EditDialogState, EditEvent, FilterEvent, TaxTableState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub table: TaxTableState,
    pub filter: ColumnFilterState,
    /// Present exactly while `App::editor` is.
    pub edit_dialog: Option<EditDialogState>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            table: TaxTableState::new(),
            filter: ColumnFilterState::new(),
            edit_dialog: None,
        }
    }

    /// Pushes props derived from `App` into the persistent component states.
    pub fn sync(&mut self, app: &App) {
        self.filter.set_options(app.distinct_country_options());
        let row_count = ui::table_rows(app, &self.table.sort).len();
        self.table.clamp(row_count);
        self.sync_editor(app);
    }

    /// Opens or drops the dialog to follow the core's editor.
    pub fn sync_editor(&mut self, app: &App) {
        match (&app.editor, &self.edit_dialog) {
            (None, Some(_)) => self.edit_dialog = None,
            (Some(editor), None) => {
                self.edit_dialog = Some(EditDialogState::new(&editor.form, app.countries.clone()));
            }
            _ => {}
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol makes a lone Esc unambiguous; terminals
        // without it ignore the sequence
        execute!(
            stdout(),
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn TaxApi> = Arc::new(HttpTaxApi::new(config.base_url.clone()));
    let mut app = App::new(config.base_url.clone());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_load(api.clone(), tx.clone());

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true;

    loop {
        tui.sync(&app);

        if app.is_loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, event) {
                should_quit |= apply(&mut app, action, &api, &tx);
                tui.sync(&app);
            }
        }

        // Results of background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            should_quit |= apply(&mut app, action, &api, &tx);
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Runs one action through the reducer and starts whatever I/O it asks for.
/// Returns true when the app should quit.
fn apply(app: &mut App, action: Action, api: &Arc<dyn TaxApi>, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::SpawnLoad => {
            spawn_load(api.clone(), tx.clone());
            false
        }
        Effect::SpawnUpdate(record) => {
            spawn_update(api.clone(), record, tx.clone());
            false
        }
        Effect::Quit => true,
    }
}

/// Maps a terminal event to an action, giving the topmost layer first pick:
/// edit dialog, then filter popup, then the table.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    debug!("Routing event {:?}", event);
    match event {
        TuiEvent::Resize => return None,
        TuiEvent::ForceQuit => return Some(Action::Quit),
        _ => {}
    }

    if let Some(dialog) = tui.edit_dialog.as_mut() {
        return match dialog.handle_event(&event)? {
            EditEvent::NameChanged(name) => Some(Action::SetName(name)),
            EditEvent::CountrySelected(country) => Some(Action::SelectCountry(country)),
            EditEvent::Save => Some(Action::Save),
            EditEvent::Cancel => Some(Action::CancelEdit),
        };
    }

    if tui.filter.open {
        return match tui.filter.handle_event(&event)? {
            FilterEvent::Changed(selection) => Some(Action::FilterChanged(selection)),
        };
    }

    let rows = ui::table_rows(app, &tui.table.sort);
    match event {
        TuiEvent::CursorUp => {
            tui.table.select_previous(rows.len());
            None
        }
        TuiEvent::CursorDown => {
            tui.table.select_next(rows.len());
            None
        }
        TuiEvent::Submit | TuiEvent::InputChar('e') => {
            tui.table.selected_id(&rows).map(Action::BeginEdit)
        }
        TuiEvent::InputChar('f') => {
            tui.filter.toggle_open();
            None
        }
        TuiEvent::InputChar('s') => {
            tui.table.sort.cycle_column();
            None
        }
        TuiEvent::InputChar('S') => {
            tui.table.sort.flip();
            None
        }
        TuiEvent::InputChar('r') => Some(Action::Reload),
        TuiEvent::InputChar('q') | TuiEvent::Escape => Some(Action::Quit),
        _ => None,
    }
}

fn spawn_load(api: Arc<dyn TaxApi>, tx: mpsc::Sender<Action>) -> tokio::task::JoinHandle<()> {
    info!("Spawning load of records and countries");
    tokio::spawn(async move {
        let action = match load_all(api.as_ref()).await {
            Ok((records, countries)) => Action::Loaded { records, countries },
            Err(e) => Action::LoadFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send load result: receiver dropped");
        }
    })
}

fn spawn_update(
    api: Arc<dyn TaxApi>,
    record: Record,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning update for record {}", record.id);
    tokio::spawn(async move {
        let action = match api.update_tax(&record).await {
            Ok(()) => Action::SaveSucceeded(record),
            Err(e) => Action::SaveFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send update result: receiver dropped");
        }
    })
}
