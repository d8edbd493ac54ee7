//! # Actions
//!
//! Everything that can happen in taxgrid becomes an `Action`.
//! User toggles a filter option? That's `Action::FilterChanged(selection)`.
//! The update request comes back? That's `Action::SaveSucceeded(record)`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the adapter which I/O to start. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::api::{Country, Record};
use crate::core::state::{App, Editor};
use crate::core::store;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start (or restart) the joint load of records and countries.
    Reload,
    /// Both startup reads succeeded.
    Loaded {
        records: Vec<Record>,
        countries: Vec<Country>,
    },
    /// Either read failed.
    LoadFailed(String),
    /// Column filter pushed its full selection.
    FilterChanged(HashSet<String>),
    /// Open the editor for the record with this id.
    BeginEdit(String),
    SetName(String),
    SelectCountry(Country),
    Save,
    SaveSucceeded(Record),
    SaveFailed(String),
    CancelEdit,
    Quit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnLoad,
    SpawnUpdate(Record),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Reload => {
            if app.is_loading {
                return Effect::None;
            }
            app.is_loading = true;
            app.status_message = String::from("Loading...");
            Effect::SpawnLoad
        }
        Action::Loaded { records, countries } => {
            info!(
                "Loaded {} records and {} countries",
                records.len(),
                countries.len()
            );
            app.records = records;
            app.countries = countries;
            app.is_loading = false;
            app.status_message.clear();
            Effect::None
        }
        Action::LoadFailed(message) => {
            warn!("Load failed: {}", message);
            app.is_loading = false;
            app.status_message.clear();
            Effect::None
        }
        Action::FilterChanged(selection) => {
            app.filter_selection = selection;
            Effect::None
        }
        Action::BeginEdit(id) => {
            let Some(record) = app.records.iter().find(|r| r.id == id) else {
                warn!("BeginEdit for unknown record id {}", id);
                return Effect::None;
            };
            let form = store::seed_form(record, &app.countries);
            app.edit_sessions += 1;
            app.editor = Some(Editor {
                session: app.edit_sessions,
                original: record.clone(),
                form,
            });
            Effect::None
        }
        Action::SetName(name) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.form.name = name;
            }
            Effect::None
        }
        Action::SelectCountry(country) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.form.country_id = country.id;
                editor.form.country = country.name;
            }
            Effect::None
        }
        Action::Save => {
            if app.is_saving {
                debug!("Save ignored: request already in flight");
                return Effect::None;
            }
            let Some(editor) = app.editor.as_ref() else {
                return Effect::None;
            };
            if !editor.form.is_submittable() {
                debug!("Save ignored: name blank or no country chosen");
                return Effect::None;
            }
            app.is_saving = true;
            app.saving_session = Some(editor.session);
            Effect::SpawnUpdate(store::merge_form(&editor.original, &editor.form))
        }
        Action::SaveSucceeded(record) => {
            app.is_saving = false;
            let session = app.saving_session.take();
            if app
                .editor
                .as_ref()
                .is_some_and(|editor| Some(editor.session) == session)
            {
                app.editor = None;
            }
            app.status_message = format!("Saved {}", record.name);
            if !store::replace_record(&mut app.records, record) {
                warn!("Saved record is no longer in the list");
            }
            Effect::None
        }
        Action::SaveFailed(message) => {
            warn!("Save failed: {}", message);
            app.is_saving = false;
            app.saving_session = None;
            Effect::None
        }
        Action::CancelEdit => {
            app.editor = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
