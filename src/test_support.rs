//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, Country, Record, TaxApi};
use crate::core::state::App;

/// Builds a record with the given id, name and raw country value.
pub fn record(id: &str, name: &str, country: &str) -> Record {
    Record {
        id: id.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        ..Default::default()
    }
}

pub fn country(id: &str, name: &str) -> Country {
    Country {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Creates an App that has already finished loading the given lists.
pub fn loaded_app(records: Vec<Record>, countries: Vec<Country>) -> App {
    let mut app = App::new("http://test".to_string());
    app.records = records;
    app.countries = countries;
    app.is_loading = false;
    app
}

/// In-memory `TaxApi` that records every update it receives.
pub struct MemoryApi {
    pub records: Vec<Record>,
    pub countries: Vec<Country>,
    pub fail_countries: bool,
    pub fail_updates: bool,
    pub updates: Mutex<Vec<Record>>,
}

impl MemoryApi {
    pub fn new(records: Vec<Record>, countries: Vec<Country>) -> Self {
        Self {
            records,
            countries,
            fail_countries: false,
            fail_updates: false,
            updates: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TaxApi for MemoryApi {
    async fn fetch_taxes(&self) -> Result<Vec<Record>, ApiError> {
        Ok(self.records.clone())
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>, ApiError> {
        if self.fail_countries {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(self.countries.clone())
    }

    async fn update_tax(&self, record: &Record) -> Result<(), ApiError> {
        if self.fail_updates {
            return Err(ApiError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        self.updates.lock().unwrap().push(record.clone());
        Ok(())
    }
}
