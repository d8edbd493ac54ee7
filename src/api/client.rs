//! HTTP client for the tax record API.
//!
//! Three endpoints, no auth, no pagination:
//!
//! ```text
//! GET  {base}/taxes        -> [Record]
//! GET  {base}/countries    -> [Country]
//! PUT  {base}/taxes/{id}   <- Record (response body ignored)
//! ```

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::types::{Country, Record};

/// Errors that can occur while talking to the API.
///
/// The UI treats every variant the same way (log and swallow); the split
/// only exists to make the log lines useful.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// Server answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body could not be decoded.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[async_trait]
pub trait TaxApi: Send + Sync {
    /// Fetches every tax record.
    async fn fetch_taxes(&self) -> Result<Vec<Record>, ApiError>;

    /// Fetches the country reference list.
    async fn fetch_countries(&self) -> Result<Vec<Country>, ApiError>;

    /// Replaces the record with `record.id` on the server.
    async fn update_tax(&self, record: &Record) -> Result<(), ApiError>;
}

/// Issues both startup reads together and succeeds only if both do.
pub async fn load_all(api: &dyn TaxApi) -> Result<(Vec<Record>, Vec<Country>), ApiError> {
    futures::try_join!(api.fetch_taxes(), api.fetch_countries())
}

/// `TaxApi` backed by reqwest.
pub struct HttpTaxApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTaxApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Turns a non-2xx response into `ApiError::Api`, keeping the body as the message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("API error: {} - {}", status, message);
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TaxApi for HttpTaxApi {
    async fn fetch_taxes(&self) -> Result<Vec<Record>, ApiError> {
        let records: Vec<Record> = self.get_json("taxes").await?;
        info!("Fetched {} records", records.len());
        Ok(records)
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>, ApiError> {
        let countries: Vec<Country> = self.get_json("countries").await?;
        info!("Fetched {} countries", countries.len());
        Ok(countries)
    }

    async fn update_tax(&self, record: &Record) -> Result<(), ApiError> {
        let url = format!("{}/taxes/{}", self.base_url, record.id);
        info!("PUT {} (name={:?}, countryId={:?})", url, record.name, record.country_id);

        let response = self
            .client
            .put(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }
}
