pub mod client;
pub mod types;

pub use client::{ApiError, HttpTaxApi, TaxApi, load_all};
pub use types::{Country, Record};
