//! Kronos Rust SDK
//!
//! Client for the correlation backend's `analyzeCorrelation` operation.
//!
//! # Example
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use kronos_domain::AnalysisRequest;
//! use kronos_sdk::CorrelationClient;
//!
//! # async fn run() -> Result<(), kronos_sdk::SdkError> {
//! let client = CorrelationClient::new("http://localhost:8080");
//! let request = AnalysisRequest::new(
//!     "mission-7",
//!     Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
//!     2,
//! );
//! let results = client.analyze_correlation(&request).await?;
//! println!("{} correlated numbers", results.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod envelope;
mod error;

pub use client::CorrelationClient;
pub use envelope::AnalyzeResponse;
pub use error::SdkError;
