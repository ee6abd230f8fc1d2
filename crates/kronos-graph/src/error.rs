//! Pipeline error types

use thiserror::Error;

/// Errors that end a pipeline run
///
/// Data-quality problems that let the run continue are reported as
/// [`crate::PipelineWarning`] values instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// No interactions were supplied
    #[error("No data for this period: the interaction list is empty")]
    EmptyDataset,

    /// A record is unusable (e.g. no source number)
    #[error("Interaction #{index} is invalid: {reason}")]
    InvalidInteraction {
        /// Position of the record in the input
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// The target never appears in the data (strict mode only)
    #[error("Target number {0} does not appear in any interaction")]
    TargetNotFound(String),

    /// Filter state rejected
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Configuration rejected
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Export could not be encoded or decoded
    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}
