//! Kronos Domain Layer
//!
//! Value types shared by every Kronos crate. Nothing in here performs I/O;
//! the graph pipeline, the backend client and the CLI all build on these
//! definitions.
//!
//! ## Key Concepts
//!
//! - **Interaction**: one recorded call or data session, optionally with a secondary party
//! - **ParticipantNode**: a phone number seen in an analysis, with its correlation tier
//! - **InteractionEdge**: a directed caller→callee (or reporter→secondary) link
//! - **CorrelationTier**: strength of association relative to the target number
//! - **CorrelationResult**: a per-number record produced by the backend correlation engine
//! - **CellId**: canonical cell-tower identifier used for overlap comparisons
//!
//! ## Architecture
//!
//! - Only serialization, time and id primitives as dependencies
//! - Records are immutable once derived; a new analysis re-derives everything
//! - Trait definitions for lookups the pipeline delegates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod cell;
pub mod correlation;
pub mod edge;
pub mod interaction;
pub mod node;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use analysis::{AnalysisId, AnalysisRequest};
pub use cell::{CellId, CellIdNormalizationError};
pub use correlation::CorrelationResult;
pub use edge::{EdgeKind, InteractionEdge};
pub use interaction::{Interaction, InteractionType};
pub use node::{ParticipantNode, UNKNOWN_OPERATOR};
pub use tier::CorrelationTier;
pub use traits::OperatorLookup;
