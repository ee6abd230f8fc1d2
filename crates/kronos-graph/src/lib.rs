//! Kronos Graph
//!
//! Derives a correlation graph from telecom interaction records and filters
//! it for display.
//!
//! Stages:
//! - [`ingest`]: interaction counts and direct contacts of the target
//! - [`classify`]: one node per number with operator and correlation tier
//! - [`edges`]: one directed edge per two-party interaction
//! - [`related`]: cell-overlap expansion of a target's correlation record
//! - [`view`]: immutable filter state, filtered views, undo/redo
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use kronos_domain::{CorrelationTier, Interaction};
//! use kronos_graph::{CorrelationPipeline, ViewFilterState};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
//! let records = vec![
//!     Interaction::call("3001234567", "3009876543", ts, "Claro"),
//!     Interaction::call("3009876543", "3005551234", ts, "Movistar"),
//! ];
//!
//! let pipeline = CorrelationPipeline::default_config();
//! let graph = pipeline.derive(&records, "3001234567").unwrap();
//!
//! let filters = ViewFilterState::default().toggle_level(CorrelationTier::Indirect);
//! let view = pipeline.view(&graph, &filters);
//! assert_eq!(view.stats.visible_nodes, 2);
//! assert_eq!(view.stats.total_nodes, 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod edges;
pub mod ingest;
pub mod related;
pub mod view;

mod config;
mod error;
mod export;
mod pipeline;
mod session;
mod warning;

pub use classify::InteractionOperatorIndex;
pub use config::{PipelineConfig, RelatedSetConfig, TierThresholds};
pub use error::PipelineError;
pub use export::GraphExport;
pub use ingest::IngestOutput;
pub use pipeline::{CorrelationPipeline, DerivedGraph};
pub use related::{Exclusion, ExclusionReason, RelatedSet, RelatedSetFilter};
pub use session::AnalysisSession;
pub use view::{FilterHistory, GraphStats, GraphView, ViewFilterState};
pub use warning::PipelineWarning;
