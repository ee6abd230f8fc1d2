//! Command implementations.

pub mod config;
pub mod graph;
pub mod related;
pub mod view;

pub use self::config::execute_config;
pub use self::graph::execute_graph;
pub use self::related::execute_related;
pub use self::view::execute_view;
