//! FIDL Resolved Graph Definitions
//!
//! This crate contains the data model the compiler front-end hands to code
//! generators: the per-file declaration sets plus the resolved user-defined
//! types and constants they refer to. It is pure data with serde support and
//! no generation logic.

pub mod graph;
pub mod literal;
pub mod types;

// Re-export commonly used types at the crate root
pub use graph::*;
pub use literal::*;
pub use types::*;
