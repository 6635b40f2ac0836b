//! Column reconciliation: bring trace B's header in line with trace A's.
//!
//! It owns:
//! - the mapping file schema (renames + drops) and its validation
//! - applying a validated mapping to a loaded table

pub mod mapping;

pub use mapping::{ColumnMapping, MappingSpec, Rename};
