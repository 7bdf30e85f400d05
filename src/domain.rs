//! Domain models for scene inspection.
//!
//! This module contains the file-agnostic core: the statement tokenizer,
//! classified records, the ownership hierarchy, size aggregation and
//! configuration.

mod config;
pub use config::Config;

/// Size aggregation over records and hierarchies.
pub mod distribution;
pub use distribution::{distribution_by_category, distribution_by_type, percent_of};

pub mod hierarchy;
pub use hierarchy::{BuildError, Hierarchy, HierarchyNode, NodeId};

pub mod record;
pub use record::{
    Connection, FileReference, Metadata, NodeCreation, RawRecord, Record, Requirement,
    TypedRecord,
};

/// Usage diagnosis of large records.
pub mod report;
pub use report::{UsageEntry, diagnose};

pub mod tokenizer;
pub use tokenizer::tokenize_command;
