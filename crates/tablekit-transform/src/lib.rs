//! Fit/transform adapters over Polars frames.
//!
//! Each adapter wraps one dataframe primitive behind the shared
//! [`Transform`] contract so steps can be chained declaratively:
//!
//! - **assign**: add or overwrite columns from derivation rules
//! - **rename**: select and rename columns
//! - **merge**: join against a fixed right-hand table
//! - **aggregate**: grouped aggregation with optional column retention
//! - **pipeline**: ordered sequencing of stages
//!
//! The dataframe primitives themselves (selection, joins, group-by) are
//! delegated to Polars; adapters only hold configuration and carry the row
//! index of [`tablekit_frame::Frame`] through operations that would drop it.

pub mod aggregate;
pub mod assign;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod rename;
pub mod transform;

pub use aggregate::{AggFunc, AggregateTransformer};
pub use assign::{AssignRule, AssignTransformer};
pub use error::{Result, TransformError};
pub use merge::{JoinKind, MergeOptions, MergeTransformer};
pub use pipeline::Pipeline;
pub use rename::{KeepFeatures, NameTransformer};
pub use transform::Transform;
