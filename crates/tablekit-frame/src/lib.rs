//! Labeled frame data model for tablekit.
//!
//! This crate wraps a Polars [`DataFrame`](polars::prelude::DataFrame) with an
//! optional row-label index so that transformations can carry row identity
//! through operations that would otherwise discard it (joins, aggregations).
//!
//! - **frame**: the [`Frame`] and [`Index`] types
//! - **error**: crate error type and `Result` alias

pub mod error;
pub mod frame;

pub use error::{FrameError, Result};
pub use frame::{DEFAULT_INDEX_NAME, Frame, Index};
