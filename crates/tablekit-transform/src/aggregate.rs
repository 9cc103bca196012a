//! Grouped aggregation.
//!
//! [`AggregateTransformer`] groups the input by a key column and applies each
//! (function, columns) pair of its spec, producing one output column per
//! (column, function) combination named `"<column>_<function>"`. Group order
//! is first occurrence in the input. With `keep`, every column untouched by
//! the spec is reduced by first-value-per-group and appended after the
//! aggregated columns.

use std::collections::HashSet;
use std::fmt;

use polars::prelude::{Expr, IntoLazy, col};
use serde::{Deserialize, Serialize};
use tablekit_frame::Frame;
use tracing::debug;

use crate::error::Result;
use crate::transform::Transform;

/// Named aggregation functions, dispatched to the Polars equivalents.
///
/// The lowercase name doubles as the output column suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggFunc {
    Sum,
    Mean,
    Min,
    Max,
    Median,
    /// Sample standard deviation (ddof = 1).
    Std,
    /// Non-null count.
    Count,
    NUnique,
    First,
    Last,
}

impl AggFunc {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Min => "min",
            Self::Max => "max",
            Self::Median => "median",
            Self::Std => "std",
            Self::Count => "count",
            Self::NUnique => "n_unique",
            Self::First => "first",
            Self::Last => "last",
        }
    }

    fn apply(self, column: Expr) -> Expr {
        match self {
            Self::Sum => column.sum(),
            Self::Mean => column.mean(),
            Self::Min => column.min(),
            Self::Max => column.max(),
            Self::Median => column.median(),
            Self::Std => column.std(1),
            Self::Count => column.count(),
            Self::NUnique => column.n_unique(),
            Self::First => column.first(),
            Self::Last => column.last(),
        }
    }
}

impl fmt::Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Computes grouped aggregates, optionally retaining untouched columns.
///
/// The output frame is indexed by the key column; its data columns are
/// exactly the `"<column>_<function>"` results in spec order, followed (when
/// `keep` is set) by the rest columns in lexicographic order. A spec or key
/// column absent from the input is a lookup failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateTransformer {
    aggregations: Vec<(AggFunc, Vec<String>)>,
    key: String,
    keep: bool,
}

impl AggregateTransformer {
    pub fn new<S: Into<String>>(aggregations: Vec<(AggFunc, Vec<String>)>, key: S) -> Self {
        Self {
            aggregations,
            key: key.into(),
            keep: false,
        }
    }

    /// Retain non-aggregated columns via first-value-per-group.
    pub fn keep_rest(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    /// Input columns not referenced by any aggregation and not the key,
    /// in lexicographic order. Recomputed from the frame on every call.
    pub fn rest_columns(&self, frame: &Frame) -> Vec<String> {
        let used: HashSet<&str> = self
            .aggregations
            .iter()
            .flat_map(|(_, columns)| columns.iter().map(String::as_str))
            .collect();

        let mut rest: Vec<String> = frame
            .column_names()
            .into_iter()
            .filter(|name| !used.contains(name) && *name != self.key)
            .map(ToOwned::to_owned)
            .collect();
        rest.sort_unstable();
        rest
    }
}

impl Transform for AggregateTransformer {
    fn name(&self) -> &str {
        "aggregate"
    }

    fn transform(&self, frame: &Frame) -> Result<Frame> {
        let mut aggregated = Vec::new();
        for (function, columns) in &self.aggregations {
            for column in columns {
                aggregated
                    .push(function.apply(col(column.as_str())).alias(format!("{column}_{function}")));
            }
        }

        if self.keep {
            for column in self.rest_columns(frame) {
                aggregated.push(col(column.as_str()).first().alias(column.as_str()));
            }
        }

        let grouped = frame
            .data()
            .clone()
            .lazy()
            .group_by_stable([col(self.key.as_str())])
            .agg(aggregated)
            .collect()?;

        debug!(
            key = %self.key,
            rows_in = frame.height(),
            groups = grouped.height(),
            "aggregated frame"
        );

        Ok(Frame::new(grouped).set_index(&self.key)?)
    }
}
