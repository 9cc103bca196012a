//! Column assignment.
//!
//! [`AssignTransformer`] adds or overwrites columns from an ordered map of
//! column name to derivation rule. Every rule is evaluated against the input
//! frame state; no rule sees the output of another rule from the same call.

use std::fmt;
use std::sync::Arc;

use polars::prelude::{
    Column, DataFrame, Expr, IntoLazy, NamedFrom, PlSmallStr, PolarsResult, Series, lit,
};
use tablekit_frame::Frame;

use crate::error::Result;
use crate::transform::Transform;

/// Callback deriving a new column from the input frame.
pub type DeriveFn = dyn Fn(&DataFrame) -> PolarsResult<Column> + Send + Sync;

/// How an assigned column is produced.
#[derive(Clone)]
pub enum AssignRule {
    /// A Polars expression evaluated against the input frame. Scalar results
    /// broadcast to the frame height.
    Expr(Expr),
    /// An arbitrary derivation from the input frame. The returned column must
    /// have the frame height (or length one, which broadcasts).
    Derive(Arc<DeriveFn>),
}

impl AssignRule {
    /// Rule from a Polars expression.
    pub fn expr(expr: Expr) -> Self {
        Self::Expr(expr)
    }

    /// Rule assigning one constant value to every row.
    ///
    /// The column dtype follows the Rust type of `value` exactly; the
    /// constant goes through a one-element series literal rather than
    /// `lit`, whose dynamic integer literals would shrink an `i64` to
    /// `Int32`.
    pub fn constant<T>(value: T) -> Self
    where
        Series: NamedFrom<Vec<T>, [T]>,
    {
        Self::Expr(lit(Series::new(PlSmallStr::EMPTY, vec![value])))
    }

    /// Rule from a derivation callback.
    pub fn derive<F>(derive: F) -> Self
    where
        F: Fn(&DataFrame) -> PolarsResult<Column> + Send + Sync + 'static,
    {
        Self::Derive(Arc::new(derive))
    }
}

impl fmt::Debug for AssignRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => f.debug_tuple("Expr").field(expr).finish(),
            Self::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// Adds or overwrites columns per an ordered assign map.
///
/// Existing columns keep their position when overwritten; new columns are
/// appended in map order. The row index passes through untouched. Rule
/// evaluation errors propagate unmodified.
#[derive(Debug, Clone, Default)]
pub struct AssignTransformer {
    assign_map: Vec<(PlSmallStr, AssignRule)>,
}

impl AssignTransformer {
    pub fn new<N>(assign_map: impl IntoIterator<Item = (N, AssignRule)>) -> Self
    where
        N: Into<PlSmallStr>,
    {
        Self {
            assign_map: assign_map
                .into_iter()
                .map(|(name, rule)| (name.into(), rule))
                .collect(),
        }
    }

    /// Append one assignment, builder style.
    pub fn with(mut self, name: impl Into<PlSmallStr>, rule: AssignRule) -> Self {
        self.assign_map.push((name.into(), rule));
        self
    }
}

impl Transform for AssignTransformer {
    fn name(&self) -> &str {
        "assign"
    }

    fn transform(&self, frame: &Frame) -> Result<Frame> {
        let data = frame.data();

        // Derivation callbacks run eagerly against the input so that every
        // rule observes the original frame state; their results join the
        // expression rules as literal columns.
        let mut assignments = Vec::with_capacity(self.assign_map.len());
        for (name, rule) in &self.assign_map {
            let expr = match rule {
                AssignRule::Expr(expr) => expr.clone(),
                AssignRule::Derive(derive) => {
                    let column = derive(data)?;
                    lit(column.as_materialized_series().clone())
                }
            };
            assignments.push(expr.alias(name.clone()));
        }

        let assigned = data.clone().lazy().with_columns(assignments).collect()?;
        Ok(frame.with_data(assigned)?)
    }
}
