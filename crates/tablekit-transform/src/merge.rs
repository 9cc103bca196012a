//! Relational merge against a fixed right-hand table.

use polars::prelude::{
    DataFrame, Expr, IntoLazy, JoinArgs, JoinType, MaintainOrderJoin, PlSmallStr, col,
};
use serde::{Deserialize, Serialize};
use tablekit_frame::{DEFAULT_INDEX_NAME, Frame};
use tracing::debug;

use crate::error::Result;
use crate::transform::Transform;

/// Equality-join flavor, delegated to Polars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    fn to_polars(self) -> JoinType {
        match self {
            Self::Inner => JoinType::Inner,
            Self::Left => JoinType::Left,
            Self::Right => JoinType::Right,
            Self::Full => JoinType::Full,
        }
    }
}

/// Join parameters handed through to the join primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Key columns on the left side.
    pub left_on: Vec<String>,
    /// Key columns on the right side, matched positionally with `left_on`.
    pub right_on: Vec<String>,
    pub how: JoinKind,
    /// Suffix for right-side columns whose names collide with left-side
    /// non-key columns. Polars' `_right` when unset.
    pub suffix: Option<String>,
}

impl MergeOptions {
    /// Join on the same key columns in both tables.
    pub fn on<S: Into<String>>(keys: impl IntoIterator<Item = S>) -> Self {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        Self {
            left_on: keys.clone(),
            right_on: keys,
            how: JoinKind::default(),
            suffix: None,
        }
    }

    /// Join on differently named key columns.
    pub fn left_right<S: Into<String>>(
        left_on: impl IntoIterator<Item = S>,
        right_on: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            left_on: left_on.into_iter().map(Into::into).collect(),
            right_on: right_on.into_iter().map(Into::into).collect(),
            how: JoinKind::default(),
            suffix: None,
        }
    }

    pub fn how(mut self, how: JoinKind) -> Self {
        self.how = how;
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
}

/// Joins the input frame against a fixed right-hand table.
///
/// Output row order follows the left frame. With `keep_index` the left
/// frame's row-label index survives the join: it is reset to a column before
/// joining and restored afterward. An unnamed (or default) index round-trips
/// through the reserved `"index"` column and comes back unnamed, so the
/// output is indistinguishable from indexing the surviving original labels
/// directly. Join errors (missing keys, colliding output names) propagate.
#[derive(Debug, Clone)]
pub struct MergeTransformer {
    right: DataFrame,
    options: MergeOptions,
    keep_index: bool,
}

impl MergeTransformer {
    pub fn new(right: DataFrame, options: MergeOptions) -> Self {
        Self {
            right,
            options,
            keep_index: true,
        }
    }

    /// Whether the left frame's index survives the join. Defaults to true.
    pub fn keep_index(mut self, keep_index: bool) -> Self {
        self.keep_index = keep_index;
        self
    }

    fn join(&self, left: &DataFrame) -> Result<DataFrame> {
        let mut args = JoinArgs::new(self.options.how.to_polars());
        args.maintain_order = MaintainOrderJoin::Left;
        if let Some(suffix) = &self.options.suffix {
            args.suffix = Some(suffix.as_str().into());
        }

        let left_on: Vec<Expr> = self.options.left_on.iter().map(|k| col(k.as_str())).collect();
        let right_on: Vec<Expr> = self.options.right_on.iter().map(|k| col(k.as_str())).collect();

        let joined = left
            .clone()
            .lazy()
            .join(self.right.clone().lazy(), left_on, right_on, args)
            .collect()?;

        debug!(
            rows_left = left.height(),
            rows_right = self.right.height(),
            rows_out = joined.height(),
            "merged frames"
        );
        Ok(joined)
    }
}

impl Transform for MergeTransformer {
    fn name(&self) -> &str {
        "merge"
    }

    fn transform(&self, frame: &Frame) -> Result<Frame> {
        if !self.keep_index {
            return Ok(Frame::new(self.join(frame.data())?));
        }

        let unnamed = frame.index().is_none_or(|index| index.name().is_none());
        let index_column: PlSmallStr = frame
            .index()
            .and_then(|index| index.name().cloned())
            .unwrap_or_else(|| PlSmallStr::from_static(DEFAULT_INDEX_NAME));

        let reset = frame.clone().reset_index()?;
        let joined = self.join(reset.data())?;
        let mut out = Frame::new(joined).set_index(index_column.as_str())?;
        if unnamed {
            out.set_index_name(None);
        }
        Ok(out)
    }
}
