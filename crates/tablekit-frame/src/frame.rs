//! Frame and row-index types.
//!
//! A [`Frame`] is a Polars `DataFrame` plus an optional single-level row-label
//! [`Index`]. A frame without an index behaves as if labeled by row position
//! (0..height, unnamed), which is the state every freshly built frame is in.
//!
//! The index is deliberately minimal: transformations only need to move it
//! out of the way (`reset_index`) and put it back (`set_index`), for example
//! to carry row labels across a join.

use polars::prelude::{Column, DataFrame, PlSmallStr};

use crate::error::{FrameError, Result};

/// Reserved column name used when an unnamed index is materialized.
pub const DEFAULT_INDEX_NAME: &str = "index";

/// A single-level sequence of row labels with an optional name.
///
/// The name on the underlying `Column` is not meaningful; only `name` is.
#[derive(Debug, Clone)]
pub struct Index {
    labels: Column,
    name: Option<PlSmallStr>,
}

impl Index {
    /// Create an index from a label column and an optional name.
    pub fn new(labels: Column, name: Option<PlSmallStr>) -> Self {
        Self { labels, name }
    }

    /// The row labels.
    pub fn labels(&self) -> &Column {
        &self.labels
    }

    /// The index name, if any. Unnamed indexes materialize under
    /// [`DEFAULT_INDEX_NAME`].
    pub fn name(&self) -> Option<&PlSmallStr> {
        self.name.as_ref()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A Polars `DataFrame` with an optional row-label index.
///
/// Invariants: column names are unique and all columns share one height
/// (enforced by Polars); when an index is present its length equals the
/// frame height (enforced at construction).
#[derive(Debug, Clone)]
pub struct Frame {
    data: DataFrame,
    index: Option<Index>,
}

impl Frame {
    /// Wrap a `DataFrame` with the default (positional, unnamed) index.
    pub fn new(data: DataFrame) -> Self {
        Self { data, index: None }
    }

    /// Wrap a `DataFrame` with an explicit index.
    ///
    /// Fails when the index length does not match the frame height.
    pub fn indexed(data: DataFrame, index: Index) -> Result<Self> {
        if index.len() != data.height() {
            return Err(FrameError::IndexLength {
                index_len: index.len(),
                height: data.height(),
            });
        }
        Ok(Self {
            data,
            index: Some(index),
        })
    }

    /// The frame contents.
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consume the frame, returning the contents and dropping the index.
    pub fn into_data(self) -> DataFrame {
        self.data
    }

    /// The row-label index, if one is set.
    pub fn index(&self) -> Option<&Index> {
        self.index.as_ref()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Number of data columns (the index does not count).
    pub fn width(&self) -> usize {
        self.data.width()
    }

    /// Data column names in frame order.
    pub fn column_names(&self) -> Vec<&str> {
        self.data
            .get_column_names()
            .into_iter()
            .map(PlSmallStr::as_str)
            .collect()
    }

    /// Replace the frame contents, keeping the current index.
    ///
    /// Fails when the new contents change the height away from the index
    /// length.
    pub fn with_data(&self, data: DataFrame) -> Result<Self> {
        match &self.index {
            Some(index) => Self::indexed(data, index.clone()),
            None => Ok(Self::new(data)),
        }
    }

    /// Move a data column into the index position.
    ///
    /// The resulting index is named after the column. Fails when the column
    /// does not exist.
    pub fn set_index(mut self, column: &str) -> Result<Self> {
        let labels = self.data.drop_in_place(column)?;
        let name = Some(labels.name().clone());
        Ok(Self {
            data: self.data,
            index: Some(Index::new(labels, name)),
        })
    }

    /// Clear or replace the index name without touching the labels.
    pub fn set_index_name(&mut self, name: Option<PlSmallStr>) {
        if let Some(index) = &mut self.index {
            index.name = name;
        }
    }

    /// Materialize the index as the leading data column.
    ///
    /// A named index materializes under its name; an unnamed or default
    /// index under [`DEFAULT_INDEX_NAME`] (the default index is generated as
    /// 0..height). The result has the default index. Fails when the target
    /// column name already exists in the data.
    pub fn reset_index(self) -> Result<Self> {
        match self.index {
            Some(index) => {
                let name = index
                    .name
                    .unwrap_or_else(|| PlSmallStr::from_static(DEFAULT_INDEX_NAME));
                let mut labels = index.labels;
                labels.rename(name);
                let mut columns = self.data.get_columns().to_vec();
                columns.insert(0, labels);
                Ok(Self::new(DataFrame::new(columns)?))
            }
            None => Ok(Self::new(
                self.data
                    .with_row_index(PlSmallStr::from_static(DEFAULT_INDEX_NAME), None)?,
            )),
        }
    }
}

impl From<DataFrame> for Frame {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}
