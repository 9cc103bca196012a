//! Column selection and renaming.

use polars::prelude::{Expr, IntoLazy, PlSmallStr, col};
use serde::{Deserialize, Serialize};
use tablekit_frame::Frame;

use crate::error::{Result, TransformError};
use crate::transform::Transform;

/// Which columns survive a [`NameTransformer`] beyond the renamed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepFeatures {
    /// Retain every input column; matching ones are renamed in place.
    All,
    /// Retain only the renamed columns.
    None,
    /// Retain the renamed columns plus the listed ones, in that order.
    /// Must be disjoint from the rename-map sources.
    List(Vec<String>),
}

/// Selects and renames columns.
///
/// With [`KeepFeatures::None`] or [`KeepFeatures::List`] the output contains
/// exactly the rename-map sources (under their target names, in map order)
/// followed by the listed extras; a missing column is a lookup failure. With
/// [`KeepFeatures::All`] every column survives in input order and rename-map
/// entries whose source is absent are ignored. The row index passes through
/// untouched.
#[derive(Debug, Clone)]
pub struct NameTransformer {
    names_map: Vec<(PlSmallStr, PlSmallStr)>,
    keep_features: KeepFeatures,
}

impl NameTransformer {
    /// Build the transformer, validating the configuration.
    ///
    /// Fails with [`TransformError::KeepRenameOverlap`] when `keep_features`
    /// is a list that shares columns with the rename-map sources.
    pub fn new<S, D>(
        names_map: impl IntoIterator<Item = (S, D)>,
        keep_features: KeepFeatures,
    ) -> Result<Self>
    where
        S: Into<PlSmallStr>,
        D: Into<PlSmallStr>,
    {
        let names_map: Vec<(PlSmallStr, PlSmallStr)> = names_map
            .into_iter()
            .map(|(source, target)| (source.into(), target.into()))
            .collect();

        if let KeepFeatures::List(keep) = &keep_features {
            let overlap: Vec<String> = keep
                .iter()
                .filter(|kept| names_map.iter().any(|(source, _)| source.as_str() == *kept))
                .cloned()
                .collect();
            if !overlap.is_empty() {
                return Err(TransformError::KeepRenameOverlap(overlap));
            }
        }

        Ok(Self {
            names_map,
            keep_features,
        })
    }
}

impl Transform for NameTransformer {
    fn name(&self) -> &str {
        "rename"
    }

    fn transform(&self, frame: &Frame) -> Result<Frame> {
        let data = match &self.keep_features {
            KeepFeatures::All => {
                // One simultaneous rename: a chain or swap map ("x" -> "y",
                // "y" -> "z") must not collide partway through. Non-strict,
                // so absent sources are ignored.
                let sources = self.names_map.iter().map(|(source, _)| source.clone());
                let targets = self.names_map.iter().map(|(_, target)| target.clone());
                frame
                    .data()
                    .clone()
                    .lazy()
                    .rename(sources, targets, false)
                    .collect()?
            }
            KeepFeatures::None | KeepFeatures::List(_) => {
                let extra: &[String] = match &self.keep_features {
                    KeepFeatures::List(columns) => columns,
                    _ => &[],
                };
                let selection: Vec<Expr> = self
                    .names_map
                    .iter()
                    .map(|(source, target)| col(source.clone()).alias(target.clone()))
                    .chain(extra.iter().map(|column| col(column.as_str())))
                    .collect();
                frame.data().clone().lazy().select(selection).collect()?
            }
        };
        Ok(frame.with_data(data)?)
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, DataFrame};

    use super::*;

    fn sample() -> Frame {
        Frame::new(
            DataFrame::new(vec![
                Column::new("id".into(), vec!["a", "b"]),
                Column::new("x".into(), vec![1i64, 2]),
                Column::new("y".into(), vec![3i64, 4]),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn keep_list_selects_renamed_plus_listed() {
        let transformer =
            NameTransformer::new([("x", "x2")], KeepFeatures::List(vec!["y".into()])).unwrap();

        let out = transformer.transform(&sample()).unwrap();

        assert_eq!(out.column_names(), vec!["x2", "y"]);
    }

    #[test]
    fn keep_none_selects_only_renamed() {
        let transformer =
            NameTransformer::new([("y", "y2"), ("x", "x2")], KeepFeatures::None).unwrap();

        let out = transformer.transform(&sample()).unwrap();

        // Map-key order, not input order.
        assert_eq!(out.column_names(), vec!["y2", "x2"]);
    }

    #[test]
    fn keep_all_renames_in_place_and_ignores_absent_sources() {
        let transformer =
            NameTransformer::new([("x", "x2"), ("missing", "m2")], KeepFeatures::All).unwrap();

        let out = transformer.transform(&sample()).unwrap();

        assert_eq!(out.column_names(), vec!["id", "x2", "y"]);
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn keep_all_applies_chained_renames_simultaneously() {
        // "x" takes over the name "y" while "y" moves on to "z".
        let transformer = NameTransformer::new([("x", "y"), ("y", "z")], KeepFeatures::All).unwrap();

        let out = transformer.transform(&sample()).unwrap();

        assert_eq!(out.column_names(), vec!["id", "y", "z"]);
        let y = out.data().column("y").unwrap().i64().unwrap();
        assert_eq!(y.get(0), Some(1)); // values formerly under "x"
        let z = out.data().column("z").unwrap().i64().unwrap();
        assert_eq!(z.get(0), Some(3)); // values formerly under "y"
    }

    #[test]
    fn missing_column_is_a_lookup_failure_when_selecting() {
        let transformer = NameTransformer::new([("missing", "m2")], KeepFeatures::None).unwrap();

        assert!(matches!(
            transformer.transform(&sample()),
            Err(TransformError::Polars(_))
        ));
    }

    #[test]
    fn overlapping_keep_list_fails_at_construction() {
        let err = NameTransformer::new(
            [("x", "x2")],
            KeepFeatures::List(vec!["x".into(), "y".into()]),
        )
        .unwrap_err();

        match err {
            TransformError::KeepRenameOverlap(columns) => assert_eq!(columns, vec!["x"]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
