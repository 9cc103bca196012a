//! Ordered sequencing of transform stages.
//!
//! A [`Pipeline`] threads a frame through its stages in order. It implements
//! [`Transform`] itself, so pipelines nest as stages of other pipelines.

use std::fmt;

use tablekit_frame::Frame;
use tracing::debug;

use crate::error::Result;
use crate::transform::Transform;

struct Stage {
    label: String,
    transform: Box<dyn Transform>,
}

/// Ordered sequence of named transform stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage labeled with its own [`Transform::name`].
    pub fn with_stage(self, transform: impl Transform + 'static) -> Self {
        let label = transform.name().to_owned();
        self.with_labeled_stage(label, transform)
    }

    /// Append a stage under an explicit label.
    pub fn with_labeled_stage(
        mut self,
        label: impl Into<String>,
        transform: impl Transform + 'static,
    ) -> Self {
        self.stages.push(Stage {
            label: label.into(),
            transform: Box::new(transform),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage labels in execution order.
    pub fn labels(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.label.as_str()).collect()
    }

    fn run(&self, frame: &Frame) -> Result<Frame> {
        let mut current = frame.clone();
        for stage in &self.stages {
            let rows_in = current.height();
            let cols_in = current.width();
            current = stage.transform.transform(&current)?;
            debug!(
                stage = %stage.label,
                rows_in,
                cols_in,
                rows_out = current.height(),
                cols_out = current.width(),
                "pipeline stage applied"
            );
        }
        Ok(current)
    }
}

impl Transform for Pipeline {
    fn name(&self) -> &str {
        "pipeline"
    }

    /// Fit every stage in order, feeding each one the output of the stages
    /// before it.
    fn fit(&mut self, frame: &Frame) -> Result<()> {
        let mut current = frame.clone();
        for stage in &mut self.stages {
            current = stage.transform.fit_transform(&current)?;
        }
        Ok(())
    }

    fn transform(&self, frame: &Frame) -> Result<Frame> {
        self.run(frame)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.labels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, DataFrame, col, lit};

    use super::*;
    use crate::assign::{AssignRule, AssignTransformer};
    use crate::rename::{KeepFeatures, NameTransformer};

    fn sample() -> Frame {
        Frame::new(
            DataFrame::new(vec![Column::new("x".into(), vec![1i64, 2, 3])]).unwrap(),
        )
    }

    #[test]
    fn stages_run_in_order() {
        let mut pipeline = Pipeline::new()
            .with_stage(AssignTransformer::new([(
                "double",
                AssignRule::expr(col("x") * lit(2i64)),
            )]))
            .with_stage(NameTransformer::new([("double", "d")], KeepFeatures::None).unwrap());

        assert_eq!(pipeline.labels(), vec!["assign", "rename"]);

        let out = pipeline.fit_transform(&sample()).unwrap();

        assert_eq!(out.column_names(), vec!["d"]);
        let d = out.data().column("d").unwrap().i64().unwrap();
        assert_eq!(d.get(2), Some(6));
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();

        let out = pipeline.transform(&sample()).unwrap();

        assert_eq!(out.column_names(), vec!["x"]);
        assert_eq!(out.height(), 3);
    }
}
