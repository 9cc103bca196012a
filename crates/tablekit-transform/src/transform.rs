//! The fit/transform adapter contract.

use tablekit_frame::Frame;

use crate::error::Result;

/// Two-step adapter contract shared by every transformer.
///
/// `fit` configures or validates against training data and `transform`
/// performs the actual operation. All transformers in this crate are
/// immutable configuration, so the default `fit` is a no-op that always
/// succeeds; it exists so adapters can be sequenced uniformly by a
/// [`Pipeline`](crate::pipeline::Pipeline).
///
/// Implementations hold no mutable state, so `transform` may be called
/// concurrently on a shared instance.
pub trait Transform: Send + Sync {
    /// Stage label used in logs.
    fn name(&self) -> &str;

    /// Prepare the transformer against `frame`. No-op by default.
    fn fit(&mut self, frame: &Frame) -> Result<()> {
        let _ = frame;
        Ok(())
    }

    /// Apply the transformation, producing a new frame.
    fn transform(&self, frame: &Frame) -> Result<Frame>;

    /// `fit` followed by `transform` on the same frame.
    fn fit_transform(&mut self, frame: &Frame) -> Result<Frame> {
        self.fit(frame)?;
        self.transform(frame)
    }
}
