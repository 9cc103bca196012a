use polars::error::PolarsError;
use tablekit_frame::FrameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A column appears both as a rename-map source and in the keep list.
    #[error("columns listed in both the rename map and `keep`: {}", .0.join(", "))]
    KeepRenameOverlap(Vec<String>),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
