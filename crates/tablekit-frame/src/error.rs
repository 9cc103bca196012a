use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("index length {index_len} does not match frame height {height}")]
    IndexLength { index_len: usize, height: usize },
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, FrameError>;
