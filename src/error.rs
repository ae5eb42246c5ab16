use boxpack_layout::{LayoutError, TreeError};
use boxpack_style::StyleError;
use thiserror::Error;

/// Everything that can go wrong between reading a layout document and printing its boxes.
#[derive(Error, Debug)]
pub enum BoxpackError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Invalid style: {0}")]
    Style(#[from] StyleError),

    #[error("Document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Node id '{0}' is used more than once")]
    DuplicateId(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<TreeError> for BoxpackError {
    fn from(e: TreeError) -> Self {
        BoxpackError::Layout(LayoutError::Tree(e))
    }
}
