//! Error types for layout engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid page setup: {0}")]
    InvalidPageSetup(String),

    #[error("failed to save PDF file '{file_name}'")]
    Save {
        file_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
