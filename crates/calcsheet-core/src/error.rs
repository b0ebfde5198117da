//! Error types for calcsheet core.

use calcsheet_engine::engine::LineId;
use thiserror::Error;

/// Errors that can occur while editing a document
#[derive(Error, Debug)]
pub enum CalcsheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No line with id {0}")]
    UnknownLine(LineId),

    #[error("Cannot remove the last line")]
    LastLine,

    #[error("No functions file loaded")]
    NoFunctionsLoaded,

    #[error("Rhai compile error: {0}")]
    RhaiCompile(String),
}

pub type Result<T> = std::result::Result<T, CalcsheetError>;
