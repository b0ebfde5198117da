//! calcsheet-core - UI-agnostic document model.

pub mod document;
pub mod error;

pub use document::Document;
pub use error::{CalcsheetError, Result};

pub use calcsheet_engine::engine::{Line, LineId, ResultLine};
