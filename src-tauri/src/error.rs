//! Error type shared by the workbook reader, the CRM core and the app facade.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("Read error: {0}")]
    Read(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("Watch error: {0}")]
    Watch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid lead status: {0}")]
    InvalidStatus(String),

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrmError {
    pub fn missing_column(sheet: &str, column: &str) -> Self {
        CrmError::MissingColumn {
            sheet: sheet.to_string(),
            column: column.to_string(),
        }
    }

    /// True when the error points at the workbook itself rather than at a request.
    pub fn is_workbook_error(&self) -> bool {
        matches!(
            self,
            CrmError::FileNotFound(_)
                | CrmError::SheetNotFound(_)
                | CrmError::MissingColumn { .. }
                | CrmError::Read(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CrmError>;
