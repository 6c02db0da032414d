#[derive(Debug, thiserror::Error)]
pub enum ObraError {
    #[error("the workbook contains no sheets")]
    EmptySheetSet,

    #[error("sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("no row contains the expected header labels {markers:?}")]
    HeaderNotFound { markers: Vec<String> },

    #[error("required column '{0}' missing from header row")]
    MissingColumn(String),

    #[error("invalid number in row {row}, column '{column}': '{value}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("no budget items found (no item rows under a section)")]
    NoItems,

    #[error("certificate field missing: {0}")]
    RenderFieldMissing(String),

    #[error("invalid issue timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("amount out of range: {0}")]
    AmountOverflow(String),

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("failed to write PDF: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ObraError {
    /// True when the failure was caused by the caller's input rather than
    /// by an internal fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ObraError::EmptySheetSet
                | ObraError::SheetNotFound(_)
                | ObraError::HeaderNotFound { .. }
                | ObraError::MissingColumn(_)
                | ObraError::InvalidNumber { .. }
                | ObraError::NoItems
                | ObraError::RenderFieldMissing(_)
                | ObraError::InvalidTimestamp(_)
                | ObraError::AmountOverflow(_)
                | ObraError::Workbook(_)
        )
    }
}
