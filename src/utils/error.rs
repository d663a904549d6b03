use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Workbook not found at path: {path}")]
    SourceNotFound { path: String },

    #[error("Budget data is unavailable because the workbook failed to load")]
    DataUnavailable,

    #[error("Sheet '{name}' is missing from the workbook")]
    SheetMissing { name: String },

    #[error("Sheet '{sheet}' is missing required column '{column}'")]
    MissingColumnError { sheet: String, column: String },

    #[error("Sheet '{sheet}', row {row}: {reason}")]
    RowDecodeError {
        sheet: String,
        row: usize,
        reason: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, BudgetError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Workbook,
    Session,
    System,
}

impl BudgetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BudgetError::ConfigValidationError { .. }
            | BudgetError::InvalidConfigValueError { .. }
            | BudgetError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BudgetError::SourceNotFound { .. }
            | BudgetError::SheetMissing { .. }
            | BudgetError::MissingColumnError { .. }
            | BudgetError::RowDecodeError { .. } => ErrorCategory::Workbook,
            BudgetError::DataUnavailable | BudgetError::ValidationError { .. } => {
                ErrorCategory::Session
            }
            BudgetError::CsvError(_)
            | BudgetError::IoError(_)
            | BudgetError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Rejected submissions can be corrected and resubmitted within the session
            BudgetError::ValidationError { .. } => ErrorSeverity::Low,
            BudgetError::DataUnavailable => ErrorSeverity::Medium,
            BudgetError::SourceNotFound { .. }
            | BudgetError::SheetMissing { .. }
            | BudgetError::MissingColumnError { .. }
            | BudgetError::RowDecodeError { .. }
            | BudgetError::ConfigValidationError { .. }
            | BudgetError::InvalidConfigValueError { .. }
            | BudgetError::MissingConfigError { .. } => ErrorSeverity::High,
            BudgetError::CsvError(_)
            | BudgetError::IoError(_)
            | BudgetError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BudgetError::SourceNotFound { path } => {
                format!("Could not find the budget workbook at '{}'", path)
            }
            BudgetError::DataUnavailable => {
                "Budget data is unavailable; the workbook was never loaded".to_string()
            }
            BudgetError::SheetMissing { name } => {
                format!("The workbook has no sheet named '{}'", name)
            }
            BudgetError::MissingColumnError { sheet, column } => {
                format!("Sheet '{}' has no '{}' column", sheet, column)
            }
            BudgetError::RowDecodeError { sheet, row, reason } => {
                format!("Sheet '{}' row {} could not be read: {}", sheet, row, reason)
            }
            BudgetError::ValidationError { message } => {
                format!("The submitted table was rejected: {}", message)
            }
            BudgetError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            BudgetError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid {}: {}", value, field, reason),
            BudgetError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            other => format!("Unexpected failure: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the CLI flags and the TOML config file against the documented options"
                    .to_string()
            }
            ErrorCategory::Workbook => {
                "Verify the workbook path and that both sheets exist with their header rows intact"
                    .to_string()
            }
            ErrorCategory::Session => {
                "Fix the rejected submission and resubmit, or restart once the workbook loads"
                    .to_string()
            }
            ErrorCategory::System => {
                "Check file permissions and disk state, then run again with --verbose".to_string()
            }
        }
    }
}
