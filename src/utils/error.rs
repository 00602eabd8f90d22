use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeeError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Date parse error: '{value}' does not match format '{format}'")]
    DateParseError { value: String, format: String },

    #[error("Missing column '{column}' in {source_name}")]
    MissingColumnError { column: String, source_name: String },

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FeeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FeeError::CsvError(_)
            | FeeError::DateParseError { .. }
            | FeeError::MissingColumnError { .. }
            | FeeError::InvalidArgument { .. } => ErrorCategory::Input,
            FeeError::ConfigValidationError { .. }
            | FeeError::InvalidConfigValueError { .. }
            | FeeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FeeError::IoError(_) | FeeError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 參數錯誤，跟 clap 的用法錯誤一樣回 2
            FeeError::InvalidArgument { .. } => ErrorSeverity::Medium,
            _ => match self.category() {
                ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
                ErrorCategory::System => ErrorSeverity::Critical,
            },
        }
    }

    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FeeError::CsvError(_) => "Check that the input file is valid CSV with a header row",
            FeeError::IoError(_) => "Check that the file exists and the path is readable/writable",
            FeeError::SerializationError(_) => "Check the summary data for unsupported values",
            FeeError::DateParseError { .. } => {
                "Fix the date value so it matches the expected format"
            }
            FeeError::MissingColumnError { .. } => {
                "Make sure the header contains patron_id, date_due and date_returned"
            }
            FeeError::InvalidArgument { .. } => "Check the command arguments with --help",
            FeeError::ConfigValidationError { .. }
            | FeeError::InvalidConfigValueError { .. }
            | FeeError::MissingConfigError { .. } => "Review the configuration file or CLI flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FeeError::IoError(e) => format!("Could not access a file: {}", e),
            FeeError::CsvError(e) => format!("The returns file could not be read: {}", e),
            other => other.to_string(),
        }
    }

    /// CLI 退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, FeeError>;
