#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

pub use storage::LocalStorage;

use crate::core::dates::RETURNS_DATE_FORMAT;
use crate::core::fees::DEFAULT_DAILY_RATE;
use crate::core::ConfigProvider;
use crate::utils::error::{FeeError, Result};
use crate::utils::validation::{self, Validate};

pub const DEFAULT_INPUT_PATH: &str = "data/book_returns_short.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "book_fees.csv";
pub const VALID_OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

/// Fully resolved settings for one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub input_path: String,
    pub output_path: String,
    pub daily_rate: f64,
    pub returns_date_format: String,
    pub output_formats: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            daily_rate: DEFAULT_DAILY_RATE,
            returns_date_format: RETURNS_DATE_FORMAT.to_string(),
            output_formats: vec!["csv".to_string()],
        }
    }
}

impl ConfigProvider for ReportConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn daily_rate(&self) -> f64 {
        self.daily_rate
    }

    fn returns_date_format(&self) -> &str {
        &self.returns_date_format
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("report.input_path", &self.input_path)?;
        validation::validate_file_extension("report.input_path", &self.input_path, &["csv"])?;
        validation::validate_path("report.output_path", &self.output_path)?;
        validation::validate_range("report.daily_rate", self.daily_rate, 0.0, 100.0)?;
        validation::validate_non_empty_string("dates.returns_format", &self.returns_date_format)?;

        // csv 一定會輸出
        if !self.output_formats.iter().any(|f| f == "csv") {
            return Err(FeeError::ConfigValidationError {
                field: "report.output_formats".to_string(),
                message: "csv output cannot be disabled".to_string(),
            });
        }
        for format in &self.output_formats {
            if !VALID_OUTPUT_FORMATS.contains(&format.as_str()) {
                return Err(FeeError::InvalidConfigValueError {
                    field: "report.output_formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        VALID_OUTPUT_FORMATS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}
