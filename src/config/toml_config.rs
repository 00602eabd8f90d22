use crate::config::ReportConfig;
use crate::utils::error::{FeeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub report: ReportSection,
    pub dates: Option<DatesSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSection {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub daily_rate: Option<f64>,
    pub output_formats: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatesSection {
    pub returns_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FeeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FeeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RETURNS_DIR})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FeeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers the file's values over `base`; unset keys keep the base value.
    pub fn apply_to(&self, base: ReportConfig) -> ReportConfig {
        let report = &self.report;
        ReportConfig {
            input_path: report.input_path.clone().unwrap_or(base.input_path),
            output_path: report.output_path.clone().unwrap_or(base.output_path),
            daily_rate: report.daily_rate.unwrap_or(base.daily_rate),
            returns_date_format: self
                .dates
                .as_ref()
                .and_then(|d| d.returns_format.clone())
                .unwrap_or(base.returns_date_format),
            output_formats: report.output_formats.clone().unwrap_or(base.output_formats),
        }
    }

    pub fn into_report_config(self) -> ReportConfig {
        self.apply_to(ReportConfig::default())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.report.input_path {
            validation::validate_path("report.input_path", path)?;
        }
        if let Some(path) = &self.report.output_path {
            validation::validate_path("report.output_path", path)?;
        }
        if let Some(rate) = self.report.daily_rate {
            validation::validate_range("report.daily_rate", rate, 0.0, 100.0)?;
        }
        if let Some(dates) = &self.dates {
            let format = validation::validate_required_field("dates.returns_format", &dates.returns_format)?;
            validation::validate_non_empty_string("dates.returns_format", format)?;
        }
        Ok(())
    }
}
