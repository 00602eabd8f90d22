pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command, FeesArgs};
pub use config::{toml_config::TomlConfig, LocalStorage, ReportConfig};

pub use core::dates::{add_date_range, date_range, parse_day_count, reformat_dates};
pub use core::fees::fees_report;
pub use core::{etl::ReportEngine, pipeline::FeesPipeline};
pub use domain::model::{Fee, FeeReport, FeeSummary, ReturnRecord};
pub use utils::error::{FeeError, Result};
