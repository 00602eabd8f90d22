use crate::config::toml_config::TomlConfig;
use crate::config::ReportConfig;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "late-fees")]
#[command(about = "Library late fee reports and date helpers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compute per-patron late fees from a book returns CSV
    Fees(FeesArgs),

    /// Reformat yyyy-mm-dd dates as "dd Mon yyyy"
    Reformat {
        #[arg(required = true)]
        dates: Vec<String>,
    },

    /// Print N consecutive dates starting at START (yyyy-mm-dd)
    Range { start: String, n: String },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FeesArgs {
    /// Book returns CSV [default: data/book_returns_short.csv]
    #[arg(short, long)]
    pub input: Option<String>,

    /// Summary CSV to write [default: book_fees.csv]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Fee charged per day late [default: 0.25]
    #[arg(long)]
    pub daily_rate: Option<f64>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write a JSON copy of the summary next to the CSV
    #[arg(long)]
    pub json: bool,

    /// Don't echo the written CSV to stdout
    #[arg(long)]
    pub no_print: bool,
}

impl Cli {
    /// 沒有子命令時跑預設的費用報表
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Fees(FeesArgs::default()))
    }
}

impl FeesArgs {
    /// 優先順序: 命令列 > TOML > 預設值
    pub fn resolve(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                let toml_config = TomlConfig::from_file(path)?;
                crate::utils::validation::Validate::validate(&toml_config)?;
                toml_config.into_report_config()
            }
            None => ReportConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(rate) = self.daily_rate {
            config.daily_rate = rate;
        }
        if self.json && !config.output_formats.iter().any(|f| f == "json") {
            config.output_formats.push("json".to_string());
        }

        Ok(config)
    }
}
