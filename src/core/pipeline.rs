use crate::core::fees::{aggregate, read_records, write_summary_csv};
use crate::core::{ConfigProvider, FeeReport, Pipeline, ReturnRecord, Storage};
use crate::utils::error::Result;
use std::path::Path;

pub struct FeesPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FeesPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn wants_format(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }
}

/// `book_fees.csv` -> `book_fees.json`
fn json_path_for(csv_path: &str) -> String {
    Path::new(csv_path)
        .with_extension("json")
        .to_string_lossy()
        .into_owned()
}

impl<S: Storage, C: ConfigProvider> Pipeline for FeesPipeline<S, C> {
    fn extract(&self) -> Result<Vec<ReturnRecord>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading returns from: {}", input_path);

        let data = self.storage.read_file(input_path)?;
        read_records(data.as_slice(), input_path)
    }

    fn transform(&self, records: Vec<ReturnRecord>) -> Result<FeeReport> {
        tracing::debug!(
            "Aggregating {} records at {} per day",
            records.len(),
            self.config.daily_rate()
        );
        aggregate(
            &records,
            self.config.daily_rate(),
            self.config.returns_date_format(),
        )
    }

    fn load(&self, report: FeeReport) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        let mut csv_data = Vec::new();
        write_summary_csv(&mut csv_data, &report)?;
        tracing::debug!("Writing CSV summary ({} bytes) to {}", csv_data.len(), output_path);
        self.storage.write_file(&output_path, &csv_data)?;

        if self.wants_format("json") {
            let json_path = json_path_for(&output_path);
            let json_data = serde_json::to_string_pretty(&report.summaries)?;
            tracing::debug!("Writing JSON summary to {}", json_path);
            self.storage.write_file(&json_path, json_data.as_bytes())?;
        }

        Ok(output_path)
    }
}
