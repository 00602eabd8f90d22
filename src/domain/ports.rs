use crate::domain::model::{FeeReport, ReturnRecord};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn daily_rate(&self) -> f64;
    fn returns_date_format(&self) -> &str;
    fn output_formats(&self) -> &[String];
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<ReturnRecord>>;
    fn transform(&self, records: Vec<ReturnRecord>) -> Result<FeeReport>;
    fn load(&self, report: FeeReport) -> Result<String>;
}
