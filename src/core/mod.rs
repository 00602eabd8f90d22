pub mod dates;
pub mod etl;
pub mod fees;
pub mod pipeline;

pub use crate::domain::model::{Fee, FeeReport, FeeSummary, ReturnRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
