pub mod log_provider;
pub mod topic;

pub use log_provider::{FileLogProvider, LogData, LogDataProvider, ReadWindow};
