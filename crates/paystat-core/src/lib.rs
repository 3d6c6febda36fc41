pub mod aggregate;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod providers;
pub mod salary;
pub mod stats;
pub mod traits;

#[cfg(test)]
pub mod testutil;

pub use aggregate::{SalaryAverage, aggregate};
pub use config::{FailurePolicy, HeadHunterConfig, Settings, SuperJobConfig};
pub use error::AppError;
pub use models::{ApiRequest, SourcePage, StatisticsTable, TermFailure, TermStatistics};
pub use providers::{HeadHunter, SuperJob};
pub use stats::StatisticsBuilder;
pub use traits::{Fetcher, VacancySource};
