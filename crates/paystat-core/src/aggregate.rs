use futures::{Stream, TryStreamExt};

use crate::error::AppError;

/// Result of reducing a vacancy sequence to an average salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SalaryAverage {
    /// Truncated mean of the contributing estimates, 0 if there were none.
    pub average_salary: u64,
    /// Number of vacancies that contributed an estimate.
    pub vacancies_processed: u64,
    /// Number of vacancies consumed, contributing or not.
    pub vacancies_seen: u64,
}

/// Running sum and count of salary estimates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalaryAccumulator {
    sum: f64,
    processed: u64,
    seen: u64,
}

impl SalaryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one vacancy. Only a positive estimate is counted.
    pub fn add(&mut self, estimate: Option<f64>) {
        self.seen += 1;
        if let Some(value) = estimate.filter(|v| *v > 0.0) {
            self.sum += value;
            self.processed += 1;
        }
    }

    pub fn finish(self) -> SalaryAverage {
        let average_salary = if self.processed > 0 {
            (self.sum / self.processed as f64) as u64
        } else {
            0
        };
        SalaryAverage {
            average_salary,
            vacancies_processed: self.processed,
            vacancies_seen: self.seen,
        }
    }
}

/// Reduce a vacancy stream in a single pass without collecting it.
///
/// The first error yielded by the stream is returned and nothing further is
/// consumed.
pub async fn aggregate<S, V, F>(vacancies: S, mut extractor: F) -> Result<SalaryAverage, AppError>
where
    S: Stream<Item = Result<V, AppError>>,
    F: FnMut(&V) -> Option<f64>,
{
    let mut vacancies = std::pin::pin!(vacancies);
    let mut acc = SalaryAccumulator::new();
    while let Some(vacancy) = vacancies.try_next().await? {
        acc.add(extractor(&vacancy));
    }
    Ok(acc.finish())
}
