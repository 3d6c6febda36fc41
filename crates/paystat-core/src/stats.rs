use crate::aggregate::aggregate;
use crate::config::FailurePolicy;
use crate::error::AppError;
use crate::models::{StatisticsTable, TermStatistics};
use crate::pagination::vacancies;
use crate::traits::VacancySource;

/// Builds the per-term statistics table for one provider.
///
/// For each term: probe the first page for the reported total, apply the
/// provider's admission rule, then stream every page through the salary
/// aggregator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsBuilder {
    policy: FailurePolicy,
}

impl StatisticsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    /// Run every term through `source`, in order.
    ///
    /// Under [`FailurePolicy::Abort`] the first error ends the run and no table
    /// is returned.
    pub async fn build<S, T>(&self, source: &S, terms: &[T]) -> Result<StatisticsTable, AppError>
    where
        S: VacancySource,
        T: AsRef<str>,
    {
        tracing::info!(provider = source.name(), terms = terms.len(), "Collecting statistics");
        let mut table = StatisticsTable::new();

        for term in terms {
            let term = term.as_ref();
            match self.term_statistics(source, term).await {
                Ok(Some(stats)) => table.insert(term, stats),
                Ok(None) => {}
                Err(e) if self.policy == FailurePolicy::Isolate => {
                    tracing::warn!(
                        provider = source.name(),
                        %term,
                        transport = e.is_transport(),
                        error = %e,
                        "Term failed, continuing"
                    );
                    table.record_failure(term, &e);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            provider = source.name(),
            included = table.len(),
            failed = table.failures().len(),
            "Statistics complete"
        );
        Ok(table)
    }

    /// Statistics for a single term, or `None` if the provider's admission
    /// rule leaves it out.
    pub async fn term_statistics<S>(
        &self,
        source: &S,
        term: &str,
    ) -> Result<Option<TermStatistics>, AppError>
    where
        S: VacancySource,
    {
        let probe = source.fetch_first_page(term).await?;
        if !source.admits(probe.found) {
            tracing::info!(provider = source.name(), %term, found = probe.found, "Too few vacancies, skipping");
            return Ok(None);
        }

        let average = aggregate(vacancies(source, term), |v| source.predict_salary(v)).await?;
        tracing::info!(
            provider = source.name(),
            %term,
            found = probe.found,
            fetched = average.vacancies_seen,
            processed = average.vacancies_processed,
            average = average.average_salary,
            "Term processed"
        );

        Ok(Some(TermStatistics {
            vacancies_found: probe.found,
            vacancies_processed: average.vacancies_processed,
            average_salary: average.average_salary,
        }))
    }
}
