use std::future::Future;

use crate::error::AppError;
use crate::models::{ApiRequest, SourcePage};

/// Performs a GET request and returns the raw response body.
///
/// Implementations must fail on any non-success status instead of handing
/// back an error body.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// A paginated vacancy search API.
///
/// Implementations differ in wire parameters, in how they decide that a page
/// is the last one, and in how a salary is read out of a listing.
pub trait VacancySource: Send + Sync {
    type Vacancy: Send;

    /// Human-readable provider name, used in logs and report titles.
    fn name(&self) -> &str;

    /// Fetch one page of results for `term`. Pages are numbered from 0.
    fn fetch_page(
        &self,
        term: &str,
        page: u32,
    ) -> impl Future<Output = Result<SourcePage<Self::Vacancy>, AppError>> + Send;

    /// Fetch only the first page, to read the provider's reported total.
    fn fetch_first_page(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<SourcePage<Self::Vacancy>, AppError>> + Send {
        self.fetch_page(term, 0)
    }

    /// Whether a term with `found` reported vacancies belongs in the output.
    fn admits(&self, found: u64) -> bool;

    /// Estimated salary of a listing, or `None` if it cannot contribute.
    fn predict_salary(&self, vacancy: &Self::Vacancy) -> Option<f64>;
}
