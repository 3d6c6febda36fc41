//! Lazy, page-at-a-time traversal of a [`VacancySource`].

use async_stream::try_stream;
use futures::Stream;

use crate::error::AppError;
use crate::models::SourcePage;
use crate::traits::VacancySource;

/// Stream every vacancy the source returns for `term`.
///
/// Pages are requested one at a time starting from 0; the next page is only
/// fetched after the current one has been drained. The stream ends after the
/// page the source marks as last, and yields the error and stops if a page
/// request fails.
pub fn vacancies<'a, S>(
    source: &'a S,
    term: &'a str,
) -> impl Stream<Item = Result<S::Vacancy, AppError>> + 'a
where
    S: VacancySource,
{
    try_stream! {
        let mut page = 0u32;
        loop {
            let SourcePage { vacancies, last, .. } = source.fetch_page(term, page).await?;
            tracing::debug!(
                provider = source.name(),
                %term,
                page,
                items = vacancies.len(),
                last,
                "Fetched page"
            );
            for vacancy in vacancies {
                yield vacancy;
            }
            if last {
                break;
            }
            page += 1;
        }
    }
}
