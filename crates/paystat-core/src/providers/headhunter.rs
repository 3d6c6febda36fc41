use serde::Deserialize;

use crate::config::HeadHunterConfig;
use crate::error::AppError;
use crate::models::{ApiRequest, SourcePage};
use crate::salary;
use crate::traits::{Fetcher, VacancySource};

/// HeadHunter (api.hh.ru) vacancy search.
///
/// The API reports the number of pages with every response. Pagination stops
/// once the requested page index reaches that count, so the page just past
/// the end is requested too; it comes back empty and is harmless.
#[derive(Clone)]
pub struct HeadHunter<F: Fetcher> {
    fetcher: F,
    config: HeadHunterConfig,
}

#[derive(Debug, Deserialize)]
struct HhPage {
    items: Vec<HhVacancy>,
    found: u64,
    pages: u32,
}

/// A HeadHunter listing, reduced to the fields used for statistics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HhVacancy {
    #[serde(default)]
    pub salary: Option<HhSalary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HhSalary {
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub currency: Option<String>,
}

impl<F: Fetcher> HeadHunter<F> {
    pub fn new(fetcher: F, config: HeadHunterConfig) -> Self {
        Self { fetcher, config }
    }

    /// Full-text query restricting vacancy titles to developer roles for `term`.
    pub fn search_text(&self, term: &str) -> String {
        let keywords = self
            .config
            .profession_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(" OR ");
        format!("({keywords}) AND {term}")
    }

    pub fn page_request(&self, term: &str, page: u32) -> ApiRequest {
        ApiRequest::get(&self.config.base_url)
            .query("text", self.search_text(term))
            .query("search_field", "name")
            .query("page", page)
            .query("industry", self.config.industry)
            .query("professional_role", self.config.professional_role)
            .query("area", self.config.area)
            .query("period", self.config.period_days)
    }
}

impl<F: Fetcher> VacancySource for HeadHunter<F> {
    type Vacancy = HhVacancy;

    fn name(&self) -> &str {
        "HeadHunter"
    }

    async fn fetch_page(&self, term: &str, page: u32) -> Result<SourcePage<HhVacancy>, AppError> {
        let body = self.fetcher.fetch(&self.page_request(term, page)).await?;
        let parsed: HhPage = serde_json::from_str(&body).map_err(|e| {
            AppError::MalformedResponse(format!("HeadHunter page {page} for '{term}': {e}"))
        })?;

        Ok(SourcePage {
            vacancies: parsed.items,
            found: parsed.found,
            last: page >= parsed.pages,
        })
    }

    fn admits(&self, found: u64) -> bool {
        found >= self.config.min_found
    }

    fn predict_salary(&self, vacancy: &HhVacancy) -> Option<f64> {
        let salary = vacancy.salary.as_ref()?;
        if salary.currency.as_deref() != Some(self.config.currency.as_str()) {
            return None;
        }
        salary::estimate(salary.from, salary.to)
    }
}
