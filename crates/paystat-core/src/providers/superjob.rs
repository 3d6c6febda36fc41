use serde::Deserialize;

use crate::config::SuperJobConfig;
use crate::error::AppError;
use crate::models::{ApiRequest, SourcePage};
use crate::salary;
use crate::traits::{Fetcher, VacancySource};

const APP_ID_HEADER: &str = "X-Api-App-Id";
/// Keyword match scope: search in the vacancy title.
const KEYWORD_SCOPE_TITLE: u32 = 10;

/// SuperJob (api.superjob.ru) vacancy search.
///
/// Every response says whether more pages follow; pagination stops on the
/// first page where it does not.
#[derive(Clone)]
pub struct SuperJob<F: Fetcher> {
    fetcher: F,
    config: SuperJobConfig,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SjPage {
    objects: Vec<SjVacancy>,
    total: u64,
    more: bool,
}

/// A SuperJob listing, reduced to the fields used for statistics.
///
/// SuperJob reports an unspecified salary bound as `0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SjVacancy {
    #[serde(default)]
    pub payment_from: Option<f64>,
    #[serde(default)]
    pub payment_to: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl<F: Fetcher> SuperJob<F> {
    /// Fails with [`AppError::MissingCredential`] if no API key is configured.
    pub fn new(fetcher: F, config: SuperJobConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AppError::MissingCredential(
                    "SuperJob API key not set (API_KEY_SUPERJOB or --sj-token)".into(),
                )
            })?
            .to_string();

        Ok(Self {
            fetcher,
            config,
            api_key,
        })
    }

    pub fn page_request(&self, term: &str, page: u32) -> ApiRequest {
        let mut request = ApiRequest::get(&self.config.base_url)
            .header(APP_ID_HEADER, self.api_key.as_str())
            .query("town", &self.config.town)
            .query("catalogues", self.config.catalogue)
            .query("count", self.config.page_size)
            .query("page", page);

        if let Some(days) = self.config.period_days {
            request = request.query("period", days);
        }

        request = request
            .query("keywords[0][srws]", KEYWORD_SCOPE_TITLE)
            .query("keywords[0][skws]", "or");
        for keyword in self
            .config
            .profession_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
        {
            request = request.query("keywords[0][keys]", keyword);
        }

        request
            .query("keywords[1][srws]", KEYWORD_SCOPE_TITLE)
            .query("keywords[1][skws]", "particular")
            .query("keywords[1][keys]", term)
    }
}

impl<F: Fetcher> VacancySource for SuperJob<F> {
    type Vacancy = SjVacancy;

    fn name(&self) -> &str {
        "SuperJob"
    }

    async fn fetch_page(&self, term: &str, page: u32) -> Result<SourcePage<SjVacancy>, AppError> {
        let body = self.fetcher.fetch(&self.page_request(term, page)).await?;
        let parsed: SjPage = serde_json::from_str(&body).map_err(|e| {
            AppError::MalformedResponse(format!("SuperJob page {page} for '{term}': {e}"))
        })?;

        Ok(SourcePage {
            vacancies: parsed.objects,
            found: parsed.total,
            last: !parsed.more,
        })
    }

    fn admits(&self, found: u64) -> bool {
        found >= self.config.min_found
    }

    fn predict_salary(&self, vacancy: &SjVacancy) -> Option<f64> {
        if vacancy.currency.as_deref() != Some(self.config.currency.as_str()) {
            return None;
        }
        salary::estimate(vacancy.payment_from, vacancy.payment_to)
    }
}
