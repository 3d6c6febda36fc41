use std::time::Duration;

use url::Url;

use crate::error::AppError;

/// Programming languages searched for when no terms are configured.
pub const DEFAULT_SEARCH_TERMS: [&str; 12] = [
    "Javascript",
    "Python",
    "Java",
    "TypeScript",
    "C#",
    "PHP",
    "C++",
    "Shell",
    "C",
    "Ruby",
    "Scala",
    "Golang",
];

/// Job-title words every search is narrowed to.
pub const DEFAULT_PROFESSION_KEYWORDS: [&str; 3] = ["Программист", "Разработчик", "Developer"];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What to do when a single term fails during a provider run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole provider run on the first failure.
    #[default]
    Abort,
    /// Record the failure against the term and move on to the next one.
    Isolate,
}

/// Settings for the HeadHunter vacancies API.
#[derive(Debug, Clone)]
pub struct HeadHunterConfig {
    pub base_url: String,
    /// Region filter (`area`), 1 is Moscow.
    pub area: u32,
    /// Recency window in days (`period`).
    pub period_days: u32,
    pub industry: u32,
    pub professional_role: u32,
    /// Terms with fewer reported vacancies are left out of the report.
    pub min_found: u64,
    /// Only salaries in this currency are counted.
    pub currency: String,
    pub profession_keywords: Vec<String>,
}

impl Default for HeadHunterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.hh.ru/vacancies".to_string(),
            area: 1,
            period_days: 30,
            industry: 7,
            professional_role: 96,
            min_found: 100,
            currency: "RUR".to_string(),
            profession_keywords: default_keywords(),
        }
    }
}

impl HeadHunterConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_base_url("HeadHunter", &self.base_url)?;
        if self.period_days == 0 {
            return Err(AppError::ConfigError(
                "HeadHunter period must be at least 1 day".into(),
            ));
        }
        validate_keywords("HeadHunter", &self.profession_keywords)
    }
}

/// Settings for the SuperJob vacancies API.
#[derive(Debug, Clone)]
pub struct SuperJobConfig {
    pub base_url: String,
    /// Application secret sent as `X-Api-App-Id`.
    pub api_key: Option<String>,
    /// Region filter (`town`).
    pub town: String,
    pub catalogue: u32,
    /// Vacancies per page (`count`), at most 100.
    pub page_size: u32,
    /// Recency window in days (`period`); `None` searches all time.
    pub period_days: Option<u32>,
    /// Terms with fewer reported vacancies are left out of the report.
    pub min_found: u64,
    pub currency: String,
    pub profession_keywords: Vec<String>,
}

pub const SUPERJOB_MAX_PAGE_SIZE: u32 = 100;

impl Default for SuperJobConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.superjob.ru/2.0/vacancies/".to_string(),
            api_key: None,
            town: "Moscow".to_string(),
            catalogue: 33,
            page_size: SUPERJOB_MAX_PAGE_SIZE,
            period_days: None,
            min_found: 0,
            currency: "rub".to_string(),
            profession_keywords: default_keywords(),
        }
    }
}

impl SuperJobConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_base_url("SuperJob", &self.base_url)?;
        if self.page_size == 0 || self.page_size > SUPERJOB_MAX_PAGE_SIZE {
            return Err(AppError::ConfigError(format!(
                "SuperJob page size {} is out of range 1..={SUPERJOB_MAX_PAGE_SIZE}",
                self.page_size
            )));
        }
        validate_keywords("SuperJob", &self.profession_keywords)
    }
}

/// Top-level settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub search_terms: Vec<String>,
    pub timeout: Duration,
    pub failure_policy: FailurePolicy,
    /// Region name shown in report titles.
    pub region_label: String,
    pub headhunter: HeadHunterConfig,
    pub superjob: SuperJobConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_terms: DEFAULT_SEARCH_TERMS.iter().map(|t| t.to_string()).collect(),
            timeout: DEFAULT_TIMEOUT,
            failure_policy: FailurePolicy::default(),
            region_label: "Moscow".to_string(),
            headhunter: HeadHunterConfig::default(),
            superjob: SuperJobConfig::default(),
        }
    }
}

impl Settings {
    /// Apply one keyword list to both providers.
    pub fn with_profession_keywords(mut self, keywords: Vec<String>) -> Self {
        self.headhunter.profession_keywords = keywords.clone();
        self.superjob.profession_keywords = keywords;
        self
    }

    /// Check the settings shared by every provider.
    ///
    /// Provider sections are checked by their own `validate`, only for the
    /// providers that run. The SuperJob token is checked when the SuperJob
    /// source is built.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.search_terms.is_empty() {
            return Err(AppError::ConfigError("no search terms configured".into()));
        }
        if self.search_terms.iter().any(|t| t.trim().is_empty()) {
            return Err(AppError::ConfigError("search terms must not be blank".into()));
        }
        if self.timeout.is_zero() {
            return Err(AppError::ConfigError("request timeout must be positive".into()));
        }
        Ok(())
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_keywords() -> Vec<String> {
    DEFAULT_PROFESSION_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect()
}

fn validate_base_url(provider: &str, raw: &str) -> Result<(), AppError> {
    let parsed = Url::parse(raw).map_err(|e| {
        AppError::ConfigError(format!("{provider} base URL '{raw}' is invalid: {e}"))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::ConfigError(format!(
            "{provider} base URL scheme '{scheme}' is not allowed (only http/https)"
        ))),
    }
}

fn validate_keywords(provider: &str, keywords: &[String]) -> Result<(), AppError> {
    if keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(AppError::ConfigError(format!(
            "{provider} needs at least one profession keyword"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.headhunter.validate().is_ok());
        assert!(settings.superjob.validate().is_ok());
        assert_eq!(settings.search_terms.len(), 12);
        assert_eq!(settings.search_terms[0], "Javascript");
        assert_eq!(settings.headhunter.min_found, 100);
        assert_eq!(settings.superjob.page_size, 100);
        assert_eq!(settings.superjob.min_found, 0);
        assert_eq!(settings.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_empty_terms_rejected() {
        let settings = Settings {
            search_terms: vec![],
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(AppError::ConfigError(_))));

        let settings = Settings {
            search_terms: vec!["Rust".into(), "  ".into()],
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let settings = Settings {
            timeout: Duration::ZERO,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = SuperJobConfig::default();
        config.page_size = 0;
        assert!(config.validate().is_err());
        config.page_size = 101;
        assert!(config.validate().is_err());
        config.page_size = 20;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_validation() {
        let mut config = HeadHunterConfig::default();
        config.base_url = "not a url".into();
        assert!(config.validate().is_err());
        config.base_url = "ftp://api.hh.ru/vacancies".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not allowed"));
        config.base_url = "http://127.0.0.1:8080/vacancies".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_keywords_required() {
        let settings = Settings::default().with_profession_keywords(vec![" ".into()]);
        assert!(settings.headhunter.validate().is_err());
        assert!(settings.superjob.validate().is_err());

        let settings = Settings::default().with_profession_keywords(vec!["Engineer".into()]);
        assert_eq!(settings.headhunter.profession_keywords, vec!["Engineer"]);
        assert_eq!(settings.superjob.profession_keywords, vec!["Engineer"]);
    }

    #[test]
    fn test_shared_validation_ignores_provider_sections() {
        let mut settings = Settings::default();
        settings.superjob.page_size = 500;
        settings.headhunter.base_url = "ftp://api.hh.ru/vacancies".into();

        assert!(settings.validate().is_ok());
        assert!(settings.headhunter.validate().is_err());
        assert!(settings.superjob.validate().is_err());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("Rust, Go ,,C++ "), vec!["Rust", "Go", "C++"]);
        assert!(parse_list(" , ").is_empty());
    }
}
