//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{ApiRequest, SourcePage};
use crate::traits::{Fetcher, VacancySource};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that serves queued responses and records every request.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, the call fails so over-fetching shows up in tests.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockFetcher {
    pub fn empty() -> Self {
        Self::with_responses(Vec::new())
    }

    pub fn with_bodies(bodies: Vec<String>) -> Self {
        Self::with_responses(bodies.into_iter().map(Ok).collect())
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, request: &ApiRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(AppError::HttpError(format!(
                "MockFetcher: no response queued for {}",
                request.url
            )))
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockSource
// ---------------------------------------------------------------------------

/// Listing served by [`MockSource`]; its salary is the estimate itself.
#[derive(Debug, Clone, PartialEq)]
pub struct MockVacancy {
    pub salary: Option<f64>,
}

/// Build a mock page from salary estimates.
pub fn mock_page(salaries: &[Option<f64>], found: u64, last: bool) -> SourcePage<MockVacancy> {
    SourcePage {
        vacancies: salaries
            .iter()
            .map(|&salary| MockVacancy { salary })
            .collect(),
        found,
        last,
    }
}

/// Vacancy source scripted with pages per term.
///
/// Unknown terms and page indexes past the script get an empty last page.
#[derive(Clone, Default)]
pub struct MockSource {
    pages: HashMap<String, Vec<SourcePage<MockVacancy>>>,
    failing: HashSet<String>,
    min_found: u64,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, term: &str, pages: Vec<SourcePage<MockVacancy>>) -> Self {
        self.pages.insert(term.to_string(), pages);
        self
    }

    /// Every request for `term` fails with an HTTP error.
    pub fn failing_for(mut self, term: &str) -> Self {
        self.failing.insert(term.to_string());
        self
    }

    pub fn with_min_found(mut self, min_found: u64) -> Self {
        self.min_found = min_found;
        self
    }

    /// `(term, page)` for every page requested, in order.
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl VacancySource for MockSource {
    type Vacancy = MockVacancy;

    fn name(&self) -> &str {
        "Mock"
    }

    async fn fetch_page(&self, term: &str, page: u32) -> Result<SourcePage<MockVacancy>, AppError> {
        self.calls.lock().unwrap().push((term.to_string(), page));
        if self.failing.contains(term) {
            return Err(AppError::HttpError(format!("HTTP 500 for term {term}")));
        }
        Ok(self
            .pages
            .get(term)
            .and_then(|pages| pages.get(page as usize))
            .cloned()
            .unwrap_or(SourcePage {
                vacancies: Vec::new(),
                found: 0,
                last: true,
            }))
    }

    fn admits(&self, found: u64) -> bool {
        found >= self.min_found
    }

    fn predict_salary(&self, vacancy: &MockVacancy) -> Option<f64> {
        vacancy.salary
    }
}
