use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single outbound GET request to a provider API.
///
/// `query` may repeat a key; list-valued parameters are sent that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of a query parameter, if present.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// One page of vacancies, normalised across providers.
#[derive(Debug, Clone)]
pub struct SourcePage<V> {
    pub vacancies: Vec<V>,
    /// Total the provider reports for the whole search, not for this page.
    pub found: u64,
    /// No further page should be requested after this one.
    pub last: bool,
}

/// Per-term salary statistics for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct TermStatistics {
    /// Total reported by the provider's probe query.
    pub vacancies_found: u64,
    /// Vacancies that contributed to `average_salary`.
    pub vacancies_processed: u64,
    /// Truncated mean of the estimated salaries; 0 when nothing contributed.
    pub average_salary: u64,
}

/// A term whose processing failed while failures were being isolated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TermFailure {
    pub term: String,
    pub error: String,
}

/// Ordered mapping of search term to statistics, one per provider run.
///
/// Iteration order is insertion order, which follows the configured term list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsTable {
    entries: Vec<(String, TermStatistics)>,
    failures: Vec<TermFailure>,
}

impl StatisticsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert statistics for a term. A repeated term replaces the earlier
    /// value in place.
    pub fn insert(&mut self, term: impl Into<String>, stats: TermStatistics) {
        let term = term.into();
        match self.entries.iter_mut().find(|(t, _)| *t == term) {
            Some((_, existing)) => *existing = stats,
            None => self.entries.push((term, stats)),
        }
    }

    pub fn record_failure(&mut self, term: impl Into<String>, error: impl ToString) {
        self.failures.push(TermFailure {
            term: term.into(),
            error: error.to_string(),
        });
    }

    pub fn get(&self, term: &str) -> Option<&TermStatistics> {
        self.entries
            .iter()
            .find(|(t, _)| t == term)
            .map(|(_, stats)| stats)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.get(term).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermStatistics)> {
        self.entries.iter().map(|(t, s)| (t.as_str(), s))
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn failures(&self) -> &[TermFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializes as a JSON object keyed by term, preserving insertion order.
impl Serialize for StatisticsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (term, stats) in &self.entries {
            map.serialize_entry(term, stats)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(found: u64, processed: u64, average: u64) -> TermStatistics {
        TermStatistics {
            vacancies_found: found,
            vacancies_processed: processed,
            average_salary: average,
        }
    }

    #[test]
    fn test_table_preserves_insertion_order() {
        let mut table = StatisticsTable::new();
        table.insert("Python", stats(10, 2, 100));
        table.insert("C", stats(5, 1, 50));
        table.insert("Java", stats(7, 0, 0));

        let terms: Vec<_> = table.terms().collect();
        assert_eq!(terms, vec!["Python", "C", "Java"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_table_insert_replaces_existing_term() {
        let mut table = StatisticsTable::new();
        table.insert("Python", stats(10, 2, 100));
        table.insert("Go", stats(1, 1, 1));
        table.insert("Python", stats(20, 4, 200));

        let terms: Vec<_> = table.terms().collect();
        assert_eq!(terms, vec!["Python", "Go"]);
        assert_eq!(table.get("Python"), Some(&stats(20, 4, 200)));
    }

    #[test]
    fn test_table_serializes_as_ordered_object() {
        let mut table = StatisticsTable::new();
        table.insert("Scala", stats(3, 1, 900));
        table.insert("C#", stats(0, 0, 0));

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"Scala":{"vacancies_found":3,"vacancies_processed":1,"average_salary":900},"C#":{"vacancies_found":0,"vacancies_processed":0,"average_salary":0}}"#
        );
    }

    #[test]
    fn test_api_request_builder() {
        let request = ApiRequest::get("https://api.example.com/vacancies")
            .query("page", 3)
            .query("keys", "a")
            .query("keys", "b")
            .header("X-Api-App-Id", "secret");

        assert_eq!(request.query_value("page"), Some("3"));
        assert_eq!(request.query_value("keys"), Some("a"));
        assert_eq!(request.query.len(), 3);
        assert_eq!(
            request.headers,
            vec![("X-Api-App-Id".to_string(), "secret".to_string())]
        );
        assert_eq!(request.query_value("missing"), None);
    }
}
