//! Client-side service search over the static catalog.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::catalog::{ServiceInfo, SERVICES};

pub const MIN_QUERY_CHARS: usize = 2;
pub const LIVE_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query too short; the result panel is closed.
    Hidden,
    NoResults { query: String },
    Results { query: String, services: Vec<&'static ServiceInfo> },
}

impl SearchOutcome {
    /// Panel heading, e.g. `"ofis" için 1 sonuç bulundu:`.
    pub fn summary(&self) -> Option<String> {
        match self {
            SearchOutcome::Hidden => None,
            SearchOutcome::NoResults { query } => Some(format!("\"{query}\" için sonuç bulunamadı.")),
            SearchOutcome::Results { query, services } => {
                Some(format!("\"{query}\" için {} sonuç bulundu:", services.len()))
            }
        }
    }
}

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn matches(service: &ServiceInfo, query: &str) -> bool {
    service.name.to_lowercase().contains(query)
        || service.description.to_lowercase().contains(query)
        || service.keywords.iter().any(|k| k.to_lowercase().contains(query))
}

/// Case-insensitive substring search over name, description and keywords.
pub fn search(raw: &str) -> SearchOutcome {
    let query = normalize(raw);
    if query.chars().count() < MIN_QUERY_CHARS {
        return SearchOutcome::Hidden;
    }
    let services: Vec<&'static ServiceInfo> = SERVICES.iter().filter(|s| matches(s, &query)).collect();
    if services.is_empty() {
        SearchOutcome::NoResults { query }
    } else {
        SearchOutcome::Results { query, services }
    }
}

/// The as-you-type path only runs for queries longer than two characters.
pub fn live_should_fire(raw: &str) -> bool {
    normalize(raw).chars().count() > MIN_QUERY_CHARS
}

/// Enter runs the search from two characters.
pub fn eager_should_fire(raw: &str) -> bool {
    normalize(raw).chars().count() >= MIN_QUERY_CHARS
}

/// Trailing-edge debounce: only the last call within `delay` gets its value back.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, generation: Arc::new(AtomicU64::new(0)) }
    }

    /// Waits out the delay; `None` when a newer call superseded this one.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.generation.load(Ordering::SeqCst) == mine).then_some(value)
    }

    /// Drop whatever call is currently waiting.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Search box behaviour: debounced live results plus the immediate Enter path.
#[derive(Debug, Clone)]
pub struct SearchBox {
    debouncer: Debouncer,
}

impl Default for SearchBox {
    fn default() -> Self { Self::new(LIVE_DEBOUNCE) }
}

impl SearchBox {
    pub fn new(delay: Duration) -> Self {
        Self { debouncer: Debouncer::new(delay) }
    }

    /// Called on every keystroke. Short queries hide the panel at once;
    /// `None` means a later keystroke took over.
    pub async fn on_input(&self, raw: &str) -> Option<SearchOutcome> {
        if !live_should_fire(raw) {
            self.debouncer.cancel();
            return Some(SearchOutcome::Hidden);
        }
        let query = self.debouncer.settle(raw.to_string()).await?;
        Some(search(&query))
    }

    pub fn on_enter(&self, raw: &str) -> SearchOutcome {
        if eager_should_fire(raw) { search(raw) } else { SearchOutcome::Hidden }
    }
}
