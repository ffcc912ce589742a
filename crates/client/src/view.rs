//! Review list view state.
//!
//! Transitions take the state by value and return the next one; [`ReviewsView::render`]
//! is pure.

use chrono::{DateTime, Utc};

use crate::api::{EchoedReview, Review};
use crate::card::ReviewCard;
use crate::forms::ValidReview;

pub const VISIBLE_BY_DEFAULT: usize = 3;
pub const SHOW_MORE: &str = "Daha Fazla Yorum Göster";
pub const SHOW_LESS: &str = "Daha Az Göster";
pub const EMPTY_MESSAGE: &str = "Henüz yorum bulunmuyor. İlk yorumu siz yapın!";
pub const LOADING_MESSAGE: &str = "Yorumlar yükleniyor...";
pub const LOAD_FAILED_MESSAGE: &str = "Yorumlar yüklenirken bir hata oluştu.";

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewEntry {
    /// Returned by a fetch.
    Confirmed(Review),
    /// Inserted locally after a successful submission.
    Pending(Review),
}

impl ReviewEntry {
    pub fn review(&self) -> &Review {
        match self {
            ReviewEntry::Confirmed(r) | ReviewEntry::Pending(r) => r,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ReviewEntry::Pending(_))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Vec<ReviewEntry>),
    LoadFailed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewsView {
    pub load: LoadState,
    pub rating_filter: Option<i32>,
    pub service_filter: Option<String>,
    pub expanded: bool,
}

/// What the review section shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Idle,
    Loading { message: &'static str },
    Failed { message: &'static str, detail: String },
    Empty { message: &'static str },
    Reviews {
        cards: Vec<ReviewCard>,
        /// Label for the reveal/collapse button; `None` hides it.
        toggle: Option<&'static str>,
    },
}

impl ReviewsView {
    pub fn new() -> Self { Self::default() }

    pub fn start_loading(self) -> Self {
        Self { load: LoadState::Loading, ..self }
    }

    /// A successful fetch replaces every entry, pending ones included.
    pub fn loaded(self, reviews: Vec<Review>) -> Self {
        let entries = reviews.into_iter().map(ReviewEntry::Confirmed).collect();
        Self { load: LoadState::Loaded(entries), ..self }
    }

    pub fn load_failed(self, detail: impl Into<String>) -> Self {
        Self { load: LoadState::LoadFailed(detail.into()), ..self }
    }

    pub fn with_rating_filter(self, rating: Option<i32>) -> Self {
        Self { rating_filter: rating, expanded: false, ..self }
    }

    pub fn with_service_filter(self, service: Option<String>) -> Self {
        let service = service.filter(|s| !s.is_empty());
        Self { service_filter: service, expanded: false, ..self }
    }

    pub fn toggle_expanded(self) -> Self {
        Self { expanded: !self.expanded, ..self }
    }

    /// Put a just-submitted review at the front of the list.
    pub fn insert_pending(self, review: Review) -> Self {
        let mut entries = match self.load {
            LoadState::Loaded(entries) => entries,
            _ => Vec::new(),
        };
        entries.insert(0, ReviewEntry::Pending(review));
        Self { load: LoadState::Loaded(entries), ..self }
    }

    pub fn entries(&self) -> &[ReviewEntry] {
        match &self.load {
            LoadState::Loaded(entries) => entries,
            _ => &[],
        }
    }

    pub fn pending_count(&self) -> usize {
        self.entries().iter().filter(|e| e.is_pending()).count()
    }

    /// Newest first (stable), then rating and service filters.
    pub fn matching(&self) -> Vec<&ReviewEntry> {
        let mut sorted: Vec<&ReviewEntry> = self.entries().iter().collect();
        sorted.sort_by(|a, b| b.review().created_at.cmp(&a.review().created_at));
        sorted
            .into_iter()
            .filter(|e| self.rating_filter.map_or(true, |r| e.review().rating == r))
            .filter(|e| self.service_filter.as_deref().map_or(true, |s| e.review().service == s))
            .collect()
    }

    pub fn render(&self) -> Rendered {
        match &self.load {
            LoadState::NotLoaded => Rendered::Idle,
            LoadState::Loading => Rendered::Loading { message: LOADING_MESSAGE },
            LoadState::LoadFailed(detail) => Rendered::Failed { message: LOAD_FAILED_MESSAGE, detail: detail.clone() },
            LoadState::Loaded(entries) if entries.is_empty() => Rendered::Empty { message: EMPTY_MESSAGE },
            LoadState::Loaded(_) => {
                let matching = self.matching();
                let toggle = (matching.len() > VISIBLE_BY_DEFAULT).then_some(if self.expanded { SHOW_LESS } else { SHOW_MORE });
                let visible = if self.expanded { matching.len() } else { VISIBLE_BY_DEFAULT };
                let cards = matching
                    .into_iter()
                    .take(visible)
                    .map(|e| ReviewCard::from_review(e.review(), e.is_pending()))
                    .collect();
                Rendered::Reviews { cards, toggle }
            }
        }
    }
}

/// Build the optimistic entry: echoed fields win, the submitted form fills the gaps.
pub fn pending_review(echo: Option<EchoedReview>, submitted: &ValidReview, now: DateTime<Utc>) -> Review {
    let echo = echo.unwrap_or_default();
    Review {
        id: echo.id.unwrap_or_else(|| now.timestamp_millis()),
        name: echo.name.unwrap_or_else(|| submitted.name.clone()),
        email: echo.email.or_else(|| submitted.email.clone()),
        service: echo.service.unwrap_or_else(|| submitted.service.clone()),
        rating: echo.rating.unwrap_or(submitted.rating),
        text: echo.text.unwrap_or_else(|| submitted.text.clone()),
        created_at: echo.created_at.unwrap_or_else(|| now.fixed_offset()),
    }
}
