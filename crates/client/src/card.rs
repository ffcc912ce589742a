use chrono::{DateTime, Datelike, FixedOffset};

use common::catalog;

use crate::api::Review;

const MONTHS_TR: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran",
    "Temmuz", "Ağustos", "Eylül", "Ekim", "Kasım", "Aralık",
];

/// Long Turkish date, e.g. `18 Ekim 2026`, in the timestamp's own offset.
pub fn turkish_long_date(at: &DateTime<FixedOffset>) -> String {
    format!("{} {} {}", at.day(), MONTHS_TR[at.month0() as usize], at.year())
}

/// Filled/empty state for each of the five stars.
pub fn star_states(rating: i32) -> [bool; 5] {
    std::array::from_fn(|i| (i as i32) < rating)
}

/// Everything a review card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCard {
    pub id: i64,
    pub name: String,
    pub stars: [bool; 5],
    pub service: String,
    pub text: String,
    pub date: String,
    /// Submitted by this visitor and not yet seen in a fetch.
    pub pending: bool,
}

impl ReviewCard {
    pub fn from_review(review: &Review, pending: bool) -> Self {
        Self {
            id: review.id,
            name: review.name.clone(),
            stars: star_states(review.rating),
            service: catalog::display_name(&review.service).to_string(),
            text: review.text.clone(),
            date: turkish_long_date(&review.created_at),
            pending,
        }
    }
}
