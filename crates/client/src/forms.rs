use serde::Serialize;
use thiserror::Error;

use common::catalog;

pub const REVIEW_INCOMPLETE: &str = "Lütfen tüm alanları doldurun ve bir puan verin.";
pub const CONTACT_INCOMPLETE: &str = "Lütfen ad, telefon ve hizmet alanlarını doldurun.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Lütfen tüm alanları doldurun ve bir puan verin.")]
    ReviewIncomplete,
    #[error("Lütfen ad, telefon ve hizmet alanlarını doldurun.")]
    ContactIncomplete,
}

fn trimmed(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// Raw review form fields as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewForm {
    pub name: String,
    pub email: String,
    pub service: String,
    pub text: String,
    /// Selected stars; `None` until the visitor picks one.
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidReview {
    pub name: String,
    pub email: Option<String>,
    pub service: String,
    pub rating: i32,
    pub text: String,
}

impl ReviewForm {
    pub fn validate(&self) -> Result<ValidReview, FormError> {
        let rating = self.rating.filter(|r| (1..=5).contains(r));
        match (trimmed(&self.name), trimmed(&self.service), trimmed(&self.text), rating) {
            (Some(name), Some(service), Some(text), Some(rating)) => {
                Ok(ValidReview { name, email: trimmed(&self.email), service, rating, text })
            }
            _ => Err(FormError::ReviewIncomplete),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidContact {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub message: Option<String>,
}

impl ValidContact {
    pub fn service_name(&self) -> &str {
        catalog::display_name(&self.service)
    }
}

impl ContactForm {
    pub fn validate(&self) -> Result<ValidContact, FormError> {
        match (trimmed(&self.name), trimmed(&self.phone), trimmed(&self.service)) {
            (Some(name), Some(phone), Some(service)) => {
                Ok(ValidContact { name, phone, service, message: trimmed(&self.message) })
            }
            _ => Err(FormError::ContactIncomplete),
        }
    }
}
