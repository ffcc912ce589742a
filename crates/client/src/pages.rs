//! Page flows: call the API, fold the outcome into view state and feedback.

use chrono::Utc;
use tracing::{info, warn};

use crate::api::SiteClient;
use crate::deeplink;
use crate::error::ClientError;
use crate::forms::{ContactForm, ReviewForm};
use crate::notify::{Feedback, Notification};
use crate::view::{pending_review, ReviewsView};

pub const REVIEW_SENT: &str = "Yorumunuz başarıyla gönderildi!";
pub const REVIEW_SEND_FAILED: &str = "Yorum gönderilirken bir hata oluştu. Lütfen tekrar deneyin.";
pub const CONTACT_SENT: &str = "Talebiniz kaydedildi ve WhatsApp üzerinden yönlendiriliyorsunuz...";
pub const CONTACT_SEND_FAILED: &str = "Talep gönderilirken hata oluştu.";

/// Fetch the list; failures become an inline error instead of an empty list.
pub async fn load_reviews(client: &SiteClient, view: ReviewsView) -> ReviewsView {
    let view = view.start_loading();
    match client.fetch_reviews().await {
        Ok(reviews) => view.loaded(reviews),
        Err(e) => {
            warn!(error = %e, "reviews_load_failed");
            view.load_failed(e.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSubmission {
    pub view: ReviewsView,
    pub feedback: Feedback,
    /// The form should be reset.
    pub accepted: bool,
}

pub async fn submit_review(client: &SiteClient, view: ReviewsView, form: &ReviewForm) -> ReviewSubmission {
    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(e) => {
            return ReviewSubmission { view, feedback: Feedback::Notify(Notification::error(e.to_string())), accepted: false };
        }
    };

    match client.submit_review(&valid).await {
        Ok(created) => {
            let review = pending_review(created.review, &valid, Utc::now());
            info!(review_id = review.id, "review_submitted");
            ReviewSubmission {
                view: view.insert_pending(review),
                feedback: Feedback::Notify(Notification::success(REVIEW_SENT)),
                accepted: true,
            }
        }
        Err(ClientError::Api { message, .. }) => {
            ReviewSubmission { view, feedback: Feedback::Notify(Notification::error(message)), accepted: false }
        }
        Err(e) => {
            warn!(error = %e, "review_submit_failed");
            ReviewSubmission { view, feedback: Feedback::Notify(Notification::error(REVIEW_SEND_FAILED)), accepted: false }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub feedback: Feedback,
    /// Chat link to open once the request is stored.
    pub whatsapp_url: Option<String>,
}

/// `recipient` is the business's messaging number, normally
/// [`deeplink::BUSINESS_WHATSAPP`].
pub async fn submit_contact(client: &SiteClient, form: &ContactForm, recipient: &str) -> ContactSubmission {
    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(e) => return ContactSubmission { feedback: Feedback::Alert(e.to_string()), whatsapp_url: None },
    };

    match client.submit_contact(&valid).await {
        Ok(_) => ContactSubmission {
            feedback: Feedback::Notify(Notification::success(CONTACT_SENT)),
            whatsapp_url: Some(deeplink::whatsapp_url(recipient, &valid)),
        },
        Err(ClientError::Api { message, .. }) => ContactSubmission {
            feedback: Feedback::Notify(Notification::error(format!("Talep gönderilirken hata oluştu: {message}"))),
            whatsapp_url: None,
        },
        Err(e) => {
            warn!(error = %e, "contact_submit_failed");
            ContactSubmission { feedback: Feedback::Notify(Notification::error(CONTACT_SEND_FAILED)), whatsapp_url: None }
        }
    }
}
