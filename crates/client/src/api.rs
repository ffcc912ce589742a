use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use common::types::ErrorBody;

use crate::error::ClientError;
use crate::forms::{ValidContact, ValidReview};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub service: String,
    pub rating: i32,
    pub text: String,
    pub created_at: DateTime<FixedOffset>,
}

/// The review as echoed in a create response; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EchoedReview {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub rating: Option<i32>,
    pub text: Option<String>,
    pub created_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewCreated {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub review: Option<EchoedReview>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactCreated {
    #[serde(default)]
    pub message: Option<String>,
}

/// HTTP client for the public API.
#[derive(Clone)]
pub struct SiteClient {
    base_url: String,
    http: reqwest::Client,
}

impl SiteClient {
    /// `base_url` is the site origin, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self::with_http(base_url, http))
    }

    pub fn with_http(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn fetch_reviews(&self) -> Result<Vec<Review>, ClientError> {
        let res = self.http.get(self.url("/reviews")).send().await?;
        let res = check(res).await?;
        let reviews: Vec<Review> = res
            .json()
            .await
            .map_err(|e| ClientError::UnexpectedResponse(e.to_string()))?;
        debug!(count = reviews.len(), "reviews_fetched");
        Ok(reviews)
    }

    pub async fn submit_review(&self, review: &ValidReview) -> Result<ReviewCreated, ClientError> {
        let res = self.http.post(self.url("/reviews")).json(review).send().await?;
        let res = check(res).await?;
        // a body we cannot read still means the review was stored
        Ok(res.json().await.unwrap_or_default())
    }

    pub async fn submit_contact(&self, contact: &ValidContact) -> Result<ContactCreated, ClientError> {
        let res = self.http.post(self.url("/contact")).json(contact).send().await?;
        let res = check(res).await?;
        Ok(res.json().await.unwrap_or(ContactCreated { message: None }))
    }
}

async fn check(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let message = match res.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => fallback_message(status),
    };
    warn!(status = status.as_u16(), %message, "api_request_failed");
    Err(ClientError::Api { status: status.as_u16(), message })
}

fn fallback_message(status: StatusCode) -> String {
    format!("HTTP error! status: {}", status.as_u16())
}
