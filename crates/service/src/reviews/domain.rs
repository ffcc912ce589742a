use serde::{Deserialize, Serialize};

use models::review::{self, NewReview};

use crate::errors::ServiceError;

pub const MISSING_FIELDS: &str = "Missing required fields";

/// Raw `POST /api/reviews` body; every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateReviewInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
}

pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl CreateReviewInput {
    /// Missing fields (a zero rating counts as missing) are reported before the
    /// rating range.
    pub fn into_new_review(self) -> Result<NewReview, ServiceError> {
        let name = required(self.name);
        let service = required(self.service);
        let text = required(self.text);
        let rating = self.rating.filter(|r| *r != 0);

        let (Some(name), Some(service), Some(text), Some(rating)) = (name, service, text, rating) else {
            return Err(ServiceError::Validation(MISSING_FIELDS.into()));
        };
        let rating = i32::try_from(rating).map_err(|_| ServiceError::Validation("Rating must be between 1 and 5".into()))?;
        review::validate_rating(rating)?;

        Ok(NewReview { name, email: required(self.email), service, rating, text })
    }
}
