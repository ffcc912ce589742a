use serde::{Deserialize, Serialize};

use models::contact_request::NewContactRequest;

use crate::errors::ServiceError;
use crate::reviews::domain::{required, MISSING_FIELDS};

/// Raw `POST /api/contact` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateContactInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CreateContactInput {
    pub fn into_new_request(self) -> Result<NewContactRequest, ServiceError> {
        let (Some(name), Some(phone), Some(service)) =
            (required(self.name), required(self.phone), required(self.service))
        else {
            return Err(ServiceError::Validation(MISSING_FIELDS.into()));
        };
        Ok(NewContactRequest { name, phone, service, message: required(self.message) })
    }
}
