//! Service layer for reviews, contact requests and the admin gate.
//! - Validates raw submissions into model inputs.
//! - Talks to storage only through repository traits (SeaORM or in-memory).
//! - Maps model/storage failures onto [`errors::ServiceError`].

pub mod errors;
pub mod bootstrap;
pub mod reviews;
pub mod contact;
pub mod admin;
#[cfg(test)]
pub mod test_support;
