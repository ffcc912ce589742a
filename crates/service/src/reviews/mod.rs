//! Reviews: submission input, repository abstraction and the review service.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::ReviewService;
