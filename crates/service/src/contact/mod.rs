//! Contact requests: public submission plus the admin inbox operations.

pub mod domain;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::ContactService;
