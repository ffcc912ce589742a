//! SeaORM entities for the site's two tables plus connection helpers.

pub mod errors;
pub mod db;
pub mod review;
pub mod contact_request;

#[cfg(test)]
mod tests;
