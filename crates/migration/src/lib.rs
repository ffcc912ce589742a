//! Migrator registering the site's tables.
//! Every table is created with `IF NOT EXISTS`, so running against a database
//! that already holds them is a no-op.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_reviews;
mod m20240101_000002_create_contact_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_reviews::Migration),
            Box::new(m20240101_000002_create_contact_requests::Migration),
        ]
    }
}
