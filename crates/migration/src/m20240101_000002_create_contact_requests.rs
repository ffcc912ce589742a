//! Create `contact_requests` table.
//!
//! Callback/quote requests; `is_processed` is toggled by admins.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactRequests::Name).string_len(100).not_null())
                    .col(ColumnDef::new(ContactRequests::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(ContactRequests::Service).string_len(50).not_null())
                    .col(ColumnDef::new(ContactRequests::Message).text().null())
                    .col(
                        ColumnDef::new(ContactRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ContactRequests::IsProcessed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_contact_requests_created_at")
                    .table(ContactRequests::Table)
                    .col(ContactRequests::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ContactRequests::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ContactRequests { Table, Id, Name, Phone, Service, Message, CreatedAt, IsProcessed }
