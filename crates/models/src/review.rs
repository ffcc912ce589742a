use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// VARCHAR widths of the `reviews` table, in characters.
pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;
pub const SERVICE_MAX: usize = 50;

pub(crate) fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub service: String,
    pub rating: i32,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A review as submitted, before the store assigns `id` and `created_at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewReview {
    pub name: String,
    pub email: Option<String>,
    pub service: String,
    pub rating: i32,
    pub text: String,
}

pub fn validate_rating(rating: i32) -> Result<(), errors::ModelError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(errors::ModelError::Validation("Rating must be between 1 and 5".into()));
    }
    Ok(())
}

impl NewReview {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        if self.name.trim().is_empty() || self.service.trim().is_empty() || self.text.trim().is_empty() {
            return Err(errors::ModelError::Validation("Missing required fields".into()));
        }
        if too_long(&self.name, NAME_MAX)
            || too_long(&self.service, SERVICE_MAX)
            || self.email.as_deref().is_some_and(|e| too_long(e, EMAIL_MAX))
        {
            return Err(errors::ModelError::Validation("Field too long".into()));
        }
        validate_rating(self.rating)
    }
}

pub async fn create(db: &DatabaseConnection, new: NewReview) -> Result<Model, errors::ModelError> {
    new.validate()?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(new.name),
        email: Set(new.email),
        service: Set(new.service),
        rating: Set(new.rating),
        text: Set(new.text),
        created_at: NotSet,
    };
    Ok(am.insert(db).await?)
}

/// All reviews, newest first; equal timestamps fall back to the higher id.
pub async fn list_newest_first(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Returns false when no row had this id.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
