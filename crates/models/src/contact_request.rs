use sea_orm::{entity::prelude::*, sea_query::Expr, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::review::{too_long, NAME_MAX, SERVICE_MAX};

pub const PHONE_MAX: usize = 20;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub service: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub is_processed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewContactRequest {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub message: Option<String>,
}

impl NewContactRequest {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        if self.name.trim().is_empty() || self.phone.trim().is_empty() || self.service.trim().is_empty() {
            return Err(errors::ModelError::Validation("Missing required fields".into()));
        }
        if too_long(&self.name, NAME_MAX) || too_long(&self.phone, PHONE_MAX) || too_long(&self.service, SERVICE_MAX) {
            return Err(errors::ModelError::Validation("Field too long".into()));
        }
        Ok(())
    }
}

/// Admin listing shape: `is_processed` is reported as 1/0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListedContactRequest {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub message: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub is_processed: u8,
}

impl From<Model> for ListedContactRequest {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            phone: m.phone,
            service: m.service,
            message: m.message,
            created_at: m.created_at,
            is_processed: u8::from(m.is_processed),
        }
    }
}

pub async fn create(db: &DatabaseConnection, new: NewContactRequest) -> Result<Model, errors::ModelError> {
    new.validate()?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(new.name),
        phone: Set(new.phone),
        service: Set(new.service),
        message: Set(new.message),
        created_at: NotSet,
        is_processed: NotSet,
    };
    Ok(am.insert(db).await?)
}

pub async fn list_newest_first(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Returns the updated row, or `None` when the id is unknown. One
/// `UPDATE .. RETURNING` statement, so a concurrent delete yields `None`.
pub async fn set_processed<C: ConnectionTrait>(db: &C, id: i32, processed: bool) -> Result<Option<Model>, errors::ModelError> {
    let mut rows = Entity::update_many()
        .col_expr(Column::IsProcessed, Expr::value(processed))
        .filter(Column::Id.eq(id))
        .exec_with_returning(db)
        .await?;
    Ok(rows.pop())
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
