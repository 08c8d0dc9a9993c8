//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::AppError;
use domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub role: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity. A row with an unknown role is corrupt.
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role = model.role.parse().map_err(|_| {
            AppError::internal(format!("user {} has unknown role '{}'", model.id, model.role))
        })?;

        Ok(User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            surname: model.surname,
            role,
            created_at: model.created_at,
        })
    }
}
