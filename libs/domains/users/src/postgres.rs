use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, SqlErr,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User, UserChanges},
    repository::UserRepository,
};

/// SeaORM-backed store. Uniqueness is enforced by the unique index on
/// `users.email`; violations come back as [`UserError::DuplicateEmail`].
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", e))
}

fn is_unique_violation(e: &DbErr) -> bool {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
        return true;
    }
    // Errors that reach us wrapped (e.g. from a mock or a custom layer)
    // only keep the driver message.
    let message = e.to_string();
    message.contains("duplicate key") || message.contains("unique constraint")
}

fn write_error(e: DbErr, email: &str) -> UserError {
    if is_unique_violation(&e) {
        tracing::info!(email = %email, "Rejected duplicate email at the store");
        UserError::DuplicateEmail(email.to_string())
    } else {
        db_error(e)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> UserResult<User> {
        let email = user.email.clone();
        let active_model: entity::ActiveModel = user.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &email))?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> UserResult<User> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| UserError::not_found_id(id))?;

        let email = changes.email.clone().unwrap_or_else(|| model.email.clone());
        let mut active_model = model.into_active_model();

        if let Some(new_email) = changes.email {
            active_model.email = Set(new_email);
        }
        if let Some(name) = changes.name {
            active_model.name = Set(name);
        }
        if let Some(age) = changes.age {
            active_model.age = Set(age);
        }
        active_model.updated_at = Set(Utc::now().fixed_offset());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => UserError::not_found_id(id),
                other => write_error(other, &email),
            })?;

        tracing::info!(user_id = id, "Updated user");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(deleted)
    }

    async fn exists(&self, id: i32) -> UserResult<bool> {
        Ok(self.get_by_id(id).await?.is_some())
    }
}
