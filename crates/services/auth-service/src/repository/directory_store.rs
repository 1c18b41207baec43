//! Identity directory backed by SeaORM (SQLite or Postgres).

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr};

use super::entities::app::{self, Entity as AppEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::directory::{AppProvider, UserProvider, UserSaver};
use common::{StorageError, StorageResult};
use domain::{new_user_id, App, User};

/// Concrete directory over a SeaORM connection.
#[derive(Clone)]
pub struct DirectoryStore {
    db: DatabaseConnection,
}

impl DirectoryStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a client application. Provisioning only; the auth flow
    /// never writes apps.
    pub async fn insert_app(&self, app: &App) -> StorageResult<()> {
        let model = app::ActiveModel {
            id: Set(app.id.clone()),
            name: Set(app.name.clone()),
            secret: Set(app.secret.clone()),
        };

        AppEntity::insert(model)
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    /// Set the admin flag of an existing user.
    pub async fn set_admin(&self, user_id: &str, is_admin: bool) -> StorageResult<()> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::IsAdmin, Expr::value(is_admin))
            .filter(user::Column::Id.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StorageError::UserNotFound);
        }
        Ok(())
    }
}

/// Map a failed user insert, recognising the email uniqueness violation.
fn map_insert_error(err: DbErr) -> StorageError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StorageError::UserExists,
        _ => StorageError::Database(err),
    }
}

#[async_trait]
impl UserSaver for DirectoryStore {
    async fn save_user(&self, email: &str, pass_hash: &str) -> StorageResult<String> {
        let id = new_user_id();
        let model = user::ActiveModel {
            id: Set(id.clone()),
            email: Set(email.to_string()),
            pass_hash: Set(pass_hash.to_string()),
            is_admin: Set(false),
        };

        UserEntity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_insert_error)?;

        Ok(id)
    }
}

#[async_trait]
impl UserProvider for DirectoryStore {
    async fn user(&self, email: &str) -> StorageResult<User> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or(StorageError::UserNotFound)
    }

    async fn is_admin(&self, user_id: &str) -> StorageResult<bool> {
        UserEntity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await?
            .map(|model| model.is_admin)
            .ok_or(StorageError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for DirectoryStore {
    async fn app(&self, app_id: &str) -> StorageResult<App> {
        AppEntity::find_by_id(app_id.to_string())
            .one(&self.db)
            .await?
            .map(App::from)
            .ok_or(StorageError::AppNotFound)
    }
}
