//! Role reference table operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::Role;
use crate::repository::Database;

impl Database {
    // ==================== Role Operations ====================

    /// Insert a new role
    pub async fn insert_role(&self, name: &str) -> Result<Role, DbError> {
        let now = Utc::now();

        if self.role_exists(name).await? {
            return Err(DbError::Duplicate(format!("Role '{}' already exists", name)));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO roles (name, created_at)
            VALUES (?, ?)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Role {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }

    /// Check whether a role name exists in the reference table
    pub async fn role_exists(&self, name: &str) -> Result<bool, DbError> {
        let result = sqlx::query("SELECT id FROM roles WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(result.is_some())
    }

    /// Check if any roles exist
    pub async fn has_roles(&self) -> Result<bool, DbError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM roles")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = result.get("count");
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn role_lifecycle() {
        let db = Database::new("sqlite::memory:").await.unwrap();

        assert!(!db.has_roles().await.unwrap());
        assert!(!db.role_exists("angel").await.unwrap());

        let role = db.insert_role("angel").await.unwrap();
        assert_eq!(role.name, "angel");

        assert!(db.has_roles().await.unwrap());
        assert!(db.role_exists("angel").await.unwrap());

        let err = db.insert_role("angel").await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate(_)));
    }
}
