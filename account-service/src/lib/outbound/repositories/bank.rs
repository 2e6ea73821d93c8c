use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::bank::errors::BankError;
use crate::domain::bank::models::Bank;
use crate::domain::bank::models::BankId;
use crate::domain::bank::ports::BankRepository;
use crate::domain::values::DisplayName;
use crate::domain::values::EmailAddress;

pub struct PostgresBankRepository {
    pool: PgPool,
}

impl PostgresBankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_bank(row: &PgRow) -> Result<Bank, BankError> {
        Ok(Bank {
            id: BankId(row.try_get("id").map_err(db_error)?),
            name: DisplayName::new(row.try_get("name").map_err(db_error)?)?,
            email: EmailAddress::new(row.try_get("email").map_err(db_error)?)?,
            password_hash: row.try_get("password_hash").map_err(db_error)?,
            created_at: row.try_get("created_at").map_err(db_error)?,
        })
    }
}

fn db_error(e: sqlx::Error) -> BankError {
    BankError::DatabaseError(e.to_string())
}

fn map_unique_violation(e: sqlx::Error, email: &str) -> BankError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("banks_email_key") {
            return BankError::EmailAlreadyExists(email.to_string());
        }
    }
    BankError::DatabaseError(e.to_string())
}

#[async_trait]
impl BankRepository for PostgresBankRepository {
    async fn create(&self, bank: Bank) -> Result<Bank, BankError> {
        sqlx::query(
            r#"
            INSERT INTO banks (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(bank.id.0)
        .bind(bank.name.as_str())
        .bind(bank.email.as_str())
        .bind(&bank.password_hash)
        .bind(bank.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, bank.email.as_str()))?;

        Ok(bank)
    }

    async fn find_by_id(&self, id: &BankId) -> Result<Option<Bank>, BankError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM banks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_bank).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Bank>, BankError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM banks
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_bank).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Bank>, BankError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM banks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(Self::row_to_bank).collect()
    }

    async fn update(&self, bank: Bank) -> Result<Bank, BankError> {
        let result = sqlx::query(
            r#"
            UPDATE banks
            SET name = $2, email = $3
            WHERE id = $1
            "#,
        )
        .bind(bank.id.0)
        .bind(bank.name.as_str())
        .bind(bank.email.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, bank.email.as_str()))?;

        if result.rows_affected() == 0 {
            return Err(BankError::NotFound(bank.id.to_string()));
        }

        Ok(bank)
    }

    async fn update_password(&self, id: &BankId, password_hash: &str) -> Result<(), BankError> {
        let result = sqlx::query(
            r#"
            UPDATE banks
            SET password_hash = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(BankError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &BankId) -> Result<(), BankError> {
        let result = sqlx::query(
            r#"
            DELETE FROM banks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(BankError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
