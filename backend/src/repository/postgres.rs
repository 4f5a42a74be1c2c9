//! PostgreSQL repository storing each entity as a JSONB document
//!
//! The `records` table is partitioned by `kind`. Unique indexes in the
//! migration back up the uniqueness rules the services check.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use super::{display_kind, Entity, Repository};
use crate::error::{AppError, AppResult};

pub struct PgRepository<T> {
    db: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> PgRepository<T> {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    fn not_found(id: i64) -> AppError {
        AppError::NotFound(format!("{} {}", display_kind(T::KIND), id))
    }
}

/// Unique-index hits become duplicates, other server messages surface as-is
fn map_write_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            let what = match db_err.constraint() {
                Some("uq_packing_type_code") | Some("uq_waste_master_code") => "code",
                Some("uq_waste_lot_no") => "lot number",
                Some("uq_waste_rate_master_date") => "waste master and rate date",
                _ => "key",
            };
            AppError::DuplicateEntry(what.to_string())
        }
        sqlx::Error::Database(db_err) => AppError::Repository(db_err.message().to_string()),
        _ => AppError::DatabaseError(err),
    }
}

fn with_id<T: Entity>((id, Json(mut entity)): (i64, Json<T>)) -> T {
    entity.set_id(id);
    entity
}

#[async_trait]
impl<T: Entity> Repository<T> for PgRepository<T> {
    async fn get_all(&self) -> AppResult<Vec<T>> {
        let rows = sqlx::query_as::<_, (i64, Json<T>)>(
            "SELECT id, body FROM records WHERE kind = $1 ORDER BY id",
        )
        .bind(T::KIND)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(with_id).collect())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<T>> {
        let row = sqlx::query_as::<_, (i64, Json<T>)>(
            "SELECT id, body FROM records WHERE kind = $1 AND id = $2",
        )
        .bind(T::KIND)
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(with_id))
    }

    async fn create(&self, mut entity: T) -> AppResult<T> {
        let id: i64 = sqlx::query_scalar("SELECT nextval('records_id_seq')")
            .fetch_one(&self.db)
            .await?;
        entity.set_id(id);

        sqlx::query("INSERT INTO records (id, kind, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(T::KIND)
            .bind(Json(&entity))
            .execute(&self.db)
            .await
            .map_err(map_write_error)?;

        Ok(entity)
    }

    async fn update(&self, id: i64, mut entity: T) -> AppResult<T> {
        entity.set_id(id);

        let result = sqlx::query(
            r#"
            UPDATE records
            SET body = $3, updated_at = NOW()
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(T::KIND)
        .bind(id)
        .bind(Json(&entity))
        .execute(&self.db)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM records WHERE kind = $1 AND id = $2")
            .bind(T::KIND)
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}
