//! In-memory repository, used when no database is configured and in tests

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{display_kind, Entity, Repository};
use crate::error::{AppError, AppResult};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

pub struct MemoryRepository<T> {
    table: RwLock<Table<T>>,
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Start with existing records, keeping their ids
    pub fn with_records(records: Vec<T>) -> Self {
        let rows: BTreeMap<i64, T> = records.into_iter().map(|r| (r.id(), r)).collect();
        let next_id = rows.keys().next_back().copied().unwrap_or(0) + 1;
        Self {
            table: RwLock::new(Table { rows, next_id }),
        }
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn get_all(&self) -> AppResult<Vec<T>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<T>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, mut entity: T) -> AppResult<T> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        entity.set_id(id);
        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: i64, mut entity: T) -> AppResult<T> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("{} {}", display_kind(T::KIND), id)))?;

        entity.set_id(id);
        *row = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("{} {}", display_kind(T::KIND), id)))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::PackingType;

    fn packing_type(id: i64, code: i64) -> PackingType {
        PackingType {
            id,
            code,
            name: format!("TYPE {}", code),
            tare_weight: Decimal::ONE,
            rate: Decimal::TEN,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = MemoryRepository::new();
        let first = repo.create(packing_type(0, 1)).await.unwrap();
        let second = repo.create(packing_type(0, 2)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seeded_ids_are_kept() {
        let repo = MemoryRepository::with_records(vec![packing_type(3, 3)]);
        assert_eq!(repo.get_by_id(3).await.unwrap().unwrap().code, 3);

        let next = repo.create(packing_type(0, 4)).await.unwrap();
        assert_eq!(next.id, 4);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_record() {
        let repo: MemoryRepository<PackingType> = MemoryRepository::new();

        assert!(matches!(
            repo.update(9, packing_type(9, 9)).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(repo.delete(9).await, Err(AppError::NotFound(_))));
        assert!(repo.ping().await.is_ok());
    }
}
