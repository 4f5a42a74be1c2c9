//! Persistence gateway
//!
//! Services talk to storage only through [`Repository`]. Each call is a single
//! atomic operation; nothing here retries or batches.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use shared::models::{
    Invoice, PackingType, SalesOrder, WasteLot, WasteMaster, WastePacking, WasteRate,
};
use sqlx::PgPool;

use crate::error::AppResult;

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// A record the gateway can store
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Storage partition and the name used in error messages
    const KIND: &'static str;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);
}

/// CRUD over one kind of record
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<T>>;

    async fn get_by_id(&self, id: i64) -> AppResult<Option<T>>;

    /// Store a new record; the gateway assigns its id
    async fn create(&self, entity: T) -> AppResult<T>;

    /// Replace the stored record with this id
    async fn update(&self, id: i64, entity: T) -> AppResult<T>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Cheap connectivity check
    async fn ping(&self) -> AppResult<()>;
}

macro_rules! impl_entity {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl Entity for $ty {
                const KIND: &'static str = $kind;

                fn id(&self) -> i64 {
                    self.id
                }

                fn set_id(&mut self, id: i64) {
                    self.id = id;
                }
            }
        )*
    };
}

impl_entity! {
    PackingType => "packing_type",
    WasteMaster => "waste_master",
    WasteLot => "waste_lot",
    WasteRate => "waste_rate",
    WastePacking => "waste_packing",
    SalesOrder => "sales_order",
    Invoice => "invoice",
}

/// One repository per record kind
#[derive(Clone)]
pub struct Store {
    pub packing_types: Arc<dyn Repository<PackingType>>,
    pub waste_masters: Arc<dyn Repository<WasteMaster>>,
    pub waste_lots: Arc<dyn Repository<WasteLot>>,
    pub waste_rates: Arc<dyn Repository<WasteRate>>,
    pub packings: Arc<dyn Repository<WastePacking>>,
    pub sales_orders: Arc<dyn Repository<SalesOrder>>,
    pub invoices: Arc<dyn Repository<Invoice>>,
    /// Name of the backing store, reported by the health check
    pub backend: &'static str,
}

impl Store {
    /// Process-local store; contents are lost on restart
    pub fn in_memory() -> Self {
        Self {
            packing_types: Arc::new(MemoryRepository::new()),
            waste_masters: Arc::new(MemoryRepository::new()),
            waste_lots: Arc::new(MemoryRepository::new()),
            waste_rates: Arc::new(MemoryRepository::new()),
            packings: Arc::new(MemoryRepository::new()),
            sales_orders: Arc::new(MemoryRepository::new()),
            invoices: Arc::new(MemoryRepository::new()),
            backend: "memory",
        }
    }

    /// PostgreSQL document store
    pub fn postgres(db: PgPool) -> Self {
        Self {
            packing_types: Arc::new(PgRepository::new(db.clone())),
            waste_masters: Arc::new(PgRepository::new(db.clone())),
            waste_lots: Arc::new(PgRepository::new(db.clone())),
            waste_rates: Arc::new(PgRepository::new(db.clone())),
            packings: Arc::new(PgRepository::new(db.clone())),
            sales_orders: Arc::new(PgRepository::new(db.clone())),
            invoices: Arc::new(PgRepository::new(db)),
            backend: "postgres",
        }
    }
}

impl Store {
    /// Succeeds while the backing store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.packing_types.ping().await
    }
}

/// Fetch a record or fail with `NotFound`
pub async fn require<T: Entity>(repo: &dyn Repository<T>, id: i64) -> AppResult<T> {
    repo.get_by_id(id)
        .await?
        .ok_or_else(|| crate::error::AppError::NotFound(format!("{} {}", display_kind(T::KIND), id)))
}

/// "waste_master" -> "Waste master"
pub fn display_kind(kind: &str) -> String {
    let spaced = kind.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
