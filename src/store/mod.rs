//! Persistence boundary
//!
//! The core consumes storage through [`MarketStore`]; the backing technology
//! is an implementation detail. [`PgStore`] is the production store,
//! [`MemStore`] backs tests and database-less runs.

pub mod memory;
pub mod pg;

pub use memory::MemStore;
pub use pg::PgStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Order, Pincode, Product, Seller};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A stored value failed to map back into the domain model.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Operations the marketplace requires from its backing store.
#[async_trait]
pub trait MarketStore: Send + Sync {
    async fn save_seller(&self, seller: &Seller) -> Result<(), StoreError>;

    /// All sellers, newest first.
    async fn list_sellers(&self) -> Result<Vec<Seller>, StoreError>;

    async fn find_seller(&self, id: Uuid) -> Result<Option<Seller>, StoreError>;

    async fn find_sellers_by_pincode(&self, pincode: &Pincode) -> Result<Vec<Seller>, StoreError>;

    async fn save_product(&self, product: &Product) -> Result<(), StoreError>;

    async fn find_products_by_seller_ids(
        &self,
        seller_ids: &[Uuid],
    ) -> Result<Vec<Product>, StoreError>;

    async fn save_order(&self, order: &Order) -> Result<(), StoreError>;

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>, StoreError>;

    /// Orders placed for a pincode, newest first.
    async fn find_orders_by_pincode(&self, pincode: &Pincode) -> Result<Vec<Order>, StoreError>;
}
