//! Postgres-backed store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Order, Pincode, Product, Seller};

use super::{MarketStore, StoreError};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// Row types keep the SQL mapping separate from the domain model; status and
// pincode strings are re-validated on the way out.

#[derive(sqlx::FromRow)]
struct SellerRow {
    id: Uuid,
    name: String,
    pincode: String,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SellerRow> for Seller {
    type Error = StoreError;

    fn try_from(row: SellerRow) -> Result<Self, Self::Error> {
        Ok(Seller {
            id: row.id,
            name: row.name,
            pincode: Pincode::parse(&row.pincode).map_err(|e| StoreError::Corrupt(e.to_string()))?,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    product_name: String,
    customer_address: String,
    pincode: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            product_name: row.product_name,
            customer_address: row.customer_address,
            pincode: Pincode::parse(&row.pincode).map_err(|e| StoreError::Corrupt(e.to_string()))?,
            status: row
                .status
                .parse()
                .map_err(|e: crate::domain::UnknownStatus| StoreError::Corrupt(e.to_string()))?,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: i64,
    seller_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            seller_id: row.seller_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl MarketStore for PgStore {
    async fn save_seller(&self, seller: &Seller) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO sellers (id, name, pincode, category, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(seller.id)
        .bind(&seller.name)
        .bind(seller.pincode.as_str())
        .bind(&seller.category)
        .bind(seller.created_at)
        .bind(seller.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_sellers(&self) -> Result<Vec<Seller>, StoreError> {
        let rows = sqlx::query_as::<_, SellerRow>("SELECT * FROM sellers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Seller::try_from).collect()
    }

    async fn find_seller(&self, id: Uuid) -> Result<Option<Seller>, StoreError> {
        let row = sqlx::query_as::<_, SellerRow>("SELECT * FROM sellers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Seller::try_from).transpose()
    }

    async fn find_sellers_by_pincode(&self, pincode: &Pincode) -> Result<Vec<Seller>, StoreError> {
        let rows = sqlx::query_as::<_, SellerRow>("SELECT * FROM sellers WHERE pincode = $1")
            .bind(pincode.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Seller::try_from).collect()
    }

    async fn save_product(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO products (id, name, price, seller_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.seller_id)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_products_by_seller_ids(
        &self,
        seller_ids: &[Uuid],
    ) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT * FROM products WHERE seller_id = ANY($1) ORDER BY created_at DESC",
        )
        .bind(seller_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn save_order(&self, order: &Order) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO orders (id, product_name, customer_address, pincode, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(order.id)
        .bind(&order.product_name)
        .bind(&order.customer_address)
        .bind(order.pincode.as_str())
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Order::try_from).transpose()
    }

    async fn find_orders_by_pincode(&self, pincode: &Pincode) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT * FROM orders WHERE pincode = $1 ORDER BY created_at DESC",
        )
        .bind(pincode.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Order::try_from).collect()
    }
}
