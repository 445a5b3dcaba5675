//! In-memory store for tests and database-less runs

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Order, Pincode, Product, Seller};

use super::{MarketStore, StoreError};

#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    sellers: Vec<Seller>,
    products: Vec<Product>,
    orders: Vec<Order>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarketStore for MemStore {
    async fn save_seller(&self, seller: &Seller) -> Result<(), StoreError> {
        self.inner.write().await.sellers.push(seller.clone());
        Ok(())
    }

    async fn list_sellers(&self) -> Result<Vec<Seller>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables.sellers.iter().rev().cloned().collect())
    }

    async fn find_seller(&self, id: Uuid) -> Result<Option<Seller>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables.sellers.iter().find(|s| s.id == id).cloned())
    }

    async fn find_sellers_by_pincode(&self, pincode: &Pincode) -> Result<Vec<Seller>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables
            .sellers
            .iter()
            .filter(|s| &s.pincode == pincode)
            .cloned()
            .collect())
    }

    async fn save_product(&self, product: &Product) -> Result<(), StoreError> {
        self.inner.write().await.products.push(product.clone());
        Ok(())
    }

    async fn find_products_by_seller_ids(
        &self,
        seller_ids: &[Uuid],
    ) -> Result<Vec<Product>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables
            .products
            .iter()
            .rev()
            .filter(|p| seller_ids.contains(&p.seller_id))
            .cloned()
            .collect())
    }

    async fn save_order(&self, order: &Order) -> Result<(), StoreError> {
        self.inner.write().await.orders.push(order.clone());
        Ok(())
    }

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn find_orders_by_pincode(&self, pincode: &Pincode) -> Result<Vec<Order>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables
            .orders
            .iter()
            .rev()
            .filter(|o| &o.pincode == pincode)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pincode(s: &str) -> Pincode {
        Pincode::parse(s).unwrap()
    }

    #[tokio::test]
    async fn sellers_are_scoped_by_pincode() {
        let store = MemStore::new();
        store
            .save_seller(&Seller::register("A", pincode("313001"), "Grocery"))
            .await
            .unwrap();
        store
            .save_seller(&Seller::register("B", pincode("560001"), "Dairy"))
            .await
            .unwrap();

        let matched = store.find_sellers_by_pincode(&pincode("313001")).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "A");
        assert!(store
            .find_sellers_by_pincode(&pincode("999999"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn orders_come_back_newest_first() {
        let store = MemStore::new();
        let first = Order::place("Atta", "addr", pincode("313001"));
        let second = Order::place("Ghee", "addr", pincode("313001"));
        store.save_order(&first).await.unwrap();
        store.save_order(&second).await.unwrap();

        let orders = store.find_orders_by_pincode(&pincode("313001")).await.unwrap();
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);
    }

    #[tokio::test]
    async fn products_filter_by_seller_ids() {
        let store = MemStore::new();
        let seller = Seller::register("A", pincode("313001"), "Grocery");
        store.save_seller(&seller).await.unwrap();
        let product = Product::list("Atta", 4500, seller.id);
        store.save_product(&product).await.unwrap();

        let found = store.find_products_by_seller_ids(&[seller.id]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(store
            .find_products_by_seller_ids(&[Uuid::new_v4()])
            .await
            .unwrap()
            .is_empty());
    }
}
