use crate::identity::ReceiptId;
use crate::storage::ReceiptStore;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-lifetime store; records are never evicted.
#[derive(Debug, Default)]
pub struct InMemoryReceiptStore {
    records: RwLock<HashMap<ReceiptId, u64>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    #[cfg(test)]
    async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn insert_if_absent(&self, id: ReceiptId, points: u64) -> bool {
        match self.records.write().await.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(points);
                true
            }
        }
    }

    async fn get(&self, id: &str) -> Option<u64> {
        self.records.read().await.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::receipt::Receipt;
    use crate::identity::identify;
    use serde_json::json;
    use std::sync::Arc;

    fn receipt_id(retailer: &str) -> ReceiptId {
        identify(
            &Receipt::from_json(&json!({
                "retailer": retailer,
                "purchaseDate": "2022-01-01",
                "purchaseTime": "13:01",
                "items": [{"shortDescription": "Dasani", "price": "1.40"}],
                "total": "1.40",
            }))
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn insert_then_get() {
        let store = InMemoryReceiptStore::new();
        let id = receipt_id("Target");
        assert!(store.is_empty().await);
        assert!(store.insert_if_absent(id.clone(), 18).await);
        assert_eq!(store.get(id.as_str()).await, Some(18));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn existing_value_is_kept() {
        let store = InMemoryReceiptStore::new();
        let id = receipt_id("Target");
        assert!(store.insert_if_absent(id.clone(), 18).await);
        assert!(!store.insert_if_absent(id.clone(), 99).await);
        assert_eq!(store.get(id.as_str()).await, Some(18));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn zero_points_are_stored() {
        let store = InMemoryReceiptStore::new();
        let id = receipt_id("&");
        store.insert_if_absent(id.clone(), 0).await;
        assert_eq!(store.get(id.as_str()).await, Some(0));
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let store = InMemoryReceiptStore::new();
        assert_eq!(store.get(&"0".repeat(64)).await, None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_store_once() {
        let store = Arc::new(InMemoryReceiptStore::new());
        let id = receipt_id("Target");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = id.clone();
                tokio::spawn(async move { store.insert_if_absent(id, 18).await })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(store.len().await, 1);
    }
}
