use crate::identity::ReceiptId;

pub mod memory;

pub use memory::InMemoryReceiptStore;

/// Keyed store of processed receipts' points.
#[async_trait::async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Stores `points` under `id` unless `id` is already present.
    ///
    /// Returns `true` when the record was newly inserted. An existing record is
    /// never overwritten.
    async fn insert_if_absent(&self, id: ReceiptId, points: u64) -> bool;

    async fn get(&self, id: &str) -> Option<u64>;
}
