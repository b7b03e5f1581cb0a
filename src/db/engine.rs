// src/db/engine.rs

use crate::db::data::Data;
use crate::db::error::StoreResult;

/// Backend seam behind [`Database`](crate::db::Database).
///
/// Each mutating call is one transaction: it either commits fully or leaves
/// the store untouched. `limit` has already been validated by the caller.
pub(crate) trait StorageEngine: Send {
    fn insert(&mut self, data: &Data) -> StoreResult<()>;
    fn remove(&mut self, id: i64) -> StoreResult<()>;
    fn remove_batch(&mut self, ids: &[i64]) -> StoreResult<()>;
    fn query(&self, limit: u32) -> StoreResult<Vec<Data>>;
}
