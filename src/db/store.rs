use async_trait::async_trait;

use super::models::Player;
use super::{Database, StoreError};

/// Read side of the player store as seen by the comparison service.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Return every record whose id is in `ids`, in any order.
    async fn find_by_ids(&self, ids: &[&str]) -> Result<Vec<Player>, StoreError>;
}

#[async_trait]
impl PlayerStore for Database {
    async fn find_by_ids(&self, ids: &[&str]) -> Result<Vec<Player>, StoreError> {
        self.find_players_by_ids(ids)
    }
}
