use crate::{domain::BoardData, error::Result};
use async_trait::async_trait;

pub mod memory;

pub use memory::MemorySource;

/// Externally owned canonical store for board contents
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Loads the current board contents
    async fn load(&self) -> Result<BoardData>;

    /// Replaces the board contents with a committed reorder
    async fn commit(&self, data: &BoardData) -> Result<()>;
}
