use crate::{
    domain::BoardData,
    error::{HlaviError, Result},
    source::DataSource,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory data source
#[derive(Debug, Default)]
pub struct MemorySource {
    data: RwLock<BoardData>,
    commits: AtomicUsize,
    read_only: AtomicBool,
}

impl MemorySource {
    pub fn new(data: BoardData) -> Self {
        Self {
            data: RwLock::new(data),
            commits: AtomicUsize::new(0),
            read_only: AtomicBool::new(false),
        }
    }

    /// Number of commits accepted so far
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Makes every subsequent commit fail
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Replaces the contents from outside the board, as another writer would
    pub async fn replace(&self, data: BoardData) {
        *self.data.write().await = data;
    }

    pub async fn snapshot(&self) -> BoardData {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn load(&self) -> Result<BoardData> {
        Ok(self.data.read().await.clone())
    }

    async fn commit(&self, data: &BoardData) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(HlaviError::SourceError(
                "data source is read-only".to_string(),
            ));
        }
        *self.data.write().await = data.clone();
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
