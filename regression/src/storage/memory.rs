use std::sync::Arc;

use parking_lot::RwLock;

use super::{Result, SampleStore};
use crate::sample::Sample;

/// Keeps the samples in memory for the lifetime of the process.
///
/// Clones share the same underlying collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    samples: Arc<RwLock<Vec<Sample>>>,
}

impl MemoryStore {
    /// Creates a new empty `MemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `MemoryStore` already holding `samples`.
    ///
    /// # Arguments
    /// * `samples` - The initial contents of the store.
    pub fn with_samples(samples: Vec<Sample>) -> Self {
        Self {
            samples: Arc::new(RwLock::new(samples)),
        }
    }

    /// Returns the amount of samples held.
    pub fn len(&self) -> usize {
        self.samples.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.read().is_empty()
    }

    /// Removes every sample.
    pub fn clear(&self) {
        self.samples.write().clear();
    }
}

#[async_trait::async_trait]
impl SampleStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Sample>> {
        Ok(self.samples.read().clone())
    }

    async fn insert(&self, sample: Sample) -> Result<()> {
        self.samples.write().push(sample);
        Ok(())
    }
}
