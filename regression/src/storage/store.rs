use super::Result;
use crate::sample::Sample;

/// The collection of samples the models are fitted against.
///
/// This trait acts as an indirection layer, allowing the service to pick the
/// concrete storage at startup and share it between every request.
#[async_trait::async_trait]
pub trait SampleStore: Send + Sync {
    /// Reads every sample currently held by the store.
    ///
    /// # Returns
    /// The samples, possibly none, or a `StoreErr` if the medium fails.
    async fn fetch_all(&self) -> Result<Vec<Sample>>;

    /// Appends a sample to the store.
    ///
    /// # Arguments
    /// * `sample` - The sample to persist.
    async fn insert(&self, sample: Sample) -> Result<()>;
}
