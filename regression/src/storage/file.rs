use std::{
    io,
    path::PathBuf,
};

use tokio::{fs, io::AsyncWriteExt, sync::Mutex};

use super::{Result, SampleStore, StoreErr};
use crate::sample::Sample;

/// Persists the samples in a JSON lines file, one `{"x":..,"y":..}` record per line.
///
/// The file is created on the first insert, a missing file reads as an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    append: Mutex<()>,
}

impl FileStore {
    /// Creates a new `FileStore`.
    ///
    /// # Arguments
    /// * `path` - The location of the samples file.
    ///
    /// # Returns
    /// A new `FileStore` instance.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append: Mutex::new(()),
        }
    }

    /// Decodes the contents of a samples file.
    ///
    /// # Arguments
    /// * `contents` - The raw text of the file.
    ///
    /// # Returns
    /// The decoded samples or `StoreErr::Corrupt` pointing at the first bad line.
    fn parse(contents: &str) -> Result<Vec<Sample>> {
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|source| StoreErr::Corrupt {
                    line: i + 1,
                    source,
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SampleStore for FileStore {
    async fn fetch_all(&self) -> Result<Vec<Sample>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Self::parse(&contents)
    }

    async fn insert(&self, sample: Sample) -> Result<()> {
        let mut line = serde_json::to_vec(&sample).map_err(io::Error::other)?;
        line.push(b'\n');

        let _guard = self.append.lock().await;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}
