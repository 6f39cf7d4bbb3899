use log::debug;

use crate::{Result, sample::Sample, storage::SampleStore};

/// Synthesizes the `i`-th seeding sample, `{x: i, y: sin(i * 0.1) > 0 ? 1 : 0}`.
pub fn synthesize(i: u64) -> Sample {
    let x = i as f64;
    let y = if (x * 0.1).sin() > 0. { 1. } else { 0. };
    Sample::new(x, y)
}

/// Inserts `volume` synthesized samples into `store`, in order.
///
/// # Arguments
/// * `store` - Where the samples are written.
/// * `volume` - The amount of samples to write.
///
/// # Returns
/// The first store error, samples inserted before it stay in the store.
pub async fn seed_samples<S>(store: &S, volume: u64) -> Result<()>
where
    S: SampleStore + ?Sized,
{
    for i in 0..volume {
        store.insert(synthesize(i)).await?;
    }

    debug!("seeded {volume} samples");
    Ok(())
}
