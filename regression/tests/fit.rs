use futures::future::join_all;

use regression::{
    FileStore, MemoryStore, ModelKind, RegressionErr, Sample, SampleStore,
    loss::{LossFn, Mse},
    model::Model,
    seed_samples,
};

async fn seeded(volume: u64) -> MemoryStore {
    let store = MemoryStore::new();
    seed_samples(&store, volume).await.unwrap();
    store
}

#[tokio::test(flavor = "multi_thread")]
async fn zero_learning_rate_never_moves() {
    let store = seeded(20).await;

    for iterations in [1, 5, 50] {
        let params = regression::fit_linear(&store, 0., iterations).await.unwrap();
        assert_eq!(params, [0., 0.]);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn zero_iterations_return_origin() {
    let store = seeded(20).await;

    for learning_rate in [0., 0.01, 1e6, -3.] {
        let params = regression::fit_linear(&store, learning_rate, 0).await.unwrap();
        assert_eq!(params, [0., 0.]);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_store_is_rejected() {
    let store = MemoryStore::new();

    let err = regression::fit_linear(&store, 0.01, 10).await.unwrap_err();
    assert!(matches!(err, RegressionErr::EmptyDataset));

    let err = regression::fit_logistic(&store, 0.01, 10).await.unwrap_err();
    assert!(matches!(err, RegressionErr::EmptyDataset));
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_fits_are_identical() {
    let store = seeded(30).await;

    let first = regression::fit_linear(&store, 0.001, 100).await.unwrap();
    let second = regression::fit_linear(&store, 0.001, 100).await.unwrap();
    assert_eq!(first, second);

    let first = regression::fit_logistic(&store, 0.1, 100).await.unwrap();
    let second = regression::fit_logistic(&store, 0.1, 100).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_fits_are_independent() {
    let store = seeded(30).await;

    let fits = (0..4).map(|_| regression::fit_logistic(&store, 0.1, 50));
    let results = join_all(fits).await;

    let expected = regression::fit_logistic(&store, 0.1, 50).await.unwrap();
    for params in results {
        assert_eq!(params.unwrap(), expected);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn fitting_lowers_the_loss() {
    let store = seeded(40).await;
    let samples = store.fetch_all().await.unwrap();

    for kind in [ModelKind::Affine, ModelKind::Logistic] {
        let learning_rate = match kind {
            ModelKind::Affine => 0.001,
            ModelKind::Logistic => 0.01,
        };

        let params = regression::fit(&store, kind, learning_rate, 200).await.unwrap();

        let before = Mse.loss(&kind, &[0., 0.], &samples).unwrap();
        let after = Mse.loss(&kind, &params, &samples).unwrap();
        assert!(after < before, "{kind}: {after} >= {before}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn divergence_is_returned_not_reported() {
    let store = seeded(50).await;

    // Far beyond the stable step size for x up to 49.
    let [m, b] = regression::fit_linear(&store, 10., 200).await.unwrap();
    assert!(!m.is_finite() || !b.is_finite(), "{m}, {b}");
}

#[tokio::test(flavor = "multi_thread")]
async fn logistic_predictions_stay_bounded_after_fit() {
    let store = seeded(40).await;
    let params = regression::fit_logistic(&store, 0.5, 100).await.unwrap();

    for sample in store.fetch_all().await.unwrap() {
        let y = ModelKind::Logistic.predict(sample.x, &params);
        assert!((0. ..=1.).contains(&y), "{y}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn file_store_fits_like_memory_store() {
    let path = std::env::temp_dir().join(format!("regression-fit-{}.jsonl", std::process::id()));
    let _ = tokio::fs::remove_file(&path).await;

    let file = FileStore::new(&path);
    seed_samples(&file, 25).await.unwrap();
    let memory = seeded(25).await;

    let from_file = regression::fit_linear(&file, 0.001, 30).await.unwrap();
    let from_memory = regression::fit_linear(&memory, 0.001, 30).await.unwrap();
    assert_eq!(from_file, from_memory);

    let samples: Vec<Sample> = file.fetch_all().await.unwrap();
    assert_eq!(samples.len(), 25);

    tokio::fs::remove_file(&path).await.unwrap();
}
