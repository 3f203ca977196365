use std::env;
use std::fs;

use cropsense::{ArtifactError, ArtifactStore, CODEC_FILE, MODEL_FILE};

#[test]
fn test_missing_artifacts_prevent_loading() {
    let dir = env::temp_dir().join("cropsense-missing-artifacts");
    fs::create_dir_all(&dir).unwrap();

    let store = ArtifactStore::new(&dir);
    assert!(!store.artifacts_present());

    // No inference is possible: loading fails, it never falls back to a
    // default bundle.
    let result = store.load();
    assert!(matches!(result, Err(ArtifactError::Missing(_))));
}

#[test]
fn test_codec_alone_is_not_enough() {
    let dir = env::temp_dir().join("cropsense-codec-only");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(CODEC_FILE),
        r#"{"states": ["Tamil Nadu"], "crops": ["rice"]}"#,
    )
    .unwrap();

    let store = ArtifactStore::new(&dir);
    assert!(!store.artifacts_present());

    match store.load() {
        Err(ArtifactError::Missing(path)) => {
            assert!(path.ends_with(MODEL_FILE));
        }
        other => panic!("expected Missing, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_models_dir_from_env() {
    env::set_var("CROPSENSE_MODELS", "/tmp/cropsense-env-test");
    let store = ArtifactStore::from_env();
    assert!(store
        .model_path()
        .to_str()
        .unwrap()
        .contains("/tmp/cropsense-env-test"));
    env::remove_var("CROPSENSE_MODELS");

    // Without the variable the store resolves against the working directory
    let store = ArtifactStore::from_env();
    assert!(store.model_path().ends_with(MODEL_FILE));
}
