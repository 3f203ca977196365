use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::recommender::{LabelCodec, Recommender};
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Fixed artifact filenames, resolved against the models directory.
pub const MODEL_FILE: &str = "crop_model.onnx";
pub const CODEC_FILE: &str = "label_codec.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact missing: {0}")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Codec error: {0}")]
    CodecError(#[from] serde_json::Error),
    #[error("Model error: {0}")]
    ModelError(#[from] ort::Error),
}

/// Locates and loads the two model artifacts.
///
/// Loading happens once per process; absence of either file is a deployment
/// error, reported as [`ArtifactError::Missing`] with no retry. The API
/// variant aborts startup on it, the interactive variant degrades to an
/// error banner with inference disabled.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    models_dir: PathBuf,
}

impl ArtifactStore {
    /// Resolves the models directory from the `CROPSENSE_MODELS` environment
    /// variable, falling back to the current working directory.
    pub fn from_env() -> Self {
        match env::var("CROPSENSE_MODELS") {
            Ok(path) => Self::new(path),
            Err(_) => Self::new("."),
        }
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> Self {
        Self {
            models_dir: models_dir.as_ref().to_path_buf(),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(MODEL_FILE)
    }

    pub fn codec_path(&self) -> PathBuf {
        self.models_dir.join(CODEC_FILE)
    }

    pub fn artifacts_present(&self) -> bool {
        let model_path = self.model_path();
        let codec_path = self.codec_path();
        log::info!("Checking for model artifacts:");
        log::info!(
            "  Model path: {:?} (exists: {})",
            model_path,
            model_path.exists()
        );
        log::info!(
            "  Codec path: {:?} (exists: {})",
            codec_path,
            codec_path.exists()
        );
        model_path.exists() && codec_path.exists()
    }

    /// Loads both artifacts and assembles the immutable recommender bundle.
    ///
    /// Existence is checked for both files before anything is deserialized,
    /// so a missing file is always reported as `Missing` rather than a
    /// deserializer error.
    pub fn load(&self) -> Result<Recommender, ArtifactError> {
        self.load_with(&RuntimeConfig::default())
    }

    pub fn load_with(&self, config: &RuntimeConfig) -> Result<Recommender, ArtifactError> {
        let model_path = self.model_path();
        let codec_path = self.codec_path();

        if !model_path.exists() {
            return Err(ArtifactError::Missing(model_path));
        }
        if !codec_path.exists() {
            return Err(ArtifactError::Missing(codec_path));
        }

        let codec: LabelCodec = serde_json::from_slice(&fs::read(&codec_path)?)?;
        log::info!(
            "Loaded label codec from {:?} ({} states, {} crops)",
            codec_path,
            codec.num_states(),
            codec.num_crops()
        );

        let session = create_session_builder(config)?.commit_from_file(&model_path)?;
        log::info!("Loaded model session from {:?}", model_path);

        Ok(Recommender::new(
            model_path.to_string_lossy().into_owned(),
            Arc::new(session),
            Arc::new(codec),
        ))
    }

    /// Computes the sha256 digest of one artifact file. Used by the publish
    /// utility to send a checksum alongside each upload.
    pub fn digest(&self, path: &Path) -> Result<String, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }
}
