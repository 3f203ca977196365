//! A thread-safe crop recommendation library serving a pre-trained ONNX
//! decision tree over soil and climate measurements.
//!
//! The library is the shared core behind two front ends (a JSON API and an
//! interactive form page): it loads the two model artifacts once at startup,
//! validates and encodes per-request input into the fixed 8-feature vector
//! the model was trained on, and runs a single-sample inference.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cropsense::{ArtifactStore, CropInput};
//!
//! let recommender = ArtifactStore::from_env().load()?;
//!
//! let input = CropInput {
//!     n_soil: 90.0,
//!     p_soil: 42.0,
//!     k_soil: 43.0,
//!     temperature: 20.8,
//!     humidity: 82.0,
//!     ph: 6.5,
//!     rainfall: 202.9,
//!     state: Some("Tamil Nadu".to_string()),
//! };
//!
//! let crop = recommender.recommend(&input)?;
//! println!("Recommended crop: {}", crop);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The loaded [`Recommender`] is immutable after construction and can be
//! shared across threads (or axum handlers) behind an `Arc`; inference takes
//! `&self` and keeps no per-request state.

pub mod artifacts;
pub mod recommender;
mod runtime;

pub use artifacts::{ArtifactError, ArtifactStore, CODEC_FILE, MODEL_FILE};
pub use recommender::{
    CropInput, LabelCodec, Recommender, RecommenderError, RecommenderInfo, FEATURE_COUNT,
};
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
