use std::sync::Arc;

mod codec;
mod error;
mod input;
mod model;

pub use codec::LabelCodec;
pub use error::RecommenderError;
pub use input::{CropInput, FEATURE_COUNT};
pub use model::Recommender;

/// Information about a loaded recommender bundle
#[derive(Debug, Clone)]
pub struct RecommenderInfo {
    /// Path to the ONNX model file
    pub model_path: String,
    /// Number of region names in the input vocabulary
    pub num_states: usize,
    /// Number of crop labels the model can predict
    pub num_crops: usize,
    /// The label codec backing encoding and decoding
    pub codec: Arc<LabelCodec>,
}
