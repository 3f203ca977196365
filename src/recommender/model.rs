use std::collections::HashMap;
use std::sync::Arc;

use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;

use super::codec::LabelCodec;
use super::error::RecommenderError;
use super::input::{CropInput, FEATURE_COUNT};

/// Name of the model graph's input tensor, fixed by the ONNX export.
const INPUT_NAME: &str = "float_input";

/// A thread-safe crop recommender wrapping a single ONNX decision-tree
/// session and the label codec it was trained with.
///
/// Both fields are read-only after load, so the recommender can be shared
/// across threads behind an `Arc` without synchronization; each call to
/// [`Recommender::recommend`] is independent and keeps no state.
#[derive(Debug)]
pub struct Recommender {
    pub model_path: String,
    pub session: Arc<Session>,
    pub codec: Arc<LabelCodec>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Recommender>();
    }
};

impl Recommender {
    pub fn new(model_path: String, session: Arc<Session>, codec: Arc<LabelCodec>) -> Self {
        Self {
            model_path,
            session,
            codec,
        }
    }

    /// Returns information about the loaded bundle
    pub fn info(&self) -> super::RecommenderInfo {
        super::RecommenderInfo {
            model_path: self.model_path.clone(),
            num_states: self.codec.num_states(),
            num_crops: self.codec.num_crops(),
            codec: Arc::clone(&self.codec),
        }
    }

    /// The region vocabulary, in code order. Used by the interactive front
    /// end to populate its selector.
    pub fn states(&self) -> &[String] {
        self.codec.states()
    }

    /// Produces a crop recommendation for one request.
    ///
    /// Runs the gateway (validation + encoding) and a single-sample
    /// inference, then decodes the predicted class id to a crop name.
    pub fn recommend(&self, input: &CropInput) -> Result<String, RecommenderError> {
        let features = input.feature_vector(&self.codec)?;
        let class_id = self.predict_class(&features)?;
        self.codec
            .crop_name(class_id)
            .map(str::to_owned)
            .ok_or_else(|| {
                RecommenderError::Inference(format!(
                    "model returned unknown class id {}",
                    class_id
                ))
            })
    }

    fn predict_class(&self, features: &[f32; FEATURE_COUNT]) -> Result<i64, RecommenderError> {
        // Exactly one sample per call: shape [1, FEATURE_COUNT].
        let input_array = Array2::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| RecommenderError::Inference(format!("Failed to shape input: {}", e)))?;
        let input_dyn = input_array.into_dyn();
        let input = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            INPUT_NAME,
            Tensor::from_array(&input).map_err(|e| {
                RecommenderError::Inference(format!("Failed to create input tensor: {}", e))
            })?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| RecommenderError::Inference(format!("Failed to run model: {}", e)))?;

        // The exported tree's first output is the label tensor, shape [1].
        let labels = outputs[0].try_extract_tensor::<i64>().map_err(|e| {
            RecommenderError::Inference(format!("Failed to extract label tensor: {}", e))
        })?;

        labels
            .iter()
            .next()
            .copied()
            .ok_or_else(|| RecommenderError::Inference("model returned no label".to_string()))
    }
}
