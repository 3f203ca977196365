use serde::{Deserialize, Serialize};

/// Bidirectional label codec shared by the input gateway and the predictor.
///
/// `states` is the closed region vocabulary in training order: the position
/// of a name is its integer code, exactly as the label encoder assigned codes
/// when the model was trained. `crops` maps the model's output class id back
/// to a crop name the same way. The codec is deserialized once from the
/// `label_codec.json` artifact and never modified afterwards; it is the sole
/// authority on vocabulary membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelCodec {
    states: Vec<String>,
    crops: Vec<String>,
}

impl LabelCodec {
    pub fn new(states: Vec<String>, crops: Vec<String>) -> Self {
        Self { states, crops }
    }

    /// Returns the integer code for a region name, or `None` when the name
    /// is not part of the vocabulary.
    pub fn encode_state(&self, name: &str) -> Option<i64> {
        self.states.iter().position(|s| s == name).map(|i| i as i64)
    }

    /// Returns the crop name for a predicted class id, or `None` when the id
    /// falls outside the label table.
    pub fn crop_name(&self, class_id: i64) -> Option<&str> {
        usize::try_from(class_id)
            .ok()
            .and_then(|i| self.crops.get(i))
            .map(String::as_str)
    }

    /// The region vocabulary in code order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_crops(&self) -> usize {
        self.crops.len()
    }
}
