use ort::Error as OrtError;
use std::fmt;

/// Represents the errors that can occur on the recommendation request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommenderError {
    /// The region value was absent or is not part of the known vocabulary
    InvalidRegion(String),
    /// The predictor failed while producing a label
    Inference(String),
}

impl fmt::Display for RecommenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion(msg) => write!(f, "Invalid region: {}", msg),
            Self::Inference(msg) => write!(f, "Inference error: {}", msg),
        }
    }
}

impl std::error::Error for RecommenderError {}

impl From<OrtError> for RecommenderError {
    fn from(err: OrtError) -> Self {
        RecommenderError::Inference(err.to_string())
    }
}
