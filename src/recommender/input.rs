use serde::Deserialize;

use super::codec::LabelCodec;
use super::error::RecommenderError;

/// Number of entries in the model's feature vector.
pub const FEATURE_COUNT: usize = 8;

/// Raw per-request input to the gateway.
///
/// The serde names match the wire format both front ends use: seven numeric
/// measurements plus the region name. `state` is optional at the type level
/// so an absent value reaches the gateway and is rejected with a proper
/// [`RecommenderError::InvalidRegion`] instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CropInput {
    #[serde(rename = "N_SOIL")]
    pub n_soil: f32,
    #[serde(rename = "P_SOIL")]
    pub p_soil: f32,
    #[serde(rename = "K_SOIL")]
    pub k_soil: f32,
    #[serde(rename = "TEMPERATURE")]
    pub temperature: f32,
    #[serde(rename = "HUMIDITY")]
    pub humidity: f32,
    #[serde(rename = "ph")]
    pub ph: f32,
    #[serde(rename = "RAINFALL")]
    pub rainfall: f32,
    #[serde(rename = "STATE", default)]
    pub state: Option<String>,
}

impl CropInput {
    /// Assembles the feature vector the model was trained on.
    ///
    /// The order is fixed and must not change:
    /// `[N, P, K, temperature, humidity, pH, rainfall, encoded_region]`.
    ///
    /// # Errors
    /// - `InvalidRegion` if `state` is `None` (checked before any codec
    ///   lookup is attempted)
    /// - `InvalidRegion` if the codec does not recognize the region name
    ///
    /// Numeric ranges are not validated here; the interactive front end
    /// constrains them at the widget level only.
    pub fn feature_vector(
        &self,
        codec: &LabelCodec,
    ) -> Result<[f32; FEATURE_COUNT], RecommenderError> {
        let state = self
            .state
            .as_deref()
            .ok_or_else(|| RecommenderError::InvalidRegion("no state provided".to_string()))?;

        let code = codec.encode_state(state).ok_or_else(|| {
            RecommenderError::InvalidRegion(format!(
                "'{}' is not a recognized state. Please select a valid state.",
                state
            ))
        })?;

        Ok([
            self.n_soil,
            self.p_soil,
            self.k_soil,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
            code as f32,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_field_names() {
        let json = r#"{
            "N_SOIL": 90, "P_SOIL": 42, "K_SOIL": 43,
            "TEMPERATURE": 20.8, "HUMIDITY": 82.0,
            "ph": 6.5, "RAINFALL": 202.9, "STATE": "Tamil Nadu"
        }"#;
        let input: CropInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.n_soil, 90.0);
        assert_eq!(input.ph, 6.5);
        assert_eq!(input.state.as_deref(), Some("Tamil Nadu"));
    }

    #[test]
    fn test_absent_state_deserializes_to_none() {
        let json = r#"{
            "N_SOIL": 90, "P_SOIL": 42, "K_SOIL": 43,
            "TEMPERATURE": 20.8, "HUMIDITY": 82.0,
            "ph": 6.5, "RAINFALL": 202.9
        }"#;
        let input: CropInput = serde_json::from_str(json).unwrap();
        assert!(input.state.is_none());
    }
}
