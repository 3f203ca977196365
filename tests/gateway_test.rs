use cropsense::{CropInput, LabelCodec, RecommenderError, FEATURE_COUNT};

fn test_codec() -> LabelCodec {
    LabelCodec::new(
        vec![
            "Andhra Pradesh".to_string(),
            "Assam".to_string(),
            "Karnataka".to_string(),
            "Kerala".to_string(),
            "Maharashtra".to_string(),
            "Punjab".to_string(),
            "Tamil Nadu".to_string(),
            "Uttar Pradesh".to_string(),
            "West Bengal".to_string(),
        ],
        vec![
            "chickpea".to_string(),
            "cotton".to_string(),
            "maize".to_string(),
            "rice".to_string(),
            "wheat".to_string(),
        ],
    )
}

fn sample_input(state: Option<&str>) -> CropInput {
    CropInput {
        n_soil: 90.0,
        p_soil: 42.0,
        k_soil: 43.0,
        temperature: 20.8,
        humidity: 82.0,
        ph: 6.5,
        rainfall: 202.9,
        state: state.map(str::to_owned),
    }
}

#[test]
fn test_unknown_state_is_rejected() {
    let codec = test_codec();
    let input = sample_input(Some("Atlantis"));
    let result = input.feature_vector(&codec);
    assert!(matches!(result, Err(RecommenderError::InvalidRegion(_))));
}

#[test]
fn test_missing_state_is_rejected() {
    let codec = test_codec();
    let input = sample_input(None);
    let result = input.feature_vector(&codec);
    assert!(matches!(result, Err(RecommenderError::InvalidRegion(_))));
}

#[test]
fn test_feature_vector_order_and_length() {
    let codec = test_codec();
    let input = sample_input(Some("Tamil Nadu"));
    let vector = input.feature_vector(&codec).unwrap();

    assert_eq!(vector.len(), FEATURE_COUNT);
    let tamil_nadu_code = codec.encode_state("Tamil Nadu").unwrap() as f32;
    assert_eq!(
        vector,
        [90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9, tamil_nadu_code]
    );
}

#[test]
fn test_encoding_is_deterministic_across_requests() {
    let codec = test_codec();
    let first = sample_input(Some("Punjab")).feature_vector(&codec).unwrap();
    for _ in 0..5 {
        let again = sample_input(Some("Punjab")).feature_vector(&codec).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn test_rejection_message_names_the_state() {
    let codec = test_codec();
    let input = sample_input(Some("Gotham"));
    match input.feature_vector(&codec) {
        Err(RecommenderError::InvalidRegion(msg)) => assert!(msg.contains("Gotham")),
        other => panic!("expected InvalidRegion, got {:?}", other),
    }
}

#[test]
fn test_distinct_states_get_distinct_codes() {
    let codec = test_codec();
    let kerala = sample_input(Some("Kerala")).feature_vector(&codec).unwrap();
    let assam = sample_input(Some("Assam")).feature_vector(&codec).unwrap();
    assert_ne!(kerala[7], assam[7]);
    // The numeric half of the vector is untouched by the encoding
    assert_eq!(kerala[..7], assam[..7]);
}
