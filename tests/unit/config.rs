use super::*;

#[test]
fn empty_document_uses_defaults() {
    let cfg = EngineConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.paste_margin, PASTE_MARGIN);
    assert_eq!(cfg.max_interpolation_gap, 5);
}

#[test]
fn camel_case_fields_override_defaults() {
    let cfg = EngineConfig::from_json_str(
        r#"{ "frameExtractionRate": 30, "interpolationMethod": "MeanShift", "requireStep": true }"#,
    )
    .unwrap();
    assert_eq!(cfg.frame_extraction_rate, 30);
    assert_eq!(cfg.interpolation_method, InterpolationMethod::MeanShift);
    assert!(cfg.require_step);
    assert_eq!(cfg.extraction_rate().unwrap().fps(), 30);
}

#[test]
fn rejects_out_of_range_values() {
    for doc in [
        r#"{ "frameExtractionRate": 0 }"#,
        r#"{ "pasteMargin": 0 }"#,
        r#"{ "undoDepth": 0 }"#,
        r#"{ "maxInterpolationGap": 0 }"#,
    ] {
        assert!(matches!(
            EngineConfig::from_json_str(doc),
            Err(TagtrackError::Validation(_))
        ));
    }
}

#[test]
fn unknown_method_is_a_serde_error() {
    assert!(matches!(
        EngineConfig::from_json_str(r#"{ "interpolationMethod": "Spline" }"#),
        Err(TagtrackError::Serde(_))
    ));
}
