use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TagtrackError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TagtrackError::not_found("x")
            .to_string()
            .contains("not found:")
    );
    assert!(
        TagtrackError::placement_exhausted("x")
            .to_string()
            .contains("placement exhausted:")
    );
    assert!(
        TagtrackError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn paste_too_big_names_region_and_canvas() {
    let err = TagtrackError::PasteRegionTooBig {
        region_id: "r1".to_string(),
        width: 640.0,
        height: 480.0,
    };
    let msg = err.to_string();
    assert!(msg.contains("'r1'"));
    assert!(msg.contains("640x480"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: TagtrackError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, TagtrackError::Serde(_)));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TagtrackError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
