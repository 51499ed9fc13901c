use super::*;
use crate::foundation::core::BoundingBox;

fn video() -> Asset {
    Asset::root(
        "clip.mp4",
        AssetType::Video,
        AssetSize {
            width: 640,
            height: 480,
        },
    )
}

#[test]
fn video_frame_name_is_derived_from_root_and_timestamp() {
    let frame = Asset::video_frame(&video(), 1.5);
    assert_eq!(frame.name, "clip.mp4#t=1.5");
    assert_eq!(frame.parent.as_deref(), Some("clip.mp4"));
    assert_eq!(frame.size.width, 640);
    assert!(frame.is_video_frame());
    assert_eq!(video_frame_name("clip.mp4", 2.0), "clip.mp4#t=2");
}

#[test]
fn parse_video_frame_name_round_trips_grid_timestamps() {
    let name = video_frame_name("a#b.mp4", 34.0 / 30.0);
    let (root, t) = parse_video_frame_name(&name).unwrap();
    assert_eq!(root, "a#b.mp4");
    assert_eq!(t, 34.0 / 30.0);
    assert!(parse_video_frame_name("plain.jpg").is_none());
}

#[test]
fn tagged_asset_states() {
    let tagged: Vec<AssetState> = AssetState::ALL
        .into_iter()
        .filter(|s| s.is_tagged())
        .collect();
    assert_eq!(
        tagged,
        vec![
            AssetState::Sample,
            AssetState::Tracked,
            AssetState::Interpolated
        ]
    );
}

#[test]
fn upsert_replaces_in_place() {
    let mut md = AssetMetadata::new(video());
    let a = Region::rectangle(vec!["a".into()], BoundingBox::new(0.0, 0.0, 1.0, 1.0)).with_id("a");
    let b = Region::rectangle(vec!["b".into()], BoundingBox::new(0.0, 0.0, 1.0, 1.0)).with_id("b");
    md.upsert_region(a.clone());
    md.upsert_region(b);
    let mut moved = a.clone();
    moved.set_box(BoundingBox::new(5.0, 5.0, 1.0, 1.0));
    md.upsert_region(moved);
    assert_eq!(md.regions.len(), 2);
    assert_eq!(md.regions[0].id, "a");
    assert_eq!(md.regions[0].bounding_box.left, 5.0);
    assert_eq!(md.remove_region("a").unwrap().id, "a");
    assert!(md.region("a").is_none());
}

#[test]
fn asset_json_shape() {
    let mut frame = Asset::video_frame(&video(), 1.0);
    frame.asset_type = AssetType::TfRecord;
    let v = serde_json::to_value(&frame).unwrap();
    assert_eq!(v["type"], "TFRecord");
    assert_eq!(v["state"], "NotVisited");
    assert_eq!(v["polygonNumber"], 0);
    assert!(v.get("comment").is_none());
}
