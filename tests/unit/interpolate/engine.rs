use super::*;
use crate::foundation::core::AssetSize;
use crate::model::region::Region;

fn root() -> Asset {
    Asset::root(
        "clip.mp4",
        AssetType::Video,
        AssetSize {
            width: 200,
            height: 100,
        },
    )
}

fn boundary(t: f64, left: f64) -> AssetMetadata {
    let mut md = AssetMetadata::new(Asset::video_frame(&root(), t));
    let region = Region::rectangle(vec!["car".into()], BoundingBox::new(left, 0.0, 10.0, 10.0));
    md.regions.push(region.with_id("r1"));
    md
}

fn rate30() -> ExtractionRate {
    ExtractionRate::new(30).unwrap()
}

#[test]
fn linear_blend_matches_time_fraction() {
    let a = boundary(1.0, 0.0);
    let b = boundary(1.2, 30.0);
    let out = interpolate_regions(&a, &b, "r1", rate30(), InterpolationMethod::Linear);
    assert_eq!(out.len(), 5);

    let (_, nearest) = out
        .iter()
        .min_by(|x, y| {
            let dx = (x.1.asset.timestamp.unwrap() - 1.1333).abs();
            let dy = (y.1.asset.timestamp.unwrap() - 1.1333).abs();
            dx.total_cmp(&dy)
        })
        .unwrap();
    let region = &nearest.regions[0];
    assert!((region.bounding_box.left - 20.0).abs() < 1e-6);
    assert_eq!(region.state, RegionState::Interpolated);
    assert_eq!(region.points, region.bounding_box.corners().to_vec());
    assert_eq!(nearest.asset.state, AssetState::Interpolated);
    assert_eq!(nearest.asset.parent.as_deref(), Some("clip.mp4"));
}

#[test]
fn boundaries_in_reverse_order_give_the_same_frames() {
    let a = boundary(1.0, 0.0);
    let b = boundary(1.2, 30.0);
    let fwd = interpolate_regions(&a, &b, "r1", rate30(), InterpolationMethod::Linear);
    let rev = interpolate_regions(&b, &a, "r1", rate30(), InterpolationMethod::Linear);
    assert_eq!(
        fwd.keys().collect::<Vec<_>>(),
        rev.keys().collect::<Vec<_>>()
    );
    for (name, frame) in &fwd {
        assert!(
            frame.regions[0]
                .bounding_box
                .approx_eq(&rev[name].regions[0].bounding_box)
        );
    }
}

#[test]
fn produced_timestamps_are_snap_stable() {
    let a = boundary(0.9, 0.0);
    let b = boundary(1.25, 30.0);
    let rate = rate30();
    let out = interpolate_regions(&a, &b, "r1", rate, InterpolationMethod::Linear);
    assert!(!out.is_empty());
    for frame in out.values() {
        let t = frame.asset.timestamp.unwrap();
        assert_eq!(rate.snap(t), t);
        assert!(t > 0.9 && t < 1.25);
        assert_eq!(frame.asset.name, video_frame_name("clip.mp4", t));
    }
}

#[test]
fn missing_timestamp_or_parent_is_a_no_op() {
    let a = boundary(1.0, 0.0);
    let mut b = boundary(1.2, 30.0);
    b.asset.timestamp = None;
    assert!(interpolate_regions(&a, &b, "r1", rate30(), InterpolationMethod::Linear).is_empty());

    let mut b = boundary(1.2, 30.0);
    b.asset.parent = Some("other.mp4".into());
    assert!(interpolate_regions(&a, &b, "r1", rate30(), InterpolationMethod::Linear).is_empty());

    let mut a2 = boundary(1.0, 0.0);
    a2.asset.parent = None;
    let b = boundary(1.2, 30.0);
    assert!(interpolate_regions(&a2, &b, "r1", rate30(), InterpolationMethod::Linear).is_empty());
}

#[test]
fn region_missing_at_one_end_is_a_no_op() {
    let a = boundary(1.0, 0.0);
    let mut b = boundary(1.2, 30.0);
    b.regions.clear();
    assert!(interpolate_regions(&a, &b, "r1", rate30(), InterpolationMethod::Linear).is_empty());
}

#[test]
fn reserved_methods_produce_nothing() {
    let a = boundary(1.0, 0.0);
    let b = boundary(1.2, 30.0);
    for method in [InterpolationMethod::MeanShift, InterpolationMethod::Osvos] {
        assert!(interpolate_regions(&a, &b, "r1", rate30(), method).is_empty());
    }
}

#[test]
fn merge_overwrites_geometry_only_on_existing_frames() {
    let a = boundary(1.0, 0.0);
    let b = boundary(1.2, 30.0);
    let out = interpolate_regions(&a, &b, "r1", rate30(), InterpolationMethod::Linear);

    let existing_name = video_frame_name("clip.mp4", 32.0 / 30.0);
    let mut existing = AssetMetadata::new(Asset::video_frame(&root(), 32.0 / 30.0));
    existing.asset.state = AssetState::Sample;
    let bbox = BoundingBox::new(99.0, 99.0, 1.0, 1.0);
    let mut stale = Region::rectangle(vec!["truck".into()], bbox)
        .with_id("r1")
        .with_state(RegionState::Interpolated);
    stale.confidence = 0.5;
    existing.regions.push(stale);
    existing.regions.push(
        Region::rectangle(vec!["dog".into()], BoundingBox::new(0.0, 0.0, 1.0, 1.0)).with_id("r2"),
    );

    let mut store = BTreeMap::new();
    store.insert(existing_name.clone(), existing);
    let touched = merge_interpolated(&mut store, out);

    assert_eq!(touched.len(), 5);
    assert_eq!(store.len(), 5);
    let merged = &store[&existing_name];
    assert_eq!(merged.asset.state, AssetState::Sample);
    assert_eq!(merged.regions.len(), 2);
    let r1 = merged.region("r1").unwrap();
    assert_eq!(r1.tags, vec!["truck".to_string()]);
    assert_eq!(r1.confidence, 0.5);
    assert!((r1.bounding_box.left - 10.0).abs() < 1e-6);
    assert_eq!(r1.points, r1.bounding_box.corners().to_vec());
}

#[test]
fn pairs_respect_gap_limit() {
    let rate = rate30();
    let keyframes = vec![
        boundary(1.0, 0.0),
        boundary(31.0 / 30.0, 0.0),
        boundary(34.0 / 30.0, 0.0),
        boundary(2.0, 0.0),
    ];
    let pairs = interpolation_pairs(&keyframes, rate, 5);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.asset.timestamp, Some(31.0 / 30.0));
    assert_eq!(pairs[0].1.asset.timestamp, Some(34.0 / 30.0));
}
