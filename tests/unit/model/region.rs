use super::*;

fn tagged_box(left: f64, top: f64) -> Region {
    Region::rectangle(
        vec!["car".to_string()],
        BoundingBox::new(left, top, 10.0, 20.0),
    )
}

#[test]
fn rectangle_gets_fresh_id_and_corner_points() {
    let a = tagged_box(0.0, 0.0);
    let b = tagged_box(0.0, 0.0);
    assert_ne!(a.id, b.id);
    assert_eq!(a.points.len(), 4);
    assert_eq!(a.points[2], Point::new(10.0, 20.0));
    assert_eq!(a.state, RegionState::Inputted);
}

#[test]
fn untagged_region_is_invalid() {
    let mut r = tagged_box(0.0, 0.0);
    assert!(r.is_tagged());
    r.tags.clear();
    assert!(!r.is_tagged());
}

#[test]
fn translate_moves_box_and_points_together() {
    let mut r = tagged_box(5.0, 5.0);
    r.translate(Vec2::new(10.0, 10.0));
    assert!(
        r.bounding_box
            .approx_eq(&BoundingBox::new(15.0, 15.0, 10.0, 20.0))
    );
    assert_eq!(r.points[0], Point::new(15.0, 15.0));
    assert_eq!(r.points[2], Point::new(25.0, 35.0));
}

#[test]
fn points_eq_ignores_float_noise() {
    let a = tagged_box(0.1 + 0.2, 0.0);
    let mut b = a.clone();
    b.set_box(BoundingBox::new(0.3, 0.0, 10.0, 20.0));
    assert!(a.points_eq(&b));
    b.translate(Vec2::new(1.0, 0.0));
    assert!(!a.points_eq(&b));
}

#[test]
fn keyframe_states() {
    let keyframes: Vec<RegionState> = RegionState::ALL
        .into_iter()
        .filter(|s| s.is_keyframe())
        .collect();
    assert_eq!(
        keyframes,
        vec![
            RegionState::Inputted,
            RegionState::Tracked,
            RegionState::Editted
        ]
    );
}

#[test]
fn json_uses_camel_case_and_type_key() {
    let r = tagged_box(1.0, 2.0).with_id("r1");
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["id"], "r1");
    assert_eq!(v["type"], "Rectangle");
    assert_eq!(v["boundingBox"]["left"], 1.0);
    assert_eq!(v["state"], "Inputted");
    let back: Region = serde_json::from_value(v).unwrap();
    assert_eq!(back, r);
}
