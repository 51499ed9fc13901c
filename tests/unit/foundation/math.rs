use super::*;
use crate::foundation::core::BoundingBox;

#[test]
fn approx_eq_tolerates_float_noise() {
    assert!(approx_eq(0.1 + 0.2, 0.3));
    assert!(!approx_eq(1.0, 1.001));
}

#[test]
fn box_lerp_is_componentwise() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(30.0, 10.0, 20.0, 10.0);
    let mid = BoundingBox::lerp(&a, &b, 0.5);
    assert_eq!(mid, BoundingBox::new(15.0, 5.0, 15.0, 10.0));
    assert_eq!(BoundingBox::lerp(&a, &b, 0.0), a);
    assert_eq!(BoundingBox::lerp(&a, &b, 1.0), b);
}
