use super::*;

#[test]
fn fnv_is_stable_across_split_writes() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"playmat");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"play");
    b.write_bytes(b"mat");
    assert_eq!(a.finish(), b.finish());

    let mut c = Fnv1a64::new_default();
    c.write_u32(7);
    assert_ne!(c.finish(), Fnv1a64::new_default().finish());
}

#[test]
fn clamp_edit_handles_non_finite_values() {
    assert_eq!(clamp_edit(f64::NAN, 20.0, 650.0), 20.0);
    assert_eq!(clamp_edit(f64::INFINITY, 20.0, 650.0), 650.0);
    assert_eq!(clamp_edit(f64::NEG_INFINITY, 20.0, 650.0), 20.0);
    assert_eq!(clamp_edit(5.0, 20.0, 650.0), 20.0);
    assert_eq!(clamp_edit(900.0, 20.0, 650.0), 650.0);
    assert_eq!(clamp_edit(123.5, 20.0, 650.0), 123.5);
}

#[test]
fn bounds_with_inverted_range_collapse_to_min() {
    let b = Bounds::new(10.0, 5.0);
    assert_eq!(b.clamp(7.0), 10.0);
}
