use crate::{Joint, interpolate_rotation, renormalize, rotation_from_axis_angle, same_rotation};
use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

fn assert_vec3_approx(actual: Vec3, expected: Vec3) {
    let diff = (actual - expected).abs().max_element();
    assert!(
        diff <= 1.0e-5,
        "expected {expected:?}, got {actual:?} (diff {diff})"
    );
}

fn assert_same_rotation(actual: Quat, expected: Quat) {
    assert!(
        same_rotation(actual, expected, 1.0e-5),
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn axis_angle_normalizes_axis() {
    let a = rotation_from_axis_angle(Vec3::new(0.0, 3.0, 0.0), FRAC_PI_2);
    let b = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
    assert_same_rotation(a, b);
    assert!((a.length() - 1.0).abs() <= 1.0e-6);
}

#[test]
fn axis_angle_with_zero_axis_is_identity() {
    assert_eq!(rotation_from_axis_angle(Vec3::ZERO, 1.0), Quat::IDENTITY);
    assert_eq!(
        rotation_from_axis_angle(Vec3::new(f32::NAN, 0.0, 0.0), 1.0),
        Quat::IDENTITY
    );
}

#[test]
fn renormalize_falls_back_to_identity() {
    assert_eq!(renormalize(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)), Quat::IDENTITY);
    let q = renormalize(Quat::from_xyzw(0.0, 0.0, 0.0, 2.0));
    assert_eq!(q, Quat::IDENTITY);
}

#[test]
fn compose_applies_right_operand_first() {
    let parent = Joint::new(
        Vec3::new(0.0, 0.0, 1.0),
        rotation_from_axis_angle(Vec3::Y, FRAC_PI_2),
    );
    let child = Joint::from_position(Vec3::new(0.0, 0.0, 1.0));

    let global = parent.compose(&child);
    assert_vec3_approx(global.position, Vec3::new(1.0, 0.0, 1.0));
    assert_same_rotation(global.orientation, parent.orientation);

    let point = Vec3::new(0.5, -2.0, 3.0);
    assert_vec3_approx(
        global.transform_point(point),
        parent.transform_point(child.transform_point(point)),
    );
}

#[test]
fn compose_with_inverse_is_identity() {
    let t = Joint::new(
        Vec3::new(3.0, -1.0, 2.5),
        rotation_from_axis_angle(Vec3::new(1.0, 2.0, -0.5), 1.3),
    );
    let a = t.compose(&t.inverse());
    let b = t.inverse().compose(&t);
    assert!(a.abs_diff_eq(&Joint::IDENTITY, 1.0e-5), "{a:?}");
    assert!(b.abs_diff_eq(&Joint::IDENTITY, 1.0e-5), "{b:?}");
}

#[test]
fn interpolate_rotation_endpoints() {
    let a = rotation_from_axis_angle(Vec3::X, 0.3);
    let b = rotation_from_axis_angle(Vec3::new(0.0, 1.0, 1.0), 2.0);

    assert_eq!(interpolate_rotation(a, b, 0.0), a);
    assert_same_rotation(interpolate_rotation(a, b, 1.0), b);
}

#[test]
fn interpolate_rotation_halfway_about_one_axis() {
    let a = Quat::IDENTITY;
    let b = rotation_from_axis_angle(Vec3::Y, FRAC_PI_2);
    let mid = interpolate_rotation(a, b, 0.5);
    assert_same_rotation(mid, rotation_from_axis_angle(Vec3::Y, FRAC_PI_4));
    assert!((mid.length() - 1.0).abs() <= 1.0e-6);
}

#[test]
fn interpolate_rotation_takes_shortest_arc() {
    // 10 degrees and 350 degrees about Z are 20 degrees apart; the halfway rotation is the
    // identity, not a half turn.
    let a = rotation_from_axis_angle(Vec3::Z, 10.0_f32.to_radians());
    let b = rotation_from_axis_angle(Vec3::Z, 350.0_f32.to_radians());
    assert!(a.dot(b) < 0.0);

    let mid = interpolate_rotation(a, b, 0.5);
    assert_same_rotation(mid, Quat::IDENTITY);
}

#[test]
fn interpolate_rotation_ignores_operand_sign() {
    let a = rotation_from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.4);
    let b = rotation_from_axis_angle(Vec3::new(0.0, 1.0, -1.0), 2.2);
    for alpha in [0.1, 0.25, 0.5, 0.9] {
        let direct = interpolate_rotation(a, b, alpha);
        let negated = interpolate_rotation(a, -b, alpha);
        assert_same_rotation(direct, negated);
    }
}

#[test]
fn interpolate_rotation_near_identical_operands() {
    let a = rotation_from_axis_angle(Vec3::Z, 1.0);
    let b = rotation_from_axis_angle(Vec3::Z, 1.0 + 1.0e-4);
    let mid = interpolate_rotation(a, b, 0.5);
    assert_same_rotation(mid, rotation_from_axis_angle(Vec3::Z, 1.0 + 0.5e-4));
}

#[test]
fn joint_interpolate_lerps_position() {
    let a = Joint::from_position(Vec3::new(0.0, 0.0, 0.0));
    let b = Joint::new(Vec3::new(2.0, 4.0, -6.0), rotation_from_axis_angle(Vec3::Z, PI / 3.0));

    assert_eq!(a.interpolate(&b, 0.0), a);
    let mid = a.interpolate(&b, 0.5);
    assert_vec3_approx(mid.position, Vec3::new(1.0, 2.0, -3.0));
    assert_same_rotation(mid.orientation, rotation_from_axis_angle(Vec3::Z, PI / 6.0));
}

#[test]
fn joint_interpolate_nan_alpha_keeps_first_operand() {
    let a = Joint::from_position(Vec3::X);
    let b = Joint::from_position(Vec3::Y);
    assert_eq!(a.interpolate(&b, f32::NAN), a);
}
