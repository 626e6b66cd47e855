use crate::geometry::{FALLBACK_NORMAL, bounds, compute_vertex_normals, face_normal};
use glam::Vec3;

fn assert_vec3_approx(actual: Vec3, expected: Vec3) {
    let diff = (actual - expected).abs().max_element();
    assert!(
        diff <= 1.0e-5,
        "expected {expected:?}, got {actual:?} (diff {diff})"
    );
}

#[test]
fn face_normal_follows_counter_clockwise_winding() {
    let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
    assert_vec3_approx(n, Vec3::Z);
    let n = face_normal(Vec3::ZERO, Vec3::Y, Vec3::X);
    assert_vec3_approx(n, -Vec3::Z);
}

#[test]
fn flat_quad_has_uniform_normals() {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(2.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let triangles = vec![[0, 1, 2], [0, 2, 3]];
    let mut normals = Vec::new();
    compute_vertex_normals(&positions, &triangles, &mut normals);

    assert_eq!(normals.len(), 4);
    for n in normals {
        assert_vec3_approx(n, Vec3::Z);
    }
}

#[test]
fn shared_edge_normals_are_area_weighted() {
    // Two faces meeting at a right angle along the X axis: one in the XY plane (normal +Z),
    // one in the XZ plane (normal +Y) with twice the area.
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
    ];
    let triangles = vec![[0, 1, 2], [0, 3, 1]];
    let mut normals = Vec::new();
    compute_vertex_normals(&positions, &triangles, &mut normals);

    let shared = Vec3::new(0.0, 2.0, 1.0).normalize();
    assert_vec3_approx(normals[0], shared);
    assert_vec3_approx(normals[1], shared);
    assert_vec3_approx(normals[2], Vec3::Z);
    assert_vec3_approx(normals[3], Vec3::Y);
}

#[test]
fn isolated_and_degenerate_vertices_use_fallback() {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(5.0, 5.0, 5.0),
    ];
    // Collinear triangle plus one with an out-of-range index.
    let triangles = vec![[0, 1, 2], [0, 1, 9]];
    let mut normals = vec![Vec3::ONE; 10];
    compute_vertex_normals(&positions, &triangles, &mut normals);

    assert_eq!(normals, vec![FALLBACK_NORMAL; 4]);
}

#[test]
fn bounds_of_points() {
    assert_eq!(bounds(&[]), None);
    let (min, max) = bounds(&[
        Vec3::new(1.0, -2.0, 3.0),
        Vec3::new(-1.0, 4.0, 0.0),
        Vec3::new(0.5, 0.0, 7.0),
    ])
    .unwrap();
    assert_eq!(min, Vec3::new(-1.0, -2.0, 0.0));
    assert_eq!(max, Vec3::new(1.0, 4.0, 7.0));
}
