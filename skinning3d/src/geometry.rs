use glam::Vec3;

/// Normal assigned to vertices that touch no non-degenerate triangle.
pub(crate) const FALLBACK_NORMAL: Vec3 = Vec3::Z;

/// Area-weighted vertex normals: each triangle adds its unnormalized face normal
/// (`(b - a) x (c - a)`) to its three vertices, then every sum is normalized.
///
/// Triangles with out-of-range indices are ignored.
pub(crate) fn compute_vertex_normals(
    positions: &[Vec3],
    triangles: &[[u32; 3]],
    normals: &mut Vec<Vec3>,
) {
    normals.clear();
    normals.resize(positions.len(), Vec3::ZERO);

    for tri in triangles {
        let [i0, i1, i2] = tri.map(|i| i as usize);
        let (Some(&a), Some(&b), Some(&c)) =
            (positions.get(i0), positions.get(i1), positions.get(i2))
        else {
            continue;
        };
        let face = face_normal(a, b, c);
        normals[i0] += face;
        normals[i1] += face;
        normals[i2] += face;
    }

    for n in normals.iter_mut() {
        *n = n.try_normalize().unwrap_or(FALLBACK_NORMAL);
    }
}

/// Unnormalized normal of triangle `abc`; its length is twice the triangle area.
pub(crate) fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}

/// Axis-aligned bounds of a point set, `None` when empty.
pub(crate) fn bounds(points: &[Vec3]) -> Option<(Vec3, Vec3)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
    )
}
