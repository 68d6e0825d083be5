use cgmath::InnerSpace;

pub type Vector2 = cgmath::Vector2<f32>;
pub type Vector3 = cgmath::Vector3<f32>;

/// Squared lengths below this are treated as zero.
pub const EPSILON_SQ: f32 = 1e-12;

/// Normalizes `v`, returning `None` for a zero-length vector.
pub fn try_normalize(v: Vector2) -> Option<Vector2> {
    let len2 = v.magnitude2();
    if len2 < EPSILON_SQ || !len2.is_finite() {
        None
    } else {
        Some(v / len2.sqrt())
    }
}

/// Rotates `v` by -90 degrees.
pub fn perpendicular(v: Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

/// Arithmetic mean of a set of points, `None` if empty.
pub fn centroid(points: impl IntoIterator<Item = Vector2>) -> Option<Vector2> {
    let mut sum = Vector2::new(0.0, 0.0);
    let mut n = 0;
    for p in points {
        sum += p;
        n += 1;
    }
    (n > 0).then(|| sum / n as f32)
}
