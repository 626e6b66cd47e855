use glam::{Quat, Vec3};

/// Below this squared length an axis or quaternion is treated as degenerate.
const DEGENERATE_LENGTH_SQUARED: f32 = 1.0e-12;

/// Above this cosine the two rotations are close enough that normalized lerp is used
/// instead of slerp (the slerp weights divide by `sin(theta)`).
const NLERP_DOT_THRESHOLD: f32 = 0.9995;

/// Rigid transform of a joint: a rotation followed by a translation.
///
/// In a local pose the transform is relative to the parent joint (or to the world for a
/// root); in a global pose it is relative to the world origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Joint {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Joint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Joint {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }

    /// Composes two transforms; `self.compose(other)` applies `other` first, then `self`.
    ///
    /// With `self` a parent's global transform and `other` a child's local transform this
    /// yields the child's global transform.
    pub fn compose(&self, other: &Joint) -> Joint {
        Joint {
            position: self.position + self.orientation * other.position,
            orientation: renormalize(self.orientation * other.orientation),
        }
    }

    /// Inverse rigid transform: conjugate rotation and the counter-rotated negated
    /// translation, so that `t.compose(&t.inverse())` is the identity.
    pub fn inverse(&self) -> Joint {
        let orientation = self.orientation.conjugate();
        Joint {
            position: -(orientation * self.position),
            orientation,
        }
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.orientation * point + self.position
    }

    pub fn rotate_vector(&self, vector: Vec3) -> Vec3 {
        self.orientation * vector
    }

    /// Linear interpolation of the position and shortest-arc interpolation of the
    /// orientation. `alpha <= 0` returns `self` unchanged.
    pub fn interpolate(&self, other: &Joint, alpha: f32) -> Joint {
        if alpha.is_nan() || alpha <= 0.0 {
            return *self;
        }
        Joint {
            position: self.position.lerp(other.position, alpha),
            orientation: interpolate_rotation(self.orientation, other.orientation, alpha),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.orientation.is_finite()
    }

    pub fn abs_diff_eq(&self, other: &Joint, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && same_rotation(self.orientation, other.orientation, max_abs_diff)
    }
}

/// Rotation of `angle` radians about `axis`. The axis does not need to be normalized; a
/// zero-length or non-finite axis gives the identity rotation.
pub fn rotation_from_axis_angle(axis: Vec3, angle: f32) -> Quat {
    let length_squared = axis.length_squared();
    if !length_squared.is_finite() || length_squared <= DEGENERATE_LENGTH_SQUARED {
        return Quat::IDENTITY;
    }
    Quat::from_axis_angle(axis / length_squared.sqrt(), angle)
}

/// Normalizes `q`, falling back to the identity for degenerate input.
pub fn renormalize(q: Quat) -> Quat {
    let length_squared = q.length_squared();
    if !length_squared.is_finite() || length_squared <= DEGENERATE_LENGTH_SQUARED {
        return Quat::IDENTITY;
    }
    q / length_squared.sqrt()
}

/// Spherical interpolation from `from` to `to` along the shorter of the two arcs.
///
/// `to` is negated when the operands lie in opposite hemispheres. `alpha <= 0` returns
/// `from` exactly and `alpha >= 1` returns `to` (possibly negated, which is the same
/// rotation). The result is renormalized.
pub fn interpolate_rotation(from: Quat, to: Quat, alpha: f32) -> Quat {
    if alpha.is_nan() || alpha <= 0.0 {
        return from;
    }

    let mut dot = from.dot(to);
    let to = if dot < 0.0 {
        dot = -dot;
        -to
    } else {
        to
    };

    if alpha >= 1.0 {
        return renormalize(to);
    }

    if dot > NLERP_DOT_THRESHOLD {
        return renormalize(from * (1.0 - alpha) + to * alpha);
    }

    let theta = dot.min(1.0).acos();
    let sin_theta = theta.sin();
    let w_from = ((1.0 - alpha) * theta).sin() / sin_theta;
    let w_to = (alpha * theta).sin() / sin_theta;
    renormalize(from * w_from + to * w_to)
}

/// True when `a` and `b` describe the same rotation (`q` and `-q` are equivalent).
pub fn same_rotation(a: Quat, b: Quat, max_abs_diff: f32) -> bool {
    a.abs_diff_eq(b, max_abs_diff) || a.abs_diff_eq(-b, max_abs_diff)
}
