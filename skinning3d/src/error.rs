use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("skeleton has no joints")]
    EmptySkeleton,

    #[error("joint 0 must be a root, found parent {parent}")]
    RootNotFirst { parent: usize },

    #[error("joint {joint} references parent {parent}, which is not an earlier joint")]
    InvalidParent { joint: usize, parent: i64 },

    #[error("joint count mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("animation has no keyframes")]
    EmptyAnimation,

    #[error("keyframe {keyframe} has {actual} joints, skeleton has {expected}")]
    KeyframeShape {
        keyframe: usize,
        expected: usize,
        actual: usize,
    },

    #[error("vertex {vertex} weights sum to {sum}, expected 1")]
    InvalidWeightSum { vertex: usize, sum: f32 },

    #[error("vertex {vertex} has invalid weight {weight}")]
    InvalidWeight { vertex: usize, weight: f32 },

    #[error("vertex {vertex} references joint {joint}, skeleton has {joint_count} joints")]
    UnknownJoint {
        vertex: usize,
        joint: usize,
        joint_count: usize,
    },

    #[error("vertex {vertex} has more than {capacity} influences")]
    TooManyInfluences { vertex: usize, capacity: usize },

    #[error("mesh has {positions} positions but {weights} weight assignments")]
    WeightCountMismatch { positions: usize, weights: usize },

    #[error("triangle {triangle} references vertex {index}, mesh has {vertex_count} vertices")]
    InvalidTriangle {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("unknown animation: {name}")]
    UnknownAnimation { name: String },

    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[cfg(feature = "json")]
    #[error("failed to parse asset JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "json")]
    #[error("unsupported asset format version {found}, expected {expected}")]
    JsonVersion { found: u32, expected: u32 },

    #[cfg(feature = "json")]
    #[error("unknown parent joint '{parent}' for joint '{joint}'")]
    JsonUnknownParent { joint: String, parent: String },

    #[cfg(feature = "json")]
    #[error("duplicate joint name '{name}'")]
    JsonDuplicateJoint { name: String },
}
