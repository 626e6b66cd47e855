use crate::{Error, Joint};

/// Default number of joint influences per vertex.
pub const MAX_INFLUENCES: usize = 4;

/// Parent-index array of a skeleton.
///
/// Joints are addressed by index. Every non-root joint references a parent with a smaller
/// index, so a single pass in index order visits parents before their children. Joint 0
/// is always a root; further roots are allowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hierarchy {
    parents: Vec<Option<usize>>,
}

impl Hierarchy {
    pub fn new(parents: Vec<Option<usize>>) -> Result<Self, Error> {
        if parents.is_empty() {
            return Err(Error::EmptySkeleton);
        }
        if let Some(parent) = parents[0] {
            return Err(Error::RootNotFirst { parent });
        }
        for (joint, parent) in parents.iter().enumerate() {
            if let Some(parent) = *parent {
                if parent >= joint {
                    return Err(Error::InvalidParent {
                        joint,
                        parent: parent as i64,
                    });
                }
            }
        }
        Ok(Self { parents })
    }

    /// Builds a hierarchy from integer parent indices where any negative value marks a
    /// root (`-1` by convention).
    pub fn from_parent_indices(indices: &[i32]) -> Result<Self, Error> {
        let parents = indices
            .iter()
            .map(|&p| usize::try_from(p).ok())
            .collect::<Vec<_>>();
        if let Some((joint, &parent)) = indices
            .iter()
            .enumerate()
            .find(|&(joint, &p)| joint > 0 && p >= 0 && p as usize >= joint)
        {
            return Err(Error::InvalidParent {
                joint,
                parent: i64::from(parent),
            });
        }
        Self::new(parents)
    }

    /// A single chain where joint `i` is the child of joint `i - 1`.
    pub fn chain(joint_count: usize) -> Result<Self, Error> {
        Self::new(
            (0..joint_count)
                .map(|i| i.checked_sub(1))
                .collect::<Vec<_>>(),
        )
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn parent(&self, joint: usize) -> Option<usize> {
        self.parents.get(joint).copied().flatten()
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    pub fn is_root(&self, joint: usize) -> bool {
        matches!(self.parents.get(joint), Some(None))
    }

    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(joint, parent)| parent.is_none().then_some(joint))
    }

    /// Integer form of the parent array with `-1` for roots.
    pub fn to_parent_indices(&self) -> Vec<i32> {
        self.parents
            .iter()
            .map(|parent| parent.map_or(-1, |p| i32::try_from(p).unwrap_or(i32::MAX)))
            .collect()
    }
}

/// Ordered joint transforms of a whole skeleton (a "skeleton geometry").
///
/// Whether the joints are local or global depends on where the pose came from; see
/// [`local_to_global`](crate::local_to_global).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pose {
    joints: Vec<Joint>,
}

impl Pose {
    pub fn new(joints: Vec<Joint>) -> Self {
        Self { joints }
    }

    pub fn identity(joint_count: usize) -> Self {
        Self {
            joints: vec![Joint::IDENTITY; joint_count],
        }
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joints_mut(&mut self) -> &mut [Joint] {
        &mut self.joints
    }

    pub fn get(&self, joint: usize) -> Option<&Joint> {
        self.joints.get(joint)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Joint> {
        self.joints.iter()
    }

    pub fn into_joints(self) -> Vec<Joint> {
        self.joints
    }
}

impl From<Vec<Joint>> for Pose {
    fn from(joints: Vec<Joint>) -> Self {
        Self::new(joints)
    }
}

impl std::ops::Index<usize> for Pose {
    type Output = Joint;

    fn index(&self, joint: usize) -> &Joint {
        &self.joints[joint]
    }
}

impl<'a> IntoIterator for &'a Pose {
    type Item = &'a Joint;
    type IntoIter = std::slice::Iter<'a, Joint>;

    fn into_iter(self) -> Self::IntoIter {
        self.joints.iter()
    }
}

/// Keyframed animation: local poses sharing one hierarchy, played cyclically.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub name: String,
    keyframes: Vec<Pose>,
}

impl Animation {
    pub fn new(
        name: impl Into<String>,
        keyframes: Vec<Pose>,
        hierarchy: &Hierarchy,
    ) -> Result<Self, Error> {
        if keyframes.is_empty() {
            return Err(Error::EmptyAnimation);
        }
        let expected = hierarchy.len();
        for (keyframe, pose) in keyframes.iter().enumerate() {
            if pose.len() != expected {
                return Err(Error::KeyframeShape {
                    keyframe,
                    expected,
                    actual: pose.len(),
                });
            }
        }
        let name = name.into();
        log::debug!(
            "animation '{name}': {} keyframes of {expected} joints",
            keyframes.len()
        );
        Ok(Self { name, keyframes })
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    pub fn joint_count(&self) -> usize {
        self.keyframes.first().map_or(0, Pose::len)
    }

    pub fn keyframes(&self) -> &[Pose] {
        &self.keyframes
    }

    pub fn keyframe(&self, index: usize) -> Option<&Pose> {
        self.keyframes.get(index)
    }
}

/// Accepted deviation of a vertex's weight sum from 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WeightTolerance(pub f32);

impl Default for WeightTolerance {
    fn default() -> Self {
        Self(1.0e-3)
    }
}

/// Joint influences of one vertex, in a fixed number of slots.
///
/// Unused slots have weight 0 (and joint 0), so blending always walks all `N` slots.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexWeights<const N: usize = MAX_INFLUENCES> {
    pub joints: [usize; N],
    pub weights: [f32; N],
}

impl<const N: usize> Default for VertexWeights<N> {
    fn default() -> Self {
        Self {
            joints: [0; N],
            weights: [0.0; N],
        }
    }
}

impl<const N: usize> VertexWeights<N> {
    /// Fully bound to a single joint.
    pub fn single(joint: usize) -> Self {
        let mut out = Self::default();
        if N > 0 {
            out.joints[0] = joint;
            out.weights[0] = 1.0;
        }
        out
    }

    /// Builds weights from `(joint, weight)` pairs; fails when there are more than `N`.
    pub fn from_pairs(pairs: &[(usize, f32)]) -> Option<Self> {
        if pairs.len() > N {
            return None;
        }
        let mut out = Self::default();
        for (slot, &(joint, weight)) in pairs.iter().enumerate() {
            out.joints[slot] = joint;
            out.weights[slot] = weight;
        }
        Some(out)
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Rescales the weights to sum to 1. All-zero weights are left untouched.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            for w in &mut self.weights {
                *w /= sum;
            }
        }
    }

    /// Non-zero `(joint, weight)` pairs.
    pub fn influences(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.joints
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
            .filter(|&(_, w)| w != 0.0)
    }

    /// Checks the load-time invariants: finite non-negative weights summing to 1 and
    /// influencing joints below `joint_count`.
    pub fn validate(
        &self,
        vertex: usize,
        joint_count: usize,
        tolerance: WeightTolerance,
    ) -> Result<(), Error> {
        for (&joint, &weight) in self.joints.iter().zip(&self.weights) {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidWeight { vertex, weight });
            }
            if weight > 0.0 && joint >= joint_count {
                return Err(Error::UnknownJoint {
                    vertex,
                    joint,
                    joint_count,
                });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > tolerance.0 {
            return Err(Error::InvalidWeightSum { vertex, sum });
        }
        Ok(())
    }
}
