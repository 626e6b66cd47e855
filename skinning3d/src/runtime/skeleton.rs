use crate::{Error, Hierarchy, Joint, Pose};
use glam::Vec3;

/// Resolves a local pose into world space.
///
/// Joints are visited in index order, which the [`Hierarchy`] invariant guarantees to
/// reach every parent before its children. Roots keep their local transform; any other
/// joint becomes `global[parent].compose(local[joint])`.
pub fn local_to_global(local: &Pose, hierarchy: &Hierarchy) -> Result<Pose, Error> {
    let mut global = Pose::default();
    local_to_global_into(local, hierarchy, &mut global)?;
    Ok(global)
}

/// Same as [`local_to_global`], reusing the allocation of `out`.
pub fn local_to_global_into(
    local: &Pose,
    hierarchy: &Hierarchy,
    out: &mut Pose,
) -> Result<(), Error> {
    check_joint_count(hierarchy.len(), local.len())?;

    let mut joints = std::mem::take(out).into_joints();
    joints.clear();
    joints.reserve(local.len());
    for (index, joint) in local.iter().enumerate() {
        let world = match hierarchy.parent(index) {
            Some(parent) => joints[parent].compose(joint),
            None => *joint,
        };
        joints.push(world);
    }
    *out = Pose::new(joints);
    Ok(())
}

/// Line segments from every non-root joint's parent to the joint, as a flat list of
/// endpoint pairs (`[parent, child, parent, child, ...]`), in joint order.
pub fn extract_bones(global: &Pose, hierarchy: &Hierarchy) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(hierarchy.len().saturating_sub(1) * 2);
    for (index, joint) in global.iter().enumerate() {
        let Some(parent) = hierarchy.parent(index) else {
            continue;
        };
        let Some(parent) = global.get(parent) else {
            continue;
        };
        out.push(parent.position);
        out.push(joint.position);
    }
    out
}

impl Pose {
    /// Per-joint inverse transform.
    pub fn inverse(&self) -> Pose {
        Pose::new(self.iter().map(Joint::inverse).collect())
    }

    /// Joint-wise composition `self[i].compose(other[i])`.
    ///
    /// Both poses must have the same number of joints.
    pub fn multiply(&self, other: &Pose) -> Result<Pose, Error> {
        let mut out = Pose::default();
        self.multiply_into(other, &mut out)?;
        Ok(out)
    }

    /// Same as [`Pose::multiply`], reusing the allocation of `out`.
    pub fn multiply_into(&self, other: &Pose, out: &mut Pose) -> Result<(), Error> {
        check_joint_count(self.len(), other.len())?;
        let mut joints = std::mem::take(out).into_joints();
        joints.clear();
        joints.extend(self.iter().zip(other.iter()).map(|(a, b)| a.compose(b)));
        *out = Pose::new(joints);
        Ok(())
    }
}

fn check_joint_count(expected: usize, actual: usize) -> Result<(), Error> {
    if expected != actual {
        return Err(Error::ShapeMismatch { expected, actual });
    }
    Ok(())
}

/// Skeleton asset: hierarchy, bind pose and the bind-pose transforms derived from them.
///
/// The global bind pose and its inverse are computed once in [`Skeleton::new`] and never
/// change afterwards; share the skeleton through an `Arc` between the meshes and
/// animations that use it.
#[derive(Clone, Debug)]
pub struct Skeleton {
    hierarchy: Hierarchy,
    names: Vec<String>,
    bind_pose: Pose,
    global_bind_pose: Pose,
    inverse_bind_pose: Pose,
}

impl Skeleton {
    pub fn new(hierarchy: Hierarchy, bind_pose: Pose) -> Result<Self, Error> {
        let global_bind_pose = local_to_global(&bind_pose, &hierarchy)?;
        let inverse_bind_pose = global_bind_pose.inverse();
        log::debug!(
            "skeleton: {} joints, {} roots",
            hierarchy.len(),
            hierarchy.roots().count()
        );
        Ok(Self {
            hierarchy,
            names: Vec::new(),
            bind_pose,
            global_bind_pose,
            inverse_bind_pose,
        })
    }

    /// Like [`Skeleton::new`], with one name per joint.
    pub fn with_names(
        hierarchy: Hierarchy,
        bind_pose: Pose,
        names: Vec<String>,
    ) -> Result<Self, Error> {
        check_joint_count(hierarchy.len(), names.len())?;
        let mut skeleton = Self::new(hierarchy, bind_pose)?;
        skeleton.names = names;
        Ok(skeleton)
    }

    pub fn joint_count(&self) -> usize {
        self.hierarchy.len()
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn joint_name(&self, joint: usize) -> Option<&str> {
        self.names.get(joint).map(String::as_str)
    }

    pub fn find_joint(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Local bind pose, as supplied by the loader.
    pub fn bind_pose(&self) -> &Pose {
        &self.bind_pose
    }

    pub fn global_bind_pose(&self) -> &Pose {
        &self.global_bind_pose
    }

    pub fn inverse_bind_pose(&self) -> &Pose {
        &self.inverse_bind_pose
    }

    /// Resolves a local pose of this skeleton into world space.
    pub fn global_pose(&self, local: &Pose) -> Result<Pose, Error> {
        local_to_global(local, &self.hierarchy)
    }

    /// Transforms carrying bind-pose vertices into the given world pose:
    /// `global_pose[i].compose(inverse_bind_pose[i])` for every joint.
    pub fn skinning_transforms(&self, global_pose: &Pose) -> Result<Pose, Error> {
        global_pose.multiply(&self.inverse_bind_pose)
    }

    /// Same as [`Skeleton::skinning_transforms`], reusing the allocation of `out`.
    pub fn skinning_transforms_into(
        &self,
        global_pose: &Pose,
        out: &mut Pose,
    ) -> Result<(), Error> {
        global_pose.multiply_into(&self.inverse_bind_pose, out)
    }

    pub fn bones(&self, global_pose: &Pose) -> Vec<Vec3> {
        extract_bones(global_pose, &self.hierarchy)
    }
}
