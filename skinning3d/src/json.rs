//! JSON asset loading (feature `json`).
//!
//! Skeleton asset layout:
//!
//! ```json
//! {
//!   "version": 1,
//!   "joints": [
//!     { "name": "root", "position": [0, 0, 0], "orientation": [0, 0, 0, 1] },
//!     { "name": "arm", "parent": "root", "position": [0, 0, 25] }
//!   ],
//!   "animations": {
//!     "bend": [
//!       [{}, { "orientation": [0, 0.2588, 0, 0.9659] }]
//!     ]
//!   }
//! }
//! ```
//!
//! Orientations are `[x, y, z, w]` quaternions and are normalized on load. Joint fields
//! missing from a keyframe keep their bind-pose value.
//!
//! Mesh layout: `positions` (`[x, y, z]`), `triangles` (`[a, b, c]`) and per-vertex
//! `weights` as lists of `[joint, weight]` pairs.

use crate::{
    ASSET_FORMAT_VERSION, Animation, Error, Hierarchy, Joint, Mesh, Pose, Skeleton,
    VertexWeights, renormalize,
};
use glam::{Quat, Vec3};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SkeletonRoot {
    #[serde(default)]
    version: Option<u32>,
    joints: Vec<JointDef>,
    #[serde(default)]
    animations: BTreeMap<String, Vec<Vec<KeyframeJointDef>>>,
}

#[derive(Debug, Deserialize)]
struct JointDef {
    name: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    position: [f32; 3],
    #[serde(default = "identity_orientation")]
    orientation: [f32; 4],
}

#[derive(Debug, Default, Deserialize)]
struct KeyframeJointDef {
    #[serde(default)]
    position: Option<[f32; 3]>,
    #[serde(default)]
    orientation: Option<[f32; 4]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeshRoot {
    #[serde(default)]
    version: Option<u32>,
    positions: Vec<[f32; 3]>,
    #[serde(default)]
    triangles: Vec<[u32; 3]>,
    weights: Vec<Vec<(usize, f32)>>,
}

fn identity_orientation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn check_version(version: Option<u32>) -> Result<(), Error> {
    match version {
        Some(found) if found != ASSET_FORMAT_VERSION => Err(Error::JsonVersion {
            found,
            expected: ASSET_FORMAT_VERSION,
        }),
        _ => Ok(()),
    }
}

fn orientation_from_array(v: [f32; 4]) -> Quat {
    renormalize(Quat::from_array(v))
}

/// Skeleton together with the animations stored in the same file.
#[derive(Clone, Debug)]
pub struct SkeletonAsset {
    pub skeleton: Arc<Skeleton>,
    animations: Vec<Arc<Animation>>,
}

impl SkeletonAsset {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let root: SkeletonRoot = serde_json::from_str(json).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;
        check_version(root.version)?;

        let mut index_by_name = HashMap::<&str, usize>::new();
        let mut parents = Vec::with_capacity(root.joints.len());
        let mut bind = Vec::with_capacity(root.joints.len());
        for (index, joint) in root.joints.iter().enumerate() {
            let parent = match &joint.parent {
                Some(parent) => Some(*index_by_name.get(parent.as_str()).ok_or_else(|| {
                    Error::JsonUnknownParent {
                        joint: joint.name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };
            if index_by_name.insert(joint.name.as_str(), index).is_some() {
                return Err(Error::JsonDuplicateJoint {
                    name: joint.name.clone(),
                });
            }
            parents.push(parent);
            bind.push(Joint::new(
                Vec3::from_array(joint.position),
                orientation_from_array(joint.orientation),
            ));
        }

        let hierarchy = Hierarchy::new(parents)?;
        let names = root.joints.iter().map(|j| j.name.clone()).collect();
        let skeleton = Skeleton::with_names(hierarchy, Pose::new(bind), names)?;

        let mut animations = Vec::with_capacity(root.animations.len());
        for (name, keyframes) in root.animations {
            let keyframes = keyframes
                .into_iter()
                .map(|keyframe| keyframe_pose(&skeleton, keyframe))
                .collect::<Vec<_>>();
            animations.push(Arc::new(Animation::new(
                name,
                keyframes,
                skeleton.hierarchy(),
            )?));
        }

        Ok(Self {
            skeleton: Arc::new(skeleton),
            animations,
        })
    }

    pub fn animations(&self) -> &[Arc<Animation>] {
        &self.animations
    }

    pub fn animation(&self, name: &str) -> Result<&Arc<Animation>, Error> {
        self.animations
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| Error::UnknownAnimation {
                name: name.to_string(),
            })
    }
}

/// Keyframe joints fall back to the bind pose; extra entries are kept so that
/// `Animation::new` reports the joint count mismatch.
fn keyframe_pose(skeleton: &Skeleton, keyframe: Vec<KeyframeJointDef>) -> Pose {
    let bind = skeleton.bind_pose();
    Pose::new(
        keyframe
            .into_iter()
            .enumerate()
            .map(|(index, def)| {
                let base = bind.get(index).copied().unwrap_or(Joint::IDENTITY);
                Joint::new(
                    def.position.map_or(base.position, Vec3::from_array),
                    def.orientation
                        .map_or(base.orientation, orientation_from_array),
                )
            })
            .collect(),
    )
}

impl<const N: usize> Mesh<N> {
    /// Loads a mesh and validates its weights against a skeleton of `joint_count` joints.
    pub fn from_json_str(json: &str, joint_count: usize) -> Result<Self, Error> {
        let root: MeshRoot = serde_json::from_str(json).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;
        check_version(root.version)?;

        let weights = root
            .weights
            .iter()
            .enumerate()
            .map(|(vertex, pairs)| {
                VertexWeights::<N>::from_pairs(pairs).ok_or(Error::TooManyInfluences {
                    vertex,
                    capacity: N,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Mesh::new(
            root.positions.into_iter().map(Vec3::from_array).collect(),
            root.triangles,
            weights,
            joint_count,
        )
    }
}
