use crate::{
    Animation, AnimationState, BoneLines, Error, FrameCursor, MAX_INFLUENCES, Mesh, Pose,
    Skeleton, local_to_global_into,
};
use std::sync::Arc;

/// Animated skinned mesh: runs the whole per-frame pose pipeline.
///
/// Skeleton and animation are shared assets; the mesh and the scratch poses are owned
/// and rewritten in place on every [`Character::update`].
#[derive(Clone, Debug)]
pub struct Character<const N: usize = MAX_INFLUENCES> {
    skeleton: Arc<Skeleton>,
    animation: Arc<Animation>,
    mesh: Mesh<N>,
    state: AnimationState,
    local_pose: Pose,
    global_pose: Pose,
    skinning_transforms: Pose,
}

impl<const N: usize> Character<N> {
    pub fn new(
        skeleton: Arc<Skeleton>,
        animation: Arc<Animation>,
        mesh: Mesh<N>,
        frame_duration: f32,
    ) -> Result<Self, Error> {
        if animation.joint_count() != skeleton.joint_count() {
            return Err(Error::ShapeMismatch {
                expected: skeleton.joint_count(),
                actual: animation.joint_count(),
            });
        }
        if mesh.required_joint_count() > skeleton.joint_count() {
            return Err(Error::ShapeMismatch {
                expected: skeleton.joint_count(),
                actual: mesh.required_joint_count(),
            });
        }
        let state = AnimationState::new(animation.keyframe_count(), frame_duration)?;
        let mut character = Self {
            skeleton,
            animation,
            mesh,
            state,
            local_pose: Pose::default(),
            global_pose: Pose::default(),
            skinning_transforms: Pose::default(),
        };
        character.pose_at(FrameCursor::default())?;
        Ok(character)
    }

    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    pub fn animation(&self) -> &Arc<Animation> {
        &self.animation
    }

    pub fn mesh(&self) -> &Mesh<N> {
        &self.mesh
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AnimationState {
        &mut self.state
    }

    /// Local pose of the last update.
    pub fn local_pose(&self) -> &Pose {
        &self.local_pose
    }

    /// World-space pose of the last update.
    pub fn global_pose(&self) -> &Pose {
        &self.global_pose
    }

    /// Skinning transforms of the last update.
    pub fn skinning_transforms(&self) -> &Pose {
        &self.skinning_transforms
    }

    /// Advances the clock by `delta` and deforms the mesh for the new time.
    pub fn update(&mut self, delta: f32) -> Result<(), Error> {
        let cursor = self.state.update(delta);
        self.pose_at(cursor)
    }

    /// Samples the animation at `cursor`, resolves it and skins the mesh.
    pub fn pose_at(&mut self, cursor: FrameCursor) -> Result<(), Error> {
        self.animation
            .sample_into(cursor.index, cursor.phase, &mut self.local_pose);
        local_to_global_into(
            &self.local_pose,
            self.skeleton.hierarchy(),
            &mut self.global_pose,
        )?;
        self.skeleton
            .skinning_transforms_into(&self.global_pose, &mut self.skinning_transforms)?;
        self.mesh.skin(&self.skinning_transforms);
        Ok(())
    }

    /// Skeleton segments of the current pose for line rendering.
    pub fn bone_lines(&self) -> BoneLines {
        BoneLines::from_pose(&self.global_pose, self.skeleton.hierarchy())
    }
}
