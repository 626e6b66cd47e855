use crate::{Animation, Pose};

/// Position inside a cyclic keyframe sequence: a keyframe index plus the fraction of the
/// way to the next keyframe.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameCursor {
    pub index: usize,
    pub phase: f32,
}

impl FrameCursor {
    pub fn new(index: usize, phase: f32) -> Self {
        Self { index, phase }
    }
}

impl Animation {
    /// Interpolated local pose between keyframe `index` and keyframe `index + 1`
    /// (wrapping to the first keyframe after the last one).
    ///
    /// `index` is taken modulo the keyframe count and `phase` is clamped to `[0, 1]`. A
    /// phase of 0 returns the stored keyframe unchanged.
    pub fn sample(&self, index: usize, phase: f32) -> Pose {
        let mut out = Pose::default();
        self.sample_into(index, phase, &mut out);
        out
    }

    pub fn sample_at(&self, cursor: FrameCursor) -> Pose {
        self.sample(cursor.index, cursor.phase)
    }

    /// Same as [`Animation::sample`], reusing the allocation of `out`.
    pub fn sample_into(&self, index: usize, phase: f32, out: &mut Pose) {
        let keyframes = self.keyframes();
        let count = keyframes.len();
        let mut joints = std::mem::take(out).into_joints();
        joints.clear();
        if count == 0 {
            *out = Pose::new(joints);
            return;
        }

        let current = &keyframes[index % count];
        let phase = if phase.is_nan() {
            0.0
        } else {
            phase.clamp(0.0, 1.0)
        };
        if phase == 0.0 || count == 1 {
            joints.extend_from_slice(current.joints());
        } else {
            let next = &keyframes[(index + 1) % count];
            joints.extend(
                current
                    .iter()
                    .zip(next.iter())
                    .map(|(a, b)| a.interpolate(b, phase)),
            );
        }
        *out = Pose::new(joints);
    }
}
