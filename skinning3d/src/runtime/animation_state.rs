use crate::{Error, FrameCursor};

/// Playback clock for a cyclic keyframe animation.
///
/// Accumulates elapsed time and advances the keyframe index each time a full
/// `frame_duration` has elapsed. The leftover time is kept, so the phase handed to the
/// sampler stays in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct AnimationState {
    keyframe_count: usize,
    frame_duration: f32,
    elapsed: f32,
    index: usize,
}

impl AnimationState {
    pub fn new(keyframe_count: usize, frame_duration: f32) -> Result<Self, Error> {
        if keyframe_count == 0 {
            return Err(Error::EmptyAnimation);
        }
        if !frame_duration.is_finite() || frame_duration <= 0.0 {
            return Err(Error::InvalidValue {
                message: format!("frame duration must be positive, got {frame_duration}"),
            });
        }
        Ok(Self {
            keyframe_count,
            frame_duration,
            elapsed: 0.0,
            index: 0,
        })
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframe_count
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    /// Time elapsed since the current keyframe was entered.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cursor(&self) -> FrameCursor {
        let phase = (self.elapsed / self.frame_duration).clamp(0.0, 1.0);
        // Guard against rounding right below a frame boundary.
        let phase = if phase >= 1.0 { 0.0 } else { phase };
        FrameCursor::new(self.index, phase)
    }

    /// Advances the clock by `delta`. Negative and non-finite deltas are ignored.
    pub fn update(&mut self, delta: f32) -> FrameCursor {
        if delta.is_finite() && delta > 0.0 {
            self.elapsed += delta;
            if self.elapsed >= self.frame_duration {
                let frames = (self.elapsed / self.frame_duration).floor();
                self.elapsed -= frames * self.frame_duration;
                if self.elapsed < 0.0 || self.elapsed >= self.frame_duration {
                    self.elapsed = 0.0;
                }
                let advance = (frames as usize) % self.keyframe_count;
                self.index = (self.index + advance) % self.keyframe_count;
                log::trace!("keyframe advanced to {}", self.index);
            }
        }
        self.cursor()
    }

    /// Restarts the timer of the current keyframe.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    /// Jumps to `index` (modulo the keyframe count) with a restarted timer.
    pub fn set_index(&mut self, index: usize) {
        self.index = index % self.keyframe_count;
        self.elapsed = 0.0;
    }
}
