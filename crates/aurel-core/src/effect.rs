//! Core stage trait.
//!
//! Every node between capture and the analysis tap implements [`Effect`].
//! Stages are single-input/single-output stereo processors: one frame
//! `(left, right)` in, one frame out.
//!
//! ## Design Decisions
//!
//! - **Stereo frames**: Capture is duplicated to both channels before the
//!   first stage, so every stage sees a stereo frame and the panner can fold
//!   channels without a mono/stereo branch in the hot path.
//! - **Object-safe**: `dyn Effect` works for tests and tooling; the live
//!   chain uses concrete types in a fixed order.
//! - **No allocations**: All methods are called from the real-time audio
//!   callback.

/// Core trait for all signal chain stages.
///
/// # Example
///
/// ```rust
/// use aurel_core::Effect;
///
/// struct Invert;
///
/// impl Effect for Invert {
///     fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
///         (-left, -right)
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Effect {
    /// Process a single stereo frame.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process two channel buffers in place.
    ///
    /// Default implementation calls `process_stereo()` for each frame.
    fn process_block_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(
            left.len(),
            right.len(),
            "Left and right buffers must have same length"
        );
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (out_l, out_r) = self.process_stereo(*l, *r);
            *l = out_l;
            *r = out_r;
        }
    }

    /// Update the sample rate and recalculate rate-dependent state.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state (filter history, parameter ramps) without
    /// changing parameter targets.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scale(f32);

    impl Effect for Scale {
        fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
            (left * self.0, right * self.0)
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
    }

    #[test]
    fn test_block_default_processes_every_frame() {
        let mut stage = Scale(2.0);
        let mut left = [1.0, 2.0, 3.0];
        let mut right = [0.5, 0.25, 0.0];
        stage.process_block_stereo(&mut left, &mut right);
        assert_eq!(left, [2.0, 4.0, 6.0]);
        assert_eq!(right, [1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_object_safe() {
        let mut stages: [Box<dyn Effect>; 2] = [Box::new(Scale(2.0)), Box::new(Scale(0.25))];
        let mut frame = (1.0, 1.0);
        for stage in stages.iter_mut() {
            frame = stage.process_stereo(frame.0, frame.1);
        }
        assert_eq!(frame, (0.5, 0.5));
    }
}
