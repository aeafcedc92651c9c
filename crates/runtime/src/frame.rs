use foundation::time::Time;

/// Upper bound on a single frame step; a backgrounded tab can hand us a
/// multi-second delta that would make the globe jump.
pub const MAX_FRAME_DT_S: f64 = 0.1;

/// Per-frame timing metadata.
///
/// Frames are driven by the host's display refresh, so `dt_s` varies. Every
/// animated quantity is a function of `time` or of accumulated `dt_s`, which
/// keeps a recorded sequence of deltas replayable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta since the previous frame (seconds), clamped to `[0, MAX_FRAME_DT_S]`.
    pub dt_s: f64,
    /// Time at the start of the frame (seconds since mount).
    pub time: Time,
}

impl Frame {
    pub fn first() -> Self {
        Self {
            index: 0,
            dt_s: 0.0,
            time: Time::ZERO,
        }
    }

    /// The following frame after `dt_s` seconds of wall time.
    pub fn next(self, dt_s: f64) -> Self {
        let dt_s = if dt_s.is_finite() {
            dt_s.clamp(0.0, MAX_FRAME_DT_S)
        } else {
            0.0
        };
        Self {
            index: self.index.wrapping_add(1),
            dt_s,
            time: self.time.advanced(dt_s),
        }
    }
}
