use crate::constants::MAX_FRAME_STEP_SEC;
use instant::Instant;
use std::time::Duration;

/// Measures the time between animation frames.
///
/// The first sample yields a zero step; later steps are clamped so a frame
/// that arrives after a long pause (hidden tab, debugger) does not jump the
/// scene forward.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    last: Option<Instant>,
    max_step: Duration,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(Duration::from_secs_f32(MAX_FRAME_STEP_SEC))
    }
}

impl AnimationClock {
    pub fn new(max_step: Duration) -> Self {
        Self {
            last: None,
            max_step,
        }
    }

    pub fn step(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(prev) if now > prev => (now - prev).min(self.max_step),
            Some(_) => Duration::ZERO,
            None => Duration::ZERO,
        };
        self.last = Some(now);
        dt
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
