//! Shared-element transition between the list thumbnail and the detail poster
//!
//! Both sides tag the poster with a transition key. When the keys match the
//! detail poster grows from the thumbnail width to its full width; when they
//! don't, the detail screen simply appears at full size.

use std::time::{Duration, Instant};

/// What the source screen hands over when starting a transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSpec {
    /// Key of the source element
    pub key: String,
    /// Width the element had on the source screen
    pub from_width: f32,
}

impl TransitionSpec {
    pub fn new(key: impl Into<String>, from_width: f32) -> Self {
        Self {
            key: key.into(),
            from_width,
        }
    }
}

/// A running grow animation on the destination side
#[derive(Debug, Clone, PartialEq)]
pub struct SharedElement {
    started: Instant,
    duration: Duration,
    from_width: f32,
}

impl SharedElement {
    /// Start the animation if the source key matches the destination key
    pub fn begin(
        spec: &TransitionSpec,
        destination_key: &str,
        now: Instant,
        duration: Duration,
    ) -> Option<Self> {
        if spec.key != destination_key {
            tracing::debug!(
                source = %spec.key,
                destination = %destination_key,
                "transition keys differ, skipping shared element"
            );
            return None;
        }

        Some(Self {
            started: now,
            duration,
            from_width: spec.from_width,
        })
    }

    /// Eased progress in 0.0..=1.0
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        // Ease-out cubic
        1.0 - (1.0 - t).powi(3)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Width of the element at `now`, growing towards `to_width`
    pub fn width_at(&self, now: Instant, to_width: f32) -> f32 {
        self.from_width + (to_width - self.from_width) * self.progress(now)
    }
}
