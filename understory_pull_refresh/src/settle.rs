// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle animations: moving the surface offset back to rest or to the hold
//! position after a gesture ends.
//!
//! The core does not own a rendering clock. A [`SettleAnimation`] is a plain
//! description (start value, end value, start time, duration) that the host
//! interpolates with whatever easing it likes; [`SettleAnimation::offset_at`]
//! provides linear interpolation for hosts without one and for cancellation.
//!
//! [`SettleAnimator`] owns at most one animation at a time and registers its
//! completion as a task in a [`Scheduler`]. Completion is reported exactly
//! once: [`SettleAnimator::complete`] only accepts the token of the animation
//! that is still current.

use core::time::Duration;

use crate::config::PullConfig;
use crate::schedule::{Scheduler, TaskToken};

/// Why an animation is running.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SettleKind {
    /// Returning to offset zero.
    ToRest,
    /// Springing to the hold position after a release past the critical point.
    ToSpring,
    /// Springing to the header's hold position for a programmatic refresh.
    Programmatic,
}

/// An in-flight animation of the surface offset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SettleAnimation {
    /// Why the animation is running.
    pub kind: SettleKind,
    /// Surface offset at the start.
    pub from: f64,
    /// Surface offset at the end.
    pub to: f64,
    /// Host time at which the animation started.
    pub start: Duration,
    /// Length of the animation.
    pub duration: Duration,
}

impl SettleAnimation {
    /// Host time at which the animation reaches `to`.
    #[must_use]
    pub fn end(&self) -> Duration {
        self.start.saturating_add(self.duration)
    }

    /// Linear progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Linearly interpolated surface offset at `now`.
    #[must_use]
    pub fn offset_at(&self, now: Duration) -> f64 {
        let t = self.progress(now);
        if t >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * t
        }
    }
}

/// Snap-back duration for a surface offset.
///
/// Proportional to how far out the content is relative to its own extent,
/// never shorter than [`PullConfig::min_rest_duration`].
#[must_use]
pub fn rest_duration(offset: f64, content_extent: f64, config: &PullConfig) -> Duration {
    if content_extent <= 0.0 {
        return config.min_rest_duration;
    }
    let ratio = (offset / content_extent).abs();
    Duration::try_from_secs_f64(config.rest_duration_scale.as_secs_f64() * ratio)
        .map_or(config.min_rest_duration, |scaled| {
            scaled.max(config.min_rest_duration)
        })
}

/// Runs at most one [`SettleAnimation`] and schedules its completion.
#[derive(Clone, Debug, Default)]
pub struct SettleAnimator {
    current: Option<(SettleAnimation, TaskToken)>,
}

impl SettleAnimator {
    /// Creates an idle animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts animating from `from` to `to`, replacing any current animation.
    ///
    /// `on_complete` is scheduled at the animation's end; pass the token it
    /// is popped with to [`SettleAnimator::complete`].
    pub fn animate<T>(
        &mut self,
        scheduler: &mut Scheduler<T>,
        now: Duration,
        kind: SettleKind,
        from: f64,
        to: f64,
        duration: Duration,
        on_complete: T,
    ) -> SettleAnimation {
        if let Some((_, token)) = self.current.take() {
            scheduler.cancel(token);
        }
        let animation = SettleAnimation {
            kind,
            from,
            to,
            start: now,
            duration,
        };
        let token = scheduler.schedule(animation.end(), on_complete);
        self.current = Some((animation, token));
        animation
    }

    /// Returns the running animation.
    #[must_use]
    pub fn current(&self) -> Option<&SettleAnimation> {
        self.current.as_ref().map(|(animation, _)| animation)
    }

    /// Returns `true` while an animation is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Samples the running animation at `now`.
    #[must_use]
    pub fn sample(&self, now: Duration) -> Option<f64> {
        self.current().map(|animation| animation.offset_at(now))
    }

    /// Stops the running animation and returns the offset it had reached.
    pub fn cancel<T>(&mut self, scheduler: &mut Scheduler<T>, now: Duration) -> Option<f64> {
        let (animation, token) = self.current.take()?;
        scheduler.cancel(token);
        Some(animation.offset_at(now))
    }

    /// Finishes the animation whose completion task carried `token`.
    ///
    /// Returns `None` for stale tokens, so each animation completes once.
    pub fn complete(&mut self, token: TaskToken) -> Option<SettleAnimation> {
        match self.current {
            Some((animation, current)) if current == token => {
                self.current = None;
                Some(animation)
            }
            _ => None,
        }
    }
}
