// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-edge thresholds and controller timing.

use core::time::Duration;

use crate::handler::RefreshHandler;

/// Maximum drag distance used when a strategy does not report one.
pub const DEFAULT_MAX_DRAG_DISTANCE: f64 = 600.0;

/// Minimum drag distance used when neither the strategy nor the measured
/// surface provide one.
pub const DEFAULT_MIN_DRAG_DISTANCE: f64 = 100.0;

/// Thresholds for one edge, derived from its strategy on each layout pass.
///
/// All three distances are positive and finite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeConfig {
    /// Reveal distance at which releasing triggers the refresh/load callback.
    pub min_drag_distance: f64,
    /// Normalization distance of the resistance law.
    pub max_drag_distance: f64,
    /// Reveal distance held while the refresh/load is in flight.
    pub spring_distance: f64,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            min_drag_distance: DEFAULT_MIN_DRAG_DISTANCE,
            max_drag_distance: DEFAULT_MAX_DRAG_DISTANCE,
            spring_distance: DEFAULT_MIN_DRAG_DISTANCE,
        }
    }
}

impl EdgeConfig {
    /// Resolves thresholds from reported values, falling back to defaults.
    ///
    /// - `max`: reported value, else [`DEFAULT_MAX_DRAG_DISTANCE`].
    /// - `min`: reported value, else `surface_extent`, else
    ///   [`DEFAULT_MIN_DRAG_DISTANCE`].
    /// - `spring`: reported value, else the resolved `min`.
    ///
    /// Non-positive and non-finite values count as "not reported".
    #[must_use]
    pub fn from_reported(
        min: Option<f64>,
        max: Option<f64>,
        spring: Option<f64>,
        surface_extent: f64,
    ) -> Self {
        let max_drag_distance = positive(max).unwrap_or(DEFAULT_MAX_DRAG_DISTANCE);
        let min_drag_distance = positive(min)
            .or(positive(Some(surface_extent)))
            .unwrap_or(DEFAULT_MIN_DRAG_DISTANCE);
        let spring_distance = positive(spring).unwrap_or(min_drag_distance);
        Self {
            min_drag_distance,
            max_drag_distance,
            spring_distance,
        }
    }

    /// Resolves thresholds from a bound strategy and its measured extent.
    #[must_use]
    pub fn resolve(handler: &dyn RefreshHandler, surface_extent: f64) -> Self {
        Self::from_reported(
            handler.drag_min_distance(),
            handler.drag_max_distance(),
            handler.spring_distance(),
            surface_extent,
        )
    }

    /// Returns `true` once `distance` reaches the critical point.
    #[must_use]
    pub fn is_over_drag(&self, distance: f64) -> bool {
        distance >= self.min_drag_distance
    }

    /// Returns `true` if releasing at `distance` triggers the refresh/load.
    ///
    /// Strictly past the critical point, unlike [`EdgeConfig::is_over_drag`].
    #[must_use]
    pub fn is_armed(&self, distance: f64) -> bool {
        distance > self.min_drag_distance
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Timing and noise thresholds of the controller.
///
/// The defaults reproduce the classic pull-to-refresh feel: a quick snap back
/// proportional to the distance travelled and a short spring to the hold
/// position.
#[derive(Clone, Debug, PartialEq)]
pub struct PullConfig {
    /// Reveal beyond which a non-opening move still claims the gesture (default: 20).
    pub settle_noise_margin: f64,
    /// Snap-back duration for a reveal as large as the content (default: 400ms).
    pub rest_duration_scale: Duration,
    /// Lower bound of the snap-back duration (default: 100ms).
    pub min_rest_duration: Duration,
    /// Duration of the spring to the hold position after a release (default: 200ms).
    pub spring_duration: Duration,
    /// Duration of the spring started by a programmatic refresh (default: 500ms).
    pub programmatic_duration: Duration,
    /// Delay before a programmatic refresh starts moving (default: 200ms).
    pub programmatic_start_delay: Duration,
    /// Delay after the programmatic spring before the callback fires (default: 200ms).
    pub programmatic_callback_delay: Duration,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            settle_noise_margin: 20.0,
            rest_duration_scale: Duration::from_millis(400),
            min_rest_duration: Duration::from_millis(100),
            spring_duration: Duration::from_millis(200),
            programmatic_duration: Duration::from_millis(500),
            programmatic_start_delay: Duration::from_millis(200),
            programmatic_callback_delay: Duration::from_millis(200),
        }
    }
}
