// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elastic displacement: how far a raw drag moves the content.
//!
//! Two offset spaces are involved:
//!
//! - The **surface offset** is what the host applies. In [`DrawMode::Overlap`]
//!   it is the vertical translation of the content surface (positive moves the
//!   content down, uncovering the header). In [`DrawMode::Follow`] it is the
//!   container's own scroll offset (negative scrolls the header into view).
//! - The **reveal** is the mode-independent signed distance: positive while the
//!   header is revealed, negative while the footer is revealed.
//!
//! [`compute_displacement`] scales each raw delta by [`resistance`], which
//! shrinks linearly from one half at rest to zero at the edge's maximum drag
//! distance.
//!
//! ```
//! use understory_pull_refresh::{DrawMode, Edge, compute_displacement};
//!
//! // First frame of a pull-down from rest: half the raw delta is applied.
//! let offset = compute_displacement(DrawMode::Follow, Edge::Header, 0.0, 50.0, 600.0);
//! assert_eq!(offset, -25.0);
//!
//! // Deeper in, the same raw delta moves the content less.
//! let deeper = compute_displacement(DrawMode::Follow, Edge::Header, -300.0, 50.0, 600.0);
//! assert_eq!(deeper, -312.5);
//! ```

/// How header and footer become visible relative to the content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// Header and footer share the content's coordinate space; the content
    /// surface itself is translated to uncover them.
    Overlap,
    /// Header and footer sit outside the content's bounds; the container
    /// scrolls to bring them into view.
    #[default]
    Follow,
}

impl DrawMode {
    /// Converts a surface offset into a reveal distance.
    #[must_use]
    pub fn reveal(self, surface_offset: f64) -> f64 {
        match self {
            Self::Overlap => surface_offset,
            Self::Follow => -surface_offset,
        }
    }

    /// Converts a reveal distance into this mode's surface offset.
    #[must_use]
    pub fn surface_offset(self, reveal: f64) -> f64 {
        match self {
            Self::Overlap => reveal,
            Self::Follow => -reveal,
        }
    }
}

/// One of the two revealable edges of the container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The region above the content, revealed by pulling down.
    Header,
    /// The region below the content, revealed by pulling up.
    Footer,
}

impl Edge {
    /// Returns the edge a reveal distance belongs to, or `None` at rest.
    #[must_use]
    pub fn of_reveal(reveal: f64) -> Option<Self> {
        if reveal > 0.0 {
            Some(Self::Header)
        } else if reveal < 0.0 {
            Some(Self::Footer)
        } else {
            None
        }
    }

    /// Sign of a reveal on this edge: `1.0` for the header, `-1.0` for the footer.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Header => 1.0,
            Self::Footer => -1.0,
        }
    }

    /// Returns the signed reveal for a distance on this edge.
    #[must_use]
    pub fn signed(self, distance: f64) -> f64 {
        distance * self.sign()
    }

    /// Returns how far `reveal` penetrates this edge; zero if it is on the other side.
    #[must_use]
    pub fn penetration(self, reveal: f64) -> f64 {
        (reveal * self.sign()).max(0.0)
    }

    /// Returns `true` if a vertical pointer delta pulls this edge further open.
    #[must_use]
    pub fn is_opening(self, delta_y: f64) -> bool {
        delta_y * self.sign() > 0.0
    }
}

/// Fraction of a raw delta applied at `penetration` into an edge.
///
/// Equals `(max - penetration) / max / 2`, clamped to `[0, 0.5]`. A
/// non-positive `max_drag_distance` yields zero.
#[must_use]
pub fn resistance(penetration: f64, max_drag_distance: f64) -> f64 {
    if max_drag_distance <= 0.0 || !max_drag_distance.is_finite() {
        return 0.0;
    }
    ((max_drag_distance - penetration) / max_drag_distance).clamp(0.0, 1.0) * 0.5
}

/// Applies one raw vertical drag delta to a surface offset.
///
/// `edge` selects which edge's penetration feeds the resistance law. The
/// result is not clamped; [`resistance`] alone bounds practical travel.
#[must_use]
pub fn compute_displacement(
    mode: DrawMode,
    edge: Edge,
    current_offset: f64,
    raw_delta: f64,
    max_drag_distance: f64,
) -> f64 {
    if raw_delta == 0.0 || !raw_delta.is_finite() {
        return current_offset;
    }
    let reveal = mode.reveal(current_offset);
    let applied = raw_delta * resistance(edge.penetration(reveal), max_drag_distance);
    mode.surface_offset(reveal + applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_and_surface_offset_are_inverse() {
        for mode in [DrawMode::Overlap, DrawMode::Follow] {
            for value in [-120.0, 0.0, 35.5] {
                assert_eq!(mode.surface_offset(mode.reveal(value)), value);
            }
        }
        assert_eq!(DrawMode::Follow.reveal(-40.0), 40.0);
        assert_eq!(DrawMode::Overlap.reveal(-40.0), -40.0);
    }

    #[test]
    fn edge_of_reveal() {
        assert_eq!(Edge::of_reveal(3.0), Some(Edge::Header));
        assert_eq!(Edge::of_reveal(-3.0), Some(Edge::Footer));
        assert_eq!(Edge::of_reveal(0.0), None);
        assert_eq!(Edge::of_reveal(-0.0), None);
    }

    #[test]
    fn opening_direction_per_edge() {
        assert!(Edge::Header.is_opening(1.0));
        assert!(!Edge::Header.is_opening(-1.0));
        assert!(Edge::Footer.is_opening(-1.0));
        assert!(!Edge::Footer.is_opening(0.0));
    }

    #[test]
    fn penetration_ignores_the_opposite_side() {
        assert_eq!(Edge::Header.penetration(80.0), 80.0);
        assert_eq!(Edge::Header.penetration(-80.0), 0.0);
        assert_eq!(Edge::Footer.penetration(-80.0), 80.0);
    }

    #[test]
    fn resistance_is_half_at_rest_and_zero_at_max() {
        assert_eq!(resistance(0.0, 600.0), 0.5);
        assert_eq!(resistance(300.0, 600.0), 0.25);
        assert_eq!(resistance(600.0, 600.0), 0.0);
        assert_eq!(resistance(900.0, 600.0), 0.0);
        assert_eq!(resistance(0.0, 0.0), 0.0);
    }

    #[test]
    fn overlap_moves_content_edge_directly() {
        let down = compute_displacement(DrawMode::Overlap, Edge::Header, 0.0, 40.0, 400.0);
        assert_eq!(down, 20.0);

        let up = compute_displacement(DrawMode::Overlap, Edge::Footer, 0.0, -40.0, 400.0);
        assert_eq!(up, -20.0);
    }

    #[test]
    fn follow_negates_into_scroll_offset() {
        let down = compute_displacement(DrawMode::Follow, Edge::Header, 0.0, 40.0, 400.0);
        assert_eq!(down, -20.0);

        let up = compute_displacement(DrawMode::Follow, Edge::Footer, 0.0, -40.0, 400.0);
        assert_eq!(up, 20.0);
    }

    #[test]
    fn closing_is_damped_by_the_same_penetration() {
        let closed = compute_displacement(DrawMode::Overlap, Edge::Header, 200.0, -40.0, 400.0);
        assert_eq!(closed, 190.0);
    }

    #[test]
    fn zero_delta_is_identity() {
        for mode in [DrawMode::Overlap, DrawMode::Follow] {
            for edge in [Edge::Header, Edge::Footer] {
                assert_eq!(compute_displacement(mode, edge, 42.0, 0.0, 600.0), 42.0);
            }
        }
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let offset = compute_displacement(DrawMode::Overlap, Edge::Header, 5.0, f64::NAN, 600.0);
        assert_eq!(offset, 5.0);
    }
}
