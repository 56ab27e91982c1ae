// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts for the header/footer visual strategies and the refresh listener.
//!
//! A [`RefreshHandler`] is bound to one edge and is told about the drag on that
//! edge only. For each gesture the hooks arrive in a fixed relative order:
//!
//! 1. [`on_drag_ready`](RefreshHandler::on_drag_ready), once.
//! 2. Any number of [`on_drag_event`](RefreshHandler::on_drag_event) calls,
//!    interleaved with alternating
//!    [`on_drag_critical_point`](RefreshHandler::on_drag_critical_point) calls.
//! 3. At most one [`on_drag_start_anim`](RefreshHandler::on_drag_start_anim).
//! 4. At most one [`on_drag_finish_anim`](RefreshHandler::on_drag_finish_anim).
//!
//! Geometry getters return `None` to request the default.

use crate::displacement::Edge;

/// Visual strategy for a header or footer.
///
/// Every method has a no-op default so strategies only implement what they draw.
pub trait RefreshHandler {
    /// Reveal distance that arms the refresh/load; `None` uses the measured
    /// surface extent.
    fn drag_min_distance(&self) -> Option<f64> {
        None
    }

    /// Normalization distance of the resistance law; `None` uses
    /// [`DEFAULT_MAX_DRAG_DISTANCE`](crate::DEFAULT_MAX_DRAG_DISTANCE).
    fn drag_max_distance(&self) -> Option<f64> {
        None
    }

    /// Reveal distance held while the refresh/load runs; `None` uses the
    /// minimum drag distance.
    fn spring_distance(&self) -> Option<f64> {
        None
    }

    /// The edge is about to be revealed by a drag.
    fn on_drag_ready(&mut self) {}

    /// The edge is being dragged; `distance` is the signed reveal (positive
    /// for the header, negative for the footer).
    fn on_drag_event(&mut self, distance: f64) {
        let _ = distance;
    }

    /// The reveal crossed the critical point: `true` while opening past it,
    /// `false` while closing back below it.
    fn on_drag_critical_point(&mut self, opening: bool) {
        let _ = opening;
    }

    /// The edge was released past the critical point and springs to its hold
    /// position.
    fn on_drag_start_anim(&mut self) {}

    /// The edge has returned to rest after a refresh/load.
    fn on_drag_finish_anim(&mut self) {}
}

/// Receives the refresh and load-more requests.
///
/// The host starts its asynchronous work here and later calls
/// [`PullRefresh::on_refresh_complete`](crate::PullRefresh::on_refresh_complete)
/// from the UI context.
pub trait RefreshListener {
    /// The header was released past its critical point.
    fn on_refresh_event(&mut self);

    /// The footer was released past its critical point.
    fn on_load_more_event(&mut self);
}

/// A [`RefreshListener`] built from two closures.
///
/// ```
/// use understory_pull_refresh::{FnListener, RefreshListener};
///
/// let mut refreshes = 0;
/// let mut listener = FnListener::new(|| refreshes += 1, || {});
/// listener.on_refresh_event();
/// drop(listener);
/// assert_eq!(refreshes, 1);
/// ```
#[derive(Clone, Debug)]
pub struct FnListener<R, L> {
    on_refresh: R,
    on_load_more: L,
}

impl<R, L> FnListener<R, L>
where
    R: FnMut(),
    L: FnMut(),
{
    /// Wraps the two callbacks.
    #[must_use]
    pub fn new(on_refresh: R, on_load_more: L) -> Self {
        Self {
            on_refresh,
            on_load_more,
        }
    }
}

impl<R, L> RefreshListener for FnListener<R, L>
where
    R: FnMut(),
    L: FnMut(),
{
    fn on_refresh_event(&mut self) {
        (self.on_refresh)();
    }

    fn on_load_more_event(&mut self) {
        (self.on_load_more)();
    }
}

/// Which listener callback a completed gesture owes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ListenerType {
    /// No refresh or load is pending.
    #[default]
    None,
    /// The header was released past its critical point.
    HeaderRefresh,
    /// The footer was released past its critical point.
    FooterLoadMore,
}

impl ListenerType {
    /// Returns the listener type owed by a release on `edge`.
    #[must_use]
    pub fn for_edge(edge: Edge) -> Self {
        match edge {
            Edge::Header => Self::HeaderRefresh,
            Edge::Footer => Self::FooterLoadMore,
        }
    }

    /// Returns the edge this listener type belongs to.
    #[must_use]
    pub fn edge(self) -> Option<Edge> {
        match self {
            Self::None => None,
            Self::HeaderRefresh => Some(Edge::Header),
            Self::FooterLoadMore => Some(Edge::Footer),
        }
    }

    /// Invokes the matching callback on `listener`. Returns `false` for
    /// [`ListenerType::None`].
    pub fn dispatch(self, listener: &mut dyn RefreshListener) -> bool {
        match self {
            Self::None => false,
            Self::HeaderRefresh => {
                listener.on_refresh_event();
                true
            }
            Self::FooterLoadMore => {
                listener.on_load_more_event();
                true
            }
        }
    }
}
