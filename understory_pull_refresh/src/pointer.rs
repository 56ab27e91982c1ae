// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-pointer tracking: reduce raw touch events to one active pointer and a
//! per-frame movement delta.
//!
//! ## Usage
//!
//! 1) Feed every raw event for the container to [`PointerTracker::on_event`].
//! 2) Read the returned [`FrameDelta`]: `delta` is the movement of the active
//!    pointer since the previous event, `total` the cumulative movement since
//!    the first pointer went down.
//!
//! Only [`PointerPhase::Move`] events report a nonzero delta. Every other
//! transition re-anchors the baseline so that switching fingers never produces
//! a jump.
//!
//! When another finger goes down while one is already tracked, the new finger
//! becomes the active pointer. When the active finger lifts while others remain,
//! the first remaining pointer (by index in the event) takes over.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_pull_refresh::pointer::{
//!     PointerEvent, PointerId, PointerPhase, PointerSample, PointerTracker,
//! };
//!
//! let mut tracker = PointerTracker::new();
//! let finger = PointerId(7);
//!
//! tracker.on_event(&PointerEvent::new(
//!     PointerPhase::Down,
//!     0,
//!     &[PointerSample::new(finger, Point::new(10.0, 20.0))],
//! ));
//! assert_eq!(tracker.active_pointer(), Some(finger));
//!
//! let frame = tracker.on_event(&PointerEvent::new(
//!     PointerPhase::Move,
//!     0,
//!     &[PointerSample::new(finger, Point::new(12.0, 50.0))],
//! ));
//! assert_eq!(frame.delta, Vec2::new(2.0, 30.0));
//! assert_eq!(frame.total, Vec2::new(2.0, 30.0));
//! ```

use kurbo::{Point, Vec2};

/// Host-assigned identifier of one pointer (finger) for the lifetime of its contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// Position of one pointer at the time of an event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Pointer identifier.
    pub id: PointerId,
    /// Position in container coordinates.
    pub position: Point,
}

impl PointerSample {
    /// Creates a sample for `id` at `position`.
    #[must_use]
    pub const fn new(id: PointerId, position: Point) -> Self {
        Self { id, position }
    }
}

/// Transition carried by a [`PointerEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// The first pointer of a sequence went down.
    Down,
    /// An additional pointer went down while others are still in contact.
    PointerDown,
    /// One or more pointers moved.
    Move,
    /// A pointer lifted while others remain in contact.
    PointerUp,
    /// The last pointer lifted.
    Up,
    /// The sequence was aborted by the host.
    Cancel,
}

/// A raw input event: the transition plus every pointer currently in contact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent<'a> {
    /// What happened.
    pub phase: PointerPhase,
    /// Index into `pointers` of the pointer that changed state.
    ///
    /// Ignored for [`PointerPhase::Move`], [`PointerPhase::Up`] and
    /// [`PointerPhase::Cancel`].
    pub action_index: usize,
    /// All pointers in contact, including the one that changed state.
    pub pointers: &'a [PointerSample],
}

impl<'a> PointerEvent<'a> {
    /// Creates an event.
    #[must_use]
    pub const fn new(
        phase: PointerPhase,
        action_index: usize,
        pointers: &'a [PointerSample],
    ) -> Self {
        Self {
            phase,
            action_index,
            pointers,
        }
    }

    /// Returns the pointer that changed state, if `action_index` is in range.
    #[must_use]
    pub fn action_pointer(&self) -> Option<&PointerSample> {
        self.pointers.get(self.action_index)
    }

    /// Looks up the sample for `id`.
    #[must_use]
    pub fn find(&self, id: PointerId) -> Option<&PointerSample> {
        self.pointers.iter().find(|p| p.id == id)
    }
}

/// Movement reported for one event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameDelta {
    /// Movement of the active pointer since the previous event.
    pub delta: Vec2,
    /// Cumulative movement since the sequence started.
    pub total: Vec2,
}

/// Tracks the active pointer across multi-touch transitions.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    active: Option<PointerId>,
    last_pos: Point,
    total: Vec2,
    delta: Vec2,
}

impl PointerTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pointer whose movement is being reported.
    #[must_use]
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active
    }

    /// Returns the last known position of the active pointer.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.active.map(|_| self.last_pos)
    }

    /// Returns the delta reported by the most recent event.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Returns the cumulative movement since the sequence started.
    #[must_use]
    pub fn total(&self) -> Vec2 {
        self.total
    }

    /// Returns `true` while at least one pointer is in contact.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    /// Consumes one raw event and returns the movement it represents.
    pub fn on_event(&mut self, event: &PointerEvent<'_>) -> FrameDelta {
        self.delta = Vec2::ZERO;
        match event.phase {
            PointerPhase::Down => {
                if let Some(pointer) = event.action_pointer() {
                    self.active = Some(pointer.id);
                    self.last_pos = pointer.position;
                    self.total = Vec2::ZERO;
                }
            }
            PointerPhase::PointerDown => {
                if let Some(pointer) = event.action_pointer() {
                    if self.active != Some(pointer.id) {
                        self.active = Some(pointer.id);
                        self.last_pos = pointer.position;
                    }
                }
            }
            PointerPhase::Move => {
                if let Some(pointer) = self.active.and_then(|id| event.find(id)) {
                    self.delta = pointer.position - self.last_pos;
                    self.total += self.delta;
                    self.last_pos = pointer.position;
                }
            }
            PointerPhase::PointerUp => {
                let lifted = event.action_pointer().map(|p| p.id);
                if lifted.is_some() && lifted == self.active {
                    let successor = event
                        .pointers
                        .iter()
                        .enumerate()
                        .find(|(index, _)| *index != event.action_index)
                        .map(|(_, pointer)| *pointer);
                    match successor {
                        Some(pointer) => {
                            self.active = Some(pointer.id);
                            self.last_pos = pointer.position;
                        }
                        None => self.active = None,
                    }
                }
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                self.active = None;
            }
        }
        FrameDelta {
            delta: self.delta,
            total: self.total,
        }
    }
}
