// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pull_refresh --heading-base-level=0

//! Understory Pull Refresh: a pull-to-refresh / pull-to-load-more gesture core.
//!
//! This crate wraps a single scrollable content surface with an optional header
//! (revealed by pulling down at the top) and footer (revealed by pulling up at
//! the bottom). It decides which vertical drags the container owns, moves the
//! content with rubber-band resistance, reports threshold crossings to the
//! header/footer visuals, and asks a listener to refresh or load more at the
//! right moment.
//!
//! The crate is toolkit-agnostic: it never draws, measures, or reads a clock.
//! The host feeds it pointer events and timestamps, answers scroll-capability
//! queries, and applies the offsets and rectangles it returns.
//!
//! ## Pieces
//!
//! - [`PullRefresh`]: the controller and its lifecycle [`Phase`]s.
//! - [`pointer`]: multi-touch pointer tracking that yields per-frame deltas.
//! - [`compute_displacement`] and [`resistance`]: the elastic drag law.
//! - [`RefreshHandler`]: hooks for the header/footer visuals.
//! - [`RefreshListener`]: receives refresh and load-more requests.
//! - [`SurfaceLayout`]: where the content, header, and footer go.
//! - [`settle`] and [`schedule`]: settle animations and deferred tasks.
//!
//! ## Draw modes
//!
//! In [`DrawMode::Overlap`] the header and footer sit at the container's edges
//! and the content slides over them. In [`DrawMode::Follow`] (the default) they
//! sit just outside the container and the container scrolls, so the surfaces
//! move together. [`PullRefresh::offset`] is the surface offset in the mode's
//! own convention; [`PullRefresh::reveal`] is the mode-independent reveal
//! distance, positive for the header and negative for the footer.
//!
//! ## Example
//!
//! A header pulled past its critical point, held while the refresh runs, and
//! released when the host reports completion:
//!
//! ```rust
//! use core::cell::Cell;
//! use core::time::Duration;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Size};
//! use understory_pull_refresh::pointer::{PointerEvent, PointerId, PointerPhase, PointerSample};
//! use understory_pull_refresh::{
//!     FnListener, ListenerType, Phase, PullRefresh, RefreshHandler, StaticContent,
//! };
//!
//! fn finger(pull: &mut PullRefresh, phase: PointerPhase, y: f64) {
//!     let samples = [PointerSample::new(PointerId(1), Point::new(180.0, y))];
//!     pull.on_pointer_event(&StaticContent, &PointerEvent::new(phase, 0, &samples));
//! }
//!
//! struct Spinner;
//! impl RefreshHandler for Spinner {
//!     fn drag_min_distance(&self) -> Option<f64> {
//!         Some(100.0)
//!     }
//! }
//!
//! let refreshes = Rc::new(Cell::new(0));
//! let counter = refreshes.clone();
//!
//! let mut pull = PullRefresh::new();
//! pull.attach_content(Size::new(360.0, 640.0)).unwrap();
//! pull.set_header(Spinner);
//! pull.set_refresh_listener(FnListener::new(move || counter.set(counter.get() + 1), || {}));
//!
//! finger(&mut pull, PointerPhase::Down, 0.0);
//! for step in 1..=10 {
//!     finger(&mut pull, PointerPhase::Move, 50.0 * f64::from(step));
//! }
//! assert!(pull.reveal() > 200.0);
//! finger(&mut pull, PointerPhase::Up, 500.0);
//! assert_eq!(pull.listener_type(), ListenerType::HeaderRefresh);
//!
//! // The spring to the hold position takes 200ms; the refresh fires at its end.
//! pull.advance(Duration::from_millis(200));
//! assert_eq!(pull.phase(), Phase::Holding);
//! assert_eq!(pull.reveal(), 100.0);
//! assert_eq!(refreshes.get(), 1);
//!
//! pull.on_refresh_complete();
//! pull.advance(Duration::from_millis(400));
//! assert_eq!(pull.phase(), Phase::Idle);
//! assert_eq!(pull.offset(), 0.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: floating point support for `no_std` builds through `kurbo/libm`.
//! - `tracing`: structured `debug`/`trace` logs of ownership, release, and
//!   settle decisions.

#![no_std]

extern crate alloc;

pub mod pointer;
pub mod schedule;
pub mod settle;

mod config;
mod displacement;
mod engine;
mod error;
mod handler;
mod host;
mod layout;

pub use config::{DEFAULT_MAX_DRAG_DISTANCE, DEFAULT_MIN_DRAG_DISTANCE, EdgeConfig, PullConfig};
pub use displacement::{DrawMode, Edge, compute_displacement, resistance};
pub use engine::{Disposition, Phase, PullRefresh};
pub use error::SetupError;
pub use handler::{FnListener, ListenerType, RefreshHandler, RefreshListener};
pub use host::{PullHost, ScrollDirection, StaticContent};
pub use layout::{MeasuredSurfaces, SurfaceLayout};
