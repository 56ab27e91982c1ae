// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pull-to-refresh controller.
//!
//! [`PullRefresh`] consumes raw pointer events, decides whether the container
//! or its content owns each touch sequence, moves the content elastically
//! while the container owns it, and sequences the settle animations and
//! listener callbacks after release.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──down──▶ Tracking ──claim──▶ Dragging ──up──▶ SettlingToRest ───────────────▶ Idle
//!                                            └──up──▶ SettlingToSpring ─▶ Holding ─┘
//!                                                                 (callback)   (on_refresh_complete)
//! ```
//!
//! A sequence that is never claimed (a horizontal swipe, or content that can
//! still scroll) is reported as [`Disposition::PassThrough`] on every event.
//!
//! ## Driving the controller
//!
//! The controller owns no clock. Call [`PullRefresh::advance`] with a
//! monotonic timestamp once per frame; it samples the settle animation and
//! runs deferred work such as completion callbacks. Input events are stamped
//! with the most recent `advance` time.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Size};
//! use understory_pull_refresh::pointer::{PointerEvent, PointerId, PointerPhase, PointerSample};
//! use understory_pull_refresh::{
//!     Disposition, FnListener, MeasuredSurfaces, Phase, PullRefresh, RefreshHandler,
//!     StaticContent,
//! };
//!
//! struct Header;
//! impl RefreshHandler for Header {
//!     fn drag_min_distance(&self) -> Option<f64> { Some(60.0) }
//! }
//!
//! let mut pull = PullRefresh::new();
//! pull.attach_content(Size::new(320.0, 480.0)).unwrap();
//! pull.set_header(Header);
//! pull.set_refresh_listener(FnListener::new(|| {}, || {}));
//! pull.layout(Size::new(320.0, 480.0), MeasuredSurfaces::new(Size::new(320.0, 480.0), 60.0, 0.0))
//!     .unwrap();
//!
//! let finger = PointerId(0);
//! let at = |y| [PointerSample::new(finger, Point::new(100.0, y))];
//! pull.on_pointer_event(&StaticContent, &PointerEvent::new(PointerPhase::Down, 0, &at(0.0)));
//! let mut y = 0.0;
//! for _ in 0..8 {
//!     y += 40.0;
//!     let disposition =
//!         pull.on_pointer_event(&StaticContent, &PointerEvent::new(PointerPhase::Move, 0, &at(y)));
//!     assert_eq!(disposition, Disposition::Captured);
//! }
//! pull.on_pointer_event(&StaticContent, &PointerEvent::new(PointerPhase::Up, 0, &at(y)));
//! assert_eq!(pull.phase(), Phase::SettlingToSpring);
//!
//! pull.advance(Duration::from_millis(200));
//! assert_eq!(pull.phase(), Phase::Holding);
//! assert_eq!(pull.reveal(), 60.0);
//!
//! pull.on_refresh_complete();
//! pull.advance(Duration::from_secs(1));
//! assert_eq!(pull.phase(), Phase::Idle);
//! assert_eq!(pull.reveal(), 0.0);
//! ```

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use kurbo::{Size, Vec2};

use crate::config::{EdgeConfig, PullConfig};
use crate::displacement::{DrawMode, Edge, compute_displacement};
use crate::error::SetupError;
use crate::handler::{ListenerType, RefreshHandler, RefreshListener};
use crate::host::{PullHost, ScrollDirection};
use crate::layout::{MeasuredSurfaces, SurfaceLayout};
use crate::pointer::{FrameDelta, PointerEvent, PointerPhase, PointerTracker};
use crate::schedule::{Scheduler, TaskToken};
use crate::settle::{SettleAnimation, SettleAnimator, SettleKind, rest_duration};

/// Where the controller is in the gesture lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No pointer is down and nothing is animating.
    #[default]
    Idle,
    /// A pointer is down but the container has not claimed the sequence.
    Tracking,
    /// The container owns the sequence and moves the content.
    Dragging,
    /// Animating back to offset zero.
    SettlingToRest,
    /// Animating to an edge's spring distance.
    SettlingToSpring,
    /// Held at the spring distance while the refresh/load runs.
    Holding,
}

/// Whether the host should forward an event to the content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// The container does not own the sequence; deliver the event to the content.
    PassThrough,
    /// The container owns the sequence; the content must not see the event.
    Captured,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
enum CallbackState {
    #[default]
    NotFired,
    InFlight,
    Completed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Task {
    SettleComplete,
    BeginProgrammaticRefresh,
    FireProgrammaticRefresh,
}

/// Per-sequence latches, reset on every first pointer down.
#[derive(Clone, Debug, Default)]
struct GestureSession {
    owned: bool,
    header_ready: bool,
    footer_ready: bool,
    /// Edge whose critical point was last reported as opening.
    critical: Option<Edge>,
}

impl GestureSession {
    /// Latches the ready flag for `edge`, returning `true` the first time.
    fn mark_ready(&mut self, edge: Edge) -> bool {
        let flag = match edge {
            Edge::Header => &mut self.header_ready,
            Edge::Footer => &mut self.footer_ready,
        };
        !core::mem::replace(flag, true)
    }
}

struct Binding {
    handler: Box<dyn RefreshHandler>,
    config: EdgeConfig,
}

impl Binding {
    fn new(handler: Box<dyn RefreshHandler>, surface_extent: f64) -> Self {
        let config = EdgeConfig::resolve(handler.as_ref(), surface_extent);
        Self { handler, config }
    }
}

/// Pull-to-refresh / pull-to-load-more controller for one container.
pub struct PullRefresh {
    mode: DrawMode,
    config: PullConfig,
    header: Option<Binding>,
    footer: Option<Binding>,
    listener: Option<Box<dyn RefreshListener>>,
    measured: Option<MeasuredSurfaces>,
    tracker: PointerTracker,
    session: GestureSession,
    phase: Phase,
    listener_type: ListenerType,
    callback: CallbackState,
    offset: f64,
    now: Duration,
    animator: SettleAnimator,
    scheduler: Scheduler<Task>,
}

impl fmt::Debug for PullRefresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullRefresh")
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("offset", &self.offset)
            .field("listener_type", &self.listener_type)
            .field("has_header", &self.header.is_some())
            .field("has_footer", &self.footer.is_some())
            .field("has_content", &self.measured.is_some())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl Default for PullRefresh {
    fn default() -> Self {
        Self::new()
    }
}

impl PullRefresh {
    /// Creates a controller with the default [`PullConfig`] in [`DrawMode::Follow`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PullConfig::default())
    }

    /// Creates a controller with custom timing and thresholds.
    #[must_use]
    pub fn with_config(config: PullConfig) -> Self {
        Self {
            mode: DrawMode::default(),
            config,
            header: None,
            footer: None,
            listener: None,
            measured: None,
            tracker: PointerTracker::new(),
            session: GestureSession::default(),
            phase: Phase::Idle,
            listener_type: ListenerType::None,
            callback: CallbackState::NotFired,
            offset: 0.0,
            now: Duration::ZERO,
            animator: SettleAnimator::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Returns the timing and threshold configuration.
    #[must_use]
    pub fn config(&self) -> &PullConfig {
        &self.config
    }

    // --- Setup ---

    /// Attaches the single content surface with its measured size.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::ContentAlreadyAttached`] if content is already attached.
    pub fn attach_content(&mut self, size: Size) -> Result<(), SetupError> {
        if self.measured.is_some() {
            #[cfg(feature = "tracing")]
            tracing::error!("second content surface attached");
            return Err(SetupError::ContentAlreadyAttached);
        }
        self.measured = Some(MeasuredSurfaces::new(size, 0.0, 0.0));
        Ok(())
    }

    /// Returns `true` once a content surface is attached.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.measured.is_some()
    }

    /// Selects how header and footer are revealed.
    ///
    /// Only honored while idle or holding; returns `false` and keeps the
    /// current mode during a drag or a settle animation. The reveal distance
    /// is preserved across the switch.
    pub fn set_draw_mode(&mut self, mode: DrawMode) -> bool {
        if !matches!(self.phase, Phase::Idle | Phase::Holding) {
            return false;
        }
        let reveal = self.reveal();
        self.mode = mode;
        self.offset = mode.surface_offset(reveal);
        true
    }

    /// Returns the current draw mode.
    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        self.mode
    }

    /// Binds the header strategy. The first binding wins: returns `false`
    /// and drops `handler` if a header is already bound.
    pub fn set_header<H: RefreshHandler + 'static>(&mut self, handler: H) -> bool {
        let extent = self.measured.map_or(0.0, |m| m.header);
        bind(&mut self.header, Box::new(handler), extent)
    }

    /// Binds the footer strategy. The first binding wins: returns `false`
    /// and drops `handler` if a footer is already bound.
    pub fn set_footer<H: RefreshHandler + 'static>(&mut self, handler: H) -> bool {
        let extent = self.measured.map_or(0.0, |m| m.footer);
        bind(&mut self.footer, Box::new(handler), extent)
    }

    /// Returns the bound header strategy.
    #[must_use]
    pub fn header(&self) -> Option<&(dyn RefreshHandler + 'static)> {
        self.header.as_ref().map(|b| b.handler.as_ref())
    }

    /// Returns the bound header strategy mutably.
    pub fn header_mut(&mut self) -> Option<&mut (dyn RefreshHandler + 'static)> {
        self.header.as_mut().map(|b| b.handler.as_mut())
    }

    /// Returns the bound footer strategy.
    #[must_use]
    pub fn footer(&self) -> Option<&(dyn RefreshHandler + 'static)> {
        self.footer.as_ref().map(|b| b.handler.as_ref())
    }

    /// Returns the bound footer strategy mutably.
    pub fn footer_mut(&mut self) -> Option<&mut (dyn RefreshHandler + 'static)> {
        self.footer.as_mut().map(|b| b.handler.as_mut())
    }

    /// Installs the listener for refresh and load-more requests, replacing any previous one.
    pub fn set_refresh_listener<L: RefreshListener + 'static>(&mut self, listener: L) {
        self.listener = Some(Box::new(listener));
    }

    /// Runs a layout pass: re-derives both edges' thresholds from their
    /// strategies and `measured`, then places the surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NoContent`] if no content is attached.
    pub fn layout(
        &mut self,
        container: Size,
        measured: MeasuredSurfaces,
    ) -> Result<SurfaceLayout, SetupError> {
        if self.measured.is_none() {
            return Err(SetupError::NoContent);
        }
        self.measured = Some(measured);
        if let Some(binding) = self.header.as_mut() {
            binding.config = EdgeConfig::resolve(binding.handler.as_ref(), measured.header);
        }
        if let Some(binding) = self.footer.as_mut() {
            binding.config = EdgeConfig::resolve(binding.handler.as_ref(), measured.footer);
        }
        Ok(self.place(container, &measured))
    }

    /// Places the surfaces for the current offset using the last measured sizes.
    ///
    /// Returns `None` if no content is attached.
    #[must_use]
    pub fn surface_layout(&self, container: Size) -> Option<SurfaceLayout> {
        self.measured
            .as_ref()
            .map(|measured| self.place(container, measured))
    }

    fn place(&self, container: Size, measured: &MeasuredSurfaces) -> SurfaceLayout {
        SurfaceLayout::compute(
            self.mode,
            container,
            measured,
            self.header.is_some(),
            self.footer.is_some(),
            self.offset,
        )
    }

    // --- State ---

    /// Returns the lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` while the container owns the current pointer sequence.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.owned
    }

    /// Returns the callback owed (or running) for the last qualifying release.
    #[must_use]
    pub fn listener_type(&self) -> ListenerType {
        self.listener_type
    }

    /// Returns `true` between the refresh/load callback and
    /// [`PullRefresh::on_refresh_complete`].
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.callback == CallbackState::InFlight
    }

    /// Returns the surface offset in this mode's convention (see [`DrawMode`]).
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns the signed reveal: positive for the header, negative for the footer.
    #[must_use]
    pub fn reveal(&self) -> f64 {
        self.mode.reveal(self.offset)
    }

    /// Returns the running settle animation for hosts that interpolate themselves.
    #[must_use]
    pub fn settle(&self) -> Option<&SettleAnimation> {
        self.animator.current()
    }

    /// Returns the thresholds in effect for `edge`.
    #[must_use]
    pub fn edge_config(&self, edge: Edge) -> EdgeConfig {
        self.binding(edge).map_or_else(EdgeConfig::default, |b| b.config)
    }

    /// Returns the time of the last [`PullRefresh::advance`].
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Returns when [`PullRefresh::advance`] next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Returns the pointer tracker.
    #[must_use]
    pub fn pointer_tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    fn binding(&self, edge: Edge) -> Option<&Binding> {
        match edge {
            Edge::Header => self.header.as_ref(),
            Edge::Footer => self.footer.as_ref(),
        }
    }

    fn handler_mut(&mut self, edge: Edge) -> Option<&mut (dyn RefreshHandler + 'static)> {
        match edge {
            Edge::Header => self.header_mut(),
            Edge::Footer => self.footer_mut(),
        }
    }

    // --- Time ---

    /// Advances the controller clock to `now`.
    ///
    /// Runs every deferred task that is due, in deadline order, then samples
    /// the running settle animation. Times earlier than the last call are
    /// treated as the last call.
    pub fn advance(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
        while let Some((token, task)) = self.scheduler.pop_due(self.now) {
            self.run_task(token, task);
        }
        if let Some(offset) = self.animator.sample(self.now) {
            self.offset = offset;
        }
    }

    fn run_task(&mut self, token: TaskToken, task: Task) {
        match task {
            Task::SettleComplete => {
                if let Some(animation) = self.animator.complete(token) {
                    self.offset = animation.to;
                    self.on_settled(animation.kind);
                }
            }
            Task::BeginProgrammaticRefresh => self.begin_programmatic_refresh(),
            Task::FireProgrammaticRefresh => {
                if self.listener_type == ListenerType::HeaderRefresh
                    && self.callback == CallbackState::NotFired
                {
                    self.fire_callback();
                }
            }
        }
    }

    // --- Input ---

    /// Consumes one raw pointer event.
    ///
    /// `host` answers scroll-capability queries until the sequence is claimed.
    pub fn on_pointer_event<H: PullHost + ?Sized>(
        &mut self,
        host: &H,
        event: &PointerEvent<'_>,
    ) -> Disposition {
        let frame = self.tracker.on_event(event);
        match event.phase {
            PointerPhase::Down => {
                self.begin_session();
                Disposition::PassThrough
            }
            PointerPhase::Move => self.on_move(host, frame),
            PointerPhase::PointerDown | PointerPhase::PointerUp => self.disposition(),
            PointerPhase::Up | PointerPhase::Cancel => {
                let disposition = self.disposition();
                self.end_session();
                disposition
            }
        }
    }

    fn disposition(&self) -> Disposition {
        if self.session.owned {
            Disposition::Captured
        } else {
            Disposition::PassThrough
        }
    }

    fn begin_session(&mut self) {
        if let Some(offset) = self.animator.cancel(&mut self.scheduler, self.now) {
            self.offset = offset;
            #[cfg(feature = "tracing")]
            tracing::debug!(offset, "settle cancelled by new gesture");
        }
        self.scheduler.cancel_all();
        self.session = GestureSession::default();
        self.phase = Phase::Tracking;
    }

    fn on_move<H: PullHost + ?Sized>(&mut self, host: &H, frame: FrameDelta) -> Disposition {
        if self.measured.is_none() || !matches!(self.phase, Phase::Tracking | Phase::Dragging) {
            return Disposition::PassThrough;
        }
        // Ownership is decided per frame until claimed, then kept for the sequence.
        if !self.session.owned {
            if !self.should_own(host, frame.delta) {
                return Disposition::PassThrough;
            }
            self.session.owned = true;
            self.phase = Phase::Dragging;
            #[cfg(feature = "tracing")]
            tracing::debug!(reveal = self.reveal(), dy = frame.delta.y, "gesture claimed");
        }
        self.drag_frame(host, frame.delta.y);
        Disposition::Captured
    }

    fn should_own<H: PullHost + ?Sized>(&self, host: &H, delta: Vec2) -> bool {
        if delta.x.abs() > delta.y.abs() {
            return false;
        }
        let reveal = self.reveal();
        let margin = self.config.settle_noise_margin;
        let header = self.can_reveal(host, Edge::Header) && (delta.y > 0.0 || reveal > margin);
        let footer = self.can_reveal(host, Edge::Footer) && (delta.y < 0.0 || -reveal > margin);
        header || footer
    }

    fn can_reveal<H: PullHost + ?Sized>(&self, host: &H, edge: Edge) -> bool {
        let direction = match edge {
            Edge::Header => ScrollDirection::Up,
            Edge::Footer => ScrollDirection::Down,
        };
        self.binding(edge).is_some() && !host.can_content_scroll(direction)
    }

    fn drag_frame<H: PullHost + ?Sized>(&mut self, host: &H, delta_y: f64) {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let before = self.reveal();
        let edge = Edge::of_reveal(before).unwrap_or(if delta_y > 0.0 {
            Edge::Header
        } else {
            Edge::Footer
        });
        let max = self.edge_config(edge).max_drag_distance;
        let proposed = self
            .mode
            .reveal(compute_displacement(self.mode, edge, self.offset, delta_y, max));

        // A single frame never jumps across rest, and never opens an edge
        // that cannot be revealed.
        let after = match (Edge::of_reveal(before), Edge::of_reveal(proposed)) {
            (Some(from), Some(to)) if from != to => 0.0,
            (None, Some(to)) if !self.can_reveal(host, to) => 0.0,
            _ => proposed,
        };
        self.offset = self.mode.surface_offset(after);

        #[cfg(feature = "tracing")]
        tracing::trace!(delta_y, before, after, "drag frame");

        self.notify_frame(before, after, delta_y);
    }

    fn notify_frame(&mut self, before: f64, after: f64, delta_y: f64) {
        let Some(edge) = Edge::of_reveal(after).or(Edge::of_reveal(before)) else {
            return;
        };
        let config = self.edge_config(edge);
        let distance = edge.penetration(after);

        let ready = distance > 0.0 && self.session.mark_ready(edge);
        let over = config.is_over_drag(distance);
        let critical = if edge.is_opening(delta_y) {
            if over && self.session.critical != Some(edge) {
                self.session.critical = Some(edge);
                Some(true)
            } else {
                None
            }
        } else if !over && self.session.critical == Some(edge) {
            self.session.critical = None;
            Some(false)
        } else {
            None
        };

        if let Some(handler) = self.handler_mut(edge) {
            if ready {
                handler.on_drag_ready();
            }
            if distance > 0.0 {
                handler.on_drag_event(after);
            }
            if let Some(opening) = critical {
                handler.on_drag_critical_point(opening);
            }
        }
    }

    fn end_session(&mut self) {
        let owned = core::mem::take(&mut self.session.owned);
        if owned {
            self.release();
        } else if let Some(edge) = self.pending_edge() {
            // The content consumed this sequence; resume the hold it interrupted.
            #[cfg(feature = "tracing")]
            tracing::debug!(edge = ?edge, "unclaimed sequence ended, resuming hold");
            let duration = self.config.spring_duration;
            self.settle_to_spring(edge, SettleKind::ToSpring, duration);
        } else if self.reveal() != 0.0 || self.listener_type != ListenerType::None {
            self.settle_to_rest();
        } else {
            self.phase = Phase::Idle;
        }
    }

    /// Edge whose refresh/load is owed or running and not yet completed.
    fn pending_edge(&self) -> Option<Edge> {
        self.listener_type
            .edge()
            .filter(|_| self.callback != CallbackState::Completed)
    }

    fn release(&mut self) {
        let reveal = self.reveal();
        let armed = Edge::of_reveal(reveal).filter(|edge| {
            self.listener.is_some() && self.edge_config(*edge).is_armed(edge.penetration(reveal))
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(reveal, armed = ?armed, "released");

        match armed.and_then(|edge| self.claim_refresh(edge)) {
            Some(edge) => {
                let duration = self.config.spring_duration;
                self.settle_to_spring(edge, SettleKind::ToSpring, duration);
            }
            None => self.settle_to_rest(),
        }
    }

    /// Decides whether a release past `edge`'s critical point should hold.
    fn claim_refresh(&mut self, edge: Edge) -> Option<Edge> {
        match self.listener_type.edge() {
            None => {
                self.listener_type = ListenerType::for_edge(edge);
                self.callback = CallbackState::NotFired;
                if let Some(handler) = self.handler_mut(edge) {
                    handler.on_drag_start_anim();
                }
                Some(edge)
            }
            Some(pending) if pending == edge && self.callback != CallbackState::Completed => {
                Some(edge)
            }
            Some(_) => None,
        }
    }

    fn settle_to_spring(&mut self, edge: Edge, kind: SettleKind, duration: Duration) {
        let target = self
            .mode
            .surface_offset(edge.signed(self.edge_config(edge).spring_distance));
        #[cfg(feature = "tracing")]
        tracing::debug!(edge = ?edge, from = self.offset, to = target, duration = ?duration, "settling to spring");
        self.phase = Phase::SettlingToSpring;
        self.animator.animate(
            &mut self.scheduler,
            self.now,
            kind,
            self.offset,
            target,
            duration,
            Task::SettleComplete,
        );
    }

    fn settle_to_rest(&mut self) {
        let extent = self.measured.map_or(0.0, |m| m.content.height);
        let duration = rest_duration(self.offset, extent, &self.config);
        self.phase = Phase::SettlingToRest;
        self.animator.animate(
            &mut self.scheduler,
            self.now,
            SettleKind::ToRest,
            self.offset,
            0.0,
            duration,
            Task::SettleComplete,
        );
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.offset, duration = ?duration, "settling to rest");
    }

    fn on_settled(&mut self, kind: SettleKind) {
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = ?kind, offset = self.offset, "settle finished");
        match kind {
            SettleKind::ToRest => {
                self.phase = Phase::Idle;
                self.finish_refresh();
            }
            SettleKind::ToSpring => {
                self.phase = Phase::Holding;
                if self.callback == CallbackState::NotFired {
                    self.fire_callback();
                }
            }
            SettleKind::Programmatic => {
                self.phase = Phase::Holding;
            }
        }
    }

    fn fire_callback(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::info!(listener_type = ?self.listener_type, "dispatching refresh listener");
        if let Some(listener) = self.listener.as_deref_mut() {
            self.listener_type.dispatch(listener);
        }
        self.callback = CallbackState::InFlight;
    }

    fn finish_refresh(&mut self) {
        if let Some(edge) = self.listener_type.edge() {
            if let Some(handler) = self.handler_mut(edge) {
                handler.on_drag_finish_anim();
            }
        }
        self.listener_type = ListenerType::None;
        self.callback = CallbackState::NotFired;
    }

    // --- Programmatic control ---

    /// Starts a header refresh without touch input.
    ///
    /// After [`PullConfig::programmatic_start_delay`] the content springs to
    /// the header's spring distance over [`PullConfig::programmatic_duration`]
    /// and the header receives `on_drag_start_anim`; the refresh callback
    /// fires [`PullConfig::programmatic_callback_delay`] after the spring
    /// ends. A new pointer sequence before the start cancels the request; a
    /// request that comes due during a drag or while another refresh is
    /// pending is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NoContent`] without content and
    /// [`SetupError::HeaderNotBound`] without a header.
    pub fn start_refresh_action(&mut self) -> Result<(), SetupError> {
        if self.measured.is_none() {
            return Err(SetupError::NoContent);
        }
        if self.header.is_none() {
            return Err(SetupError::HeaderNotBound);
        }
        let at = self.now.saturating_add(self.config.programmatic_start_delay);
        self.scheduler.schedule(at, Task::BeginProgrammaticRefresh);
        Ok(())
    }

    fn begin_programmatic_refresh(&mut self) {
        if matches!(self.phase, Phase::Tracking | Phase::Dragging)
            || self.listener_type != ListenerType::None
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(phase = ?self.phase, "programmatic refresh dropped");
            return;
        }
        self.listener_type = ListenerType::HeaderRefresh;
        self.callback = CallbackState::NotFired;
        let duration = self.config.programmatic_duration;
        self.settle_to_spring(Edge::Header, SettleKind::Programmatic, duration);
        if let Some(handler) = self.header_mut() {
            handler.on_drag_start_anim();
        }
        let at = self
            .now
            .saturating_add(duration)
            .saturating_add(self.config.programmatic_callback_delay);
        self.scheduler.schedule(at, Task::FireProgrammaticRefresh);
    }

    /// Signals that the refresh/load work has finished.
    ///
    /// If the reveal is held open and no drag is in progress, the content
    /// settles back to rest and the edge then receives `on_drag_finish_anim`.
    /// During a drag the completion is remembered and the next release
    /// settles to rest. Calls without a callback in flight are ignored.
    pub fn on_refresh_complete(&mut self) {
        if self.callback != CallbackState::InFlight {
            return;
        }
        self.callback = CallbackState::Completed;
        #[cfg(feature = "tracing")]
        tracing::debug!(listener_type = ?self.listener_type, phase = ?self.phase, "refresh complete");
        if !self.session.owned && matches!(self.phase, Phase::Holding | Phase::SettlingToSpring) {
            self.settle_to_rest();
        }
    }
}

fn bind(slot: &mut Option<Binding>, handler: Box<dyn RefreshHandler>, surface_extent: f64) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(Binding::new(handler, surface_extent));
    true
}
