// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording fakes shared by the integration tests.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; not every test binary uses every helper."
)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Size, Vec2};
use understory_pull_refresh::pointer::{PointerEvent, PointerId, PointerPhase, PointerSample};
use understory_pull_refresh::{
    Disposition, Edge, MeasuredSurfaces, PullHost, PullRefresh, RefreshHandler, RefreshListener,
    ScrollDirection,
};

pub(crate) const CONTAINER: Size = Size::new(360.0, 640.0);

/// One observed hook or listener call.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Ready(Edge),
    Drag(Edge, f64),
    Critical(Edge, bool),
    StartAnim(Edge),
    FinishAnim(Edge),
    Refresh,
    LoadMore,
}

pub(crate) type Log = Rc<RefCell<Vec<Call>>>;

pub(crate) fn log() -> Log {
    Rc::default()
}

/// Calls other than per-frame drag events, in order.
pub(crate) fn milestones(log: &Log) -> Vec<Call> {
    log.borrow()
        .iter()
        .filter(|call| !matches!(call, Call::Drag(..)))
        .cloned()
        .collect()
}

pub(crate) fn critical_points(log: &Log, edge: Edge) -> Vec<bool> {
    log.borrow()
        .iter()
        .filter_map(|call| match call {
            Call::Critical(e, opening) if *e == edge => Some(*opening),
            _ => None,
        })
        .collect()
}

pub(crate) fn count(log: &Log, wanted: &Call) -> usize {
    log.borrow().iter().filter(|call| *call == wanted).count()
}

pub(crate) struct RecordingHandler {
    edge: Edge,
    log: Log,
    min: Option<f64>,
    max: Option<f64>,
    spring: Option<f64>,
}

impl RecordingHandler {
    pub(crate) fn new(edge: Edge, log: &Log) -> Self {
        Self {
            edge,
            log: log.clone(),
            min: None,
            max: None,
            spring: None,
        }
    }

    pub(crate) fn distances(mut self, min: f64, max: f64, spring: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.spring = Some(spring);
        self
    }

    fn push(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl RefreshHandler for RecordingHandler {
    fn drag_min_distance(&self) -> Option<f64> {
        self.min
    }

    fn drag_max_distance(&self) -> Option<f64> {
        self.max
    }

    fn spring_distance(&self) -> Option<f64> {
        self.spring
    }

    fn on_drag_ready(&mut self) {
        self.push(Call::Ready(self.edge));
    }

    fn on_drag_event(&mut self, distance: f64) {
        self.push(Call::Drag(self.edge, distance));
    }

    fn on_drag_critical_point(&mut self, opening: bool) {
        self.push(Call::Critical(self.edge, opening));
    }

    fn on_drag_start_anim(&mut self) {
        self.push(Call::StartAnim(self.edge));
    }

    fn on_drag_finish_anim(&mut self) {
        self.push(Call::FinishAnim(self.edge));
    }
}

pub(crate) struct RecordingListener(pub(crate) Log);

impl RefreshListener for RecordingListener {
    fn on_refresh_event(&mut self) {
        self.0.borrow_mut().push(Call::Refresh);
    }

    fn on_load_more_event(&mut self) {
        self.0.borrow_mut().push(Call::LoadMore);
    }
}

/// A content widget whose scroll position the test moves by hand.
#[derive(Default)]
pub(crate) struct FakeHost {
    pub(crate) can_scroll_up: Cell<bool>,
    pub(crate) can_scroll_down: Cell<bool>,
}

impl PullHost for FakeHost {
    fn can_content_scroll(&self, direction: ScrollDirection) -> bool {
        match direction {
            ScrollDirection::Up => self.can_scroll_up.get(),
            ScrollDirection::Down => self.can_scroll_down.get(),
        }
    }
}

/// Controller with content attached, both edges bound at min/max/spring
/// 100/600/100, a recording listener, and one layout pass done.
pub(crate) fn controller(log: &Log) -> PullRefresh {
    let mut pull = PullRefresh::new();
    pull.attach_content(CONTAINER).unwrap();
    pull.set_header(RecordingHandler::new(Edge::Header, log).distances(100.0, 600.0, 100.0));
    pull.set_footer(RecordingHandler::new(Edge::Footer, log).distances(100.0, 600.0, 100.0));
    pull.set_refresh_listener(RecordingListener(log.clone()));
    pull.layout(CONTAINER, MeasuredSurfaces::new(CONTAINER, 80.0, 60.0))
        .unwrap();
    pull
}

/// A single finger driven by relative moves.
pub(crate) struct Finger {
    pub(crate) id: PointerId,
    pub(crate) position: Point,
}

impl Finger {
    pub(crate) fn new() -> Self {
        Self {
            id: PointerId(7),
            position: Point::new(180.0, 320.0),
        }
    }

    pub(crate) fn down(&self, pull: &mut PullRefresh, host: &impl PullHost) -> Disposition {
        self.send(pull, host, PointerPhase::Down)
    }

    pub(crate) fn move_by(
        &mut self,
        pull: &mut PullRefresh,
        host: &impl PullHost,
        dx: f64,
        dy: f64,
    ) -> Disposition {
        self.position += Vec2::new(dx, dy);
        self.send(pull, host, PointerPhase::Move)
    }

    pub(crate) fn up(&self, pull: &mut PullRefresh, host: &impl PullHost) -> Disposition {
        self.send(pull, host, PointerPhase::Up)
    }

    pub(crate) fn cancel(&self, pull: &mut PullRefresh, host: &impl PullHost) -> Disposition {
        self.send(pull, host, PointerPhase::Cancel)
    }

    /// A full vertical gesture: down, one move per step, up.
    pub(crate) fn drag(&mut self, pull: &mut PullRefresh, host: &impl PullHost, steps: &[f64]) {
        self.down(pull, host);
        for dy in steps {
            self.move_by(pull, host, 0.0, *dy);
        }
        self.up(pull, host);
    }

    fn send(&self, pull: &mut PullRefresh, host: &impl PullHost, phase: PointerPhase) -> Disposition {
        let samples = [PointerSample::new(self.id, self.position)];
        pull.on_pointer_event(host, &PointerEvent::new(phase, 0, &samples))
    }
}

/// Reveal after `steps` opening moves of `dy` from rest under the resistance law.
pub(crate) fn expected_reveal(steps: usize, dy: f64, max: f64) -> f64 {
    let mut reveal: f64 = 0.0;
    for _ in 0..steps {
        reveal += dy * ((max - reveal.abs()) / max * 0.5);
    }
    reveal
}
