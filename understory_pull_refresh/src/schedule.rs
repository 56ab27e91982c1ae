// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred tasks with cancellation tokens.
//!
//! [`Scheduler`] holds tasks keyed by a deadline on the host's monotonic clock.
//! It never reads a clock itself: the owner passes `now` to
//! [`Scheduler::pop_due`] and runs whatever comes back.
//!
//! Tasks are kept sorted by `(deadline, token)` in a `SmallVec`, so tasks that
//! share a deadline run in the order they were scheduled. Only a handful of
//! tasks are ever pending at once, which keeps them inline.
//!
//! ```
//! use core::time::Duration;
//! use understory_pull_refresh::schedule::Scheduler;
//!
//! let mut tasks = Scheduler::new();
//! let late = tasks.schedule(Duration::from_millis(300), "late");
//! tasks.schedule(Duration::from_millis(100), "early");
//!
//! assert!(tasks.cancel(late).is_some());
//! assert_eq!(tasks.pop_due(Duration::from_millis(50)), None);
//! assert_eq!(tasks.pop_due(Duration::from_millis(500)).map(|(_, t)| t), Some("early"));
//! assert!(tasks.is_empty());
//! ```

use core::time::Duration;

use smallvec::SmallVec;

/// Inline capacity; the controller has at most three tasks pending.
const INLINE_CAPACITY: usize = 4;

/// Handle for cancelling a scheduled task.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskToken(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    deadline: Duration,
    token: TaskToken,
    task: T,
}

/// Deadline-ordered queue of cancellable tasks.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    next_token: u64,
    entries: SmallVec<[Entry<T>; INLINE_CAPACITY]>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_token: 0,
            entries: SmallVec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to run once `now >= deadline`.
    pub fn schedule(&mut self, deadline: Duration, task: T) -> TaskToken {
        let token = TaskToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        let index = self
            .entries
            .partition_point(|e| (e.deadline, e.token) <= (deadline, token));
        self.entries.insert(
            index,
            Entry {
                deadline,
                token,
                task,
            },
        );
        token
    }

    /// Removes a pending task, returning it if it had not run yet.
    pub fn cancel(&mut self, token: TaskToken) -> Option<T> {
        let index = self.entries.iter().position(|e| e.token == token)?;
        Some(self.entries.remove(index).task)
    }

    /// Removes every pending task and returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    /// Returns `true` if `token` refers to a task that has neither run nor been cancelled.
    #[must_use]
    pub fn is_pending(&self, token: TaskToken) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Removes and returns the earliest task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TaskToken, T)> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        let entry = self.entries.remove(0);
        Some((entry.token, entry.task))
    }

    /// Returns the number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no task is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
