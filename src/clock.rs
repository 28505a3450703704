//! Timer abstraction used by the carousel.
//!
//! The controller never sleeps or registers callbacks. It asks a [`Scheduler`]
//! for timers and later receives the fired [`TimerKind`]s back, in deadline
//! order, from [`Scheduler::fire_next`]. [`VirtualClock`] is the only
//! implementation: tests advance it by hand, the viewer advances it by the
//! measured frame time.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a fired timer means to the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Autoplay,
    TransitionEnd,
}

pub trait Scheduler {
    /// Time elapsed since the scheduler was created.
    fn now(&self) -> Duration;

    fn schedule_once(&mut self, kind: TimerKind, delay: Duration) -> TimerId;

    /// Fires every `interval` until cancelled. A zero interval fires once.
    fn schedule_repeating(&mut self, kind: TimerKind, interval: Duration) -> TimerId;

    /// Returns false when the timer already fired (one-shot) or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Pops the earliest timer due at or before `until` and moves the clock
    /// to its deadline. Repeating timers are re-armed before returning.
    fn fire_next(&mut self, until: Duration) -> Option<(TimerId, TimerKind)>;

    /// Moves the clock forward without firing anything. Never moves it back.
    fn advance_to(&mut self, until: Duration);

    fn pending(&self) -> usize;
}

#[derive(Debug, Clone)]
struct PendingTimer {
    id: TimerId,
    kind: TimerKind,
    deadline: Duration,
    interval: Option<Duration>,
}

#[derive(Debug, Default, Clone)]
pub struct VirtualClock {
    now: Duration,
    next_id: u64,
    timers: Vec<PendingTimer>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn pending_of(&self, kind: TimerKind) -> usize {
        self.timers.iter().filter(|t| t.kind == kind).count()
    }

    fn push(&mut self, kind: TimerKind, delay: Duration, interval: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(PendingTimer {
            id,
            kind,
            deadline: self.now + delay,
            interval,
        });
        id
    }
}

impl Scheduler for VirtualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_once(&mut self, kind: TimerKind, delay: Duration) -> TimerId {
        self.push(kind, delay, None)
    }

    fn schedule_repeating(&mut self, kind: TimerKind, interval: Duration) -> TimerId {
        let repeat = (!interval.is_zero()).then_some(interval);
        self.push(kind, interval, repeat)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    fn fire_next(&mut self, until: Duration) -> Option<(TimerId, TimerKind)> {
        // Ties go to the timer scheduled first
        let (pos, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.id))?;

        let deadline = self.timers[pos].deadline;
        self.now = self.now.max(deadline);

        let PendingTimer { id, kind, interval, .. } = self.timers[pos];
        let fired = (id, kind);
        match interval {
            Some(interval) => self.timers[pos].deadline += interval,
            None => {
                self.timers.swap_remove(pos);
            }
        }
        Some(fired)
    }

    fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }
}
