//! Deferred tasks.
//!
//! The page needs two timers: notification auto-dismiss and the button
//! press revert. Both go through [`Scheduler`] so the browser can use
//! `setTimeout` while tests run on a [`VirtualScheduler`] and step time by
//! hand.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

/// A task run once when its timer fires.
pub type Task = Box<dyn FnOnce()>;

/// Identifies a scheduled task so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Runs tasks after a delay on the current thread.
pub trait Scheduler {
    /// Run `task` once, `delay_ms` milliseconds from now.
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle;

    /// Cancel a pending task. Returns `false` if it already ran or was
    /// cancelled before.
    fn cancel(&self, handle: TimerHandle) -> bool;
}

struct Pending {
    deadline: u64,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct ClockState {
    now: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// A scheduler driven by a virtual clock.
///
/// Nothing runs until [`advance`](Self::advance) is called. Due tasks fire in
/// deadline order, ties broken by scheduling order. A task may schedule
/// further tasks; those fire in the same `advance` call if they fall due.
#[derive(Default)]
pub struct VirtualScheduler {
    state: RefCell<ClockState>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    /// Number of tasks not yet run or cancelled.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Move the clock forward by `ms`, running every task that falls due.
    /// Returns how many tasks ran.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.state.borrow().now.saturating_add(ms);
        let mut ran = 0;

        while let Some(task) = self.pop_due(target) {
            // The borrow is released here, so the task may schedule more work.
            task();
            ran += 1;
        }

        self.state.borrow_mut().now = target;
        ran
    }

    fn pop_due(&self, target: u64) -> Option<Task> {
        let mut state = self.state.borrow_mut();
        let index = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= target)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(i, _)| i)?;

        let next = state.pending.swap_remove(index);
        state.now = next.deadline;
        Some(next.task)
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle {
        let mut state = self.state.borrow_mut();
        let seq = state.next_seq;
        state.next_seq += 1;
        let deadline = state.now + u64::from(delay_ms);
        state.pending.push(Pending {
            deadline,
            seq,
            task,
        });
        TimerHandle(seq)
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.pending.len();
        state.pending.retain(|p| p.seq != handle.0);
        state.pending.len() != before
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("VirtualScheduler")
            .field("now", &state.now)
            .field("pending", &state.pending.len())
            .finish()
    }
}

/// Owns the callbacks of a timer API that needs them kept alive, such as
/// `setTimeout` closures.
///
/// A callback stays in `pending` until it fires or is cancelled, then moves
/// to `spent` and is dropped at the next call made outside a callback. It
/// is never dropped while it runs.
pub struct TimerSlots<C> {
    pending: HashMap<TimerHandle, C>,
    spent: Vec<C>,
    firing: bool,
}

impl<C> Default for TimerSlots<C> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            spent: Vec::new(),
            firing: false,
        }
    }
}

impl<C> TimerSlots<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handle: TimerHandle, callback: C) {
        self.release_spent();
        self.pending.insert(handle, callback);
    }

    /// Mark `handle` as running. Must be paired with [`end_fire`](Self::end_fire).
    pub fn begin_fire(&mut self, handle: TimerHandle) {
        self.release_spent();
        self.firing = true;
        if let Some(done) = self.pending.remove(&handle) {
            self.spent.push(done);
        }
    }

    pub fn end_fire(&mut self) {
        self.firing = false;
    }

    /// Forget a pending callback. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let Some(callback) = self.pending.remove(&handle) else {
            return false;
        };
        self.spent.push(callback);
        self.release_spent();
        true
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Callbacks no longer pending but not yet dropped.
    pub fn held(&self) -> usize {
        self.spent.len()
    }

    fn release_spent(&mut self) {
        if !self.firing {
            self.spent.clear();
        }
    }
}

impl<C> fmt::Debug for TimerSlots<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerSlots")
            .field("pending", &self.pending.len())
            .field("held", &self.spent.len())
            .field("firing", &self.firing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let log = Rc::clone(&log);
            move |name: &'static str| -> Task {
                let log = Rc::clone(&log);
                Box::new(move || log.borrow_mut().push(name))
            }
        };
        (log, make)
    }

    #[test]
    fn test_nothing_runs_before_deadline() {
        let scheduler = VirtualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(3000, task("toast"));

        assert_eq!(scheduler.advance(2999), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.advance(1), 1);
        assert_eq!(*log.borrow(), vec!["toast"]);
        assert_eq!(scheduler.now(), 3000);
    }

    #[test]
    fn test_fires_in_deadline_then_schedule_order() {
        let scheduler = VirtualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(300, task("c"));
        scheduler.schedule(100, task("a"));
        scheduler.schedule(200, task("b1"));
        scheduler.schedule(200, task("b2"));

        scheduler.advance(1000);
        assert_eq!(*log.borrow(), vec!["a", "b1", "b2", "c"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancel() {
        let scheduler = VirtualScheduler::new();
        let (log, task) = recorder();
        let handle = scheduler.schedule(150, task("press"));

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        scheduler.advance(500);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_cancel_after_run_returns_false() {
        let scheduler = VirtualScheduler::new();
        let (_log, task) = recorder();
        let handle = scheduler.schedule(0, task("now"));

        scheduler.advance(0);
        assert!(!scheduler.cancel(handle));
    }

    #[test]
    fn test_task_can_schedule_more_work() {
        let scheduler = Rc::new(VirtualScheduler::new());
        let (log, task) = recorder();
        let second = task("second");
        let inner = Rc::clone(&scheduler);
        let log_first = Rc::clone(&log);
        scheduler.schedule(
            100,
            Box::new(move || {
                log_first.borrow_mut().push("first");
                inner.schedule(50, second);
            }),
        );

        assert_eq!(scheduler.advance(149), 1);
        assert_eq!(scheduler.advance(1), 1);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    /// Counts drops of the callback it stands in for.
    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_cancelled_callback_is_dropped() {
        let drops = Rc::new(Cell::new(0));
        let mut slots = TimerSlots::new();
        slots.insert(TimerHandle(7), Tracked(Rc::clone(&drops)));

        assert!(slots.cancel(TimerHandle(7)));
        assert_eq!(drops.get(), 1);
        assert_eq!((slots.pending(), slots.held()), (0, 0));
        assert!(!slots.cancel(TimerHandle(7)));
    }

    #[test]
    fn test_fired_callback_outlives_its_own_run() {
        let drops = Rc::new(Cell::new(0));
        let mut slots = TimerSlots::new();
        slots.insert(TimerHandle(1), Tracked(Rc::clone(&drops)));
        slots.insert(TimerHandle(2), Tracked(Rc::clone(&drops)));

        slots.begin_fire(TimerHandle(1));
        // Work done by the running task must not release it.
        assert!(slots.cancel(TimerHandle(2)));
        slots.insert(TimerHandle(3), Tracked(Rc::clone(&drops)));
        assert_eq!(drops.get(), 0);
        slots.end_fire();

        assert_eq!(slots.held(), 2);
        slots.begin_fire(TimerHandle(3));
        assert_eq!(drops.get(), 2);
        slots.end_fire();
        assert!(!slots.cancel(TimerHandle(3)));
        assert_eq!(slots.pending(), 0);
    }
}
