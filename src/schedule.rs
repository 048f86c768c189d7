//! Delayed, cancelable callbacks.
//!
//! UI effects that play out over time (notification slide in/out, home-page
//! entrance effects) are expressed as tasks handed to a [`Scheduler`]. The
//! browser backs it with `setTimeout`; tests use [`VirtualScheduler`] and
//! move time forward by hand.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::error::Result;

pub type Task = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(i32);

impl TaskHandle {
    pub fn from_raw(id: i32) -> Self {
        Self(id)
    }

    pub fn raw(self) -> i32 {
        self.0
    }
}

pub trait Scheduler {
    /// Runs `task` once, `delay_ms` from now.
    fn schedule(&self, delay_ms: u32, task: Task) -> Result<TaskHandle>;

    /// Drops a pending task. Unknown or already-run handles are ignored.
    fn cancel(&self, handle: TaskHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, delay_ms: u32, task: Task) -> Result<TaskHandle> {
        (**self).schedule(delay_ms, task)
    }

    fn cancel(&self, handle: TaskHandle) {
        (**self).cancel(handle)
    }
}

#[derive(Default)]
struct VirtualClock {
    now_ms: u64,
    next_id: i32,
    // (due, id): ids grow monotonically so ties run in insertion order.
    queue: BTreeMap<(u64, i32), Task>,
    due: HashMap<i32, u64>,
}

/// Deterministic scheduler driven by [`VirtualScheduler::advance`].
///
/// Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<VirtualClock>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    /// Number of tasks still waiting to run.
    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Moves the clock forward by `ms`, running every task that falls due
    /// on the way. Tasks may schedule more work; anything due inside the
    /// window runs in the same call.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now_ms + ms;
        loop {
            let task = {
                let mut clock = self.clock.borrow_mut();
                let key = match clock.queue.keys().next() {
                    Some(&key) if key.0 <= target => key,
                    _ => break,
                };
                clock.now_ms = key.0;
                clock.due.remove(&key.1);
                clock.queue.remove(&key)
            };
            if let Some(task) = task {
                task();
            }
        }
        self.clock.borrow_mut().now_ms = target;
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> Result<TaskHandle> {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let due = clock.now_ms + u64::from(delay_ms);
        clock.queue.insert((due, id), task);
        clock.due.insert(id, due);
        Ok(TaskHandle(id))
    }

    fn cancel(&self, handle: TaskHandle) {
        let mut clock = self.clock.borrow_mut();
        if let Some(due) = clock.due.remove(&handle.0) {
            clock.queue.remove(&(due, handle.0));
        }
    }
}
