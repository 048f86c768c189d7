use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::error::Result;
use crate::schedule::{Scheduler, Task, TaskHandle};

#[derive(Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Waiting,
    Running,
    Done,
}

struct Timer {
    state: Rc<Cell<TimerState>>,
    _callback: Closure<dyn FnMut()>,
}

/// [`Scheduler`] on top of `setTimeout`.
///
/// Callbacks stay owned here until they finish or are cancelled. Finished
/// ones are dropped on the next `schedule` or `cancel`, never while running.
pub struct BrowserScheduler {
    window: Window,
    timers: RefCell<HashMap<i32, Timer>>,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            timers: RefCell::new(HashMap::new()),
        }
    }

    /// Callbacks still held, including finished ones not yet swept.
    pub fn retained(&self) -> usize {
        self.timers.borrow().len()
    }

    fn sweep(&self) {
        self.timers
            .borrow_mut()
            .retain(|_, timer| timer.state.get() != TimerState::Done);
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        // The callbacks go with us, so the browser must not fire them.
        for (id, timer) in self.timers.get_mut().iter() {
            if timer.state.get() == TimerState::Waiting {
                self.window.clear_timeout_with_handle(*id);
            }
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> Result<TaskHandle> {
        self.sweep();

        let state = Rc::new(Cell::new(TimerState::Waiting));
        let callback = {
            let state = Rc::clone(&state);
            let mut task = Some(task);
            Closure::wrap(Box::new(move || {
                let Some(task) = task.take() else {
                    return;
                };
                state.set(TimerState::Running);
                task();
                state.set(TimerState::Done);
            }) as Box<dyn FnMut()>)
        };
        let id = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        )?;
        self.timers.borrow_mut().insert(
            id,
            Timer {
                state,
                _callback: callback,
            },
        );
        Ok(TaskHandle::from_raw(id))
    }

    fn cancel(&self, handle: TaskHandle) {
        self.window.clear_timeout_with_handle(handle.raw());
        let mut timers = self.timers.borrow_mut();
        // A task cancelling itself keeps its closure until it returns.
        if timers
            .get(&handle.raw())
            .is_some_and(|timer| timer.state.get() != TimerState::Running)
        {
            timers.remove(&handle.raw());
        }
        timers.retain(|_, timer| timer.state.get() != TimerState::Done);
    }
}
