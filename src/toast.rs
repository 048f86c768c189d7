//! Transient notifications ("toasts").
//!
//! A toast walks `Created -> Visible -> Exiting -> Removed` purely on
//! timers; there is no dismiss input. All three transitions are scheduled
//! up front, relative to creation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ToastTimings;
use crate::error::Result;
use crate::schedule::{Scheduler, TaskHandle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    #[default]
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
        }
    }

    /// CSS class list for the notification element.
    pub fn class_name(self) -> String {
        format!("notification notification-{}", self.as_str())
    }

    pub fn background(self) -> &'static str {
        match self {
            Severity::Success => "linear-gradient(135deg, #10b981, #059669)",
            Severity::Info => "linear-gradient(135deg, #9333ea, #06b6d4)",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    /// Inserted, parked off-screen to the right.
    Created,
    Visible,
    /// Sliding back off-screen.
    Exiting,
    Removed,
}

const OFF_SCREEN: &str = "translateX(100%)";
const ON_SCREEN: &str = "translateX(0)";

impl ToastPhase {
    pub fn is_attached(self) -> bool {
        self != ToastPhase::Removed
    }

    pub fn is_on_screen(self) -> bool {
        self == ToastPhase::Visible
    }

    /// Inline `transform` for the phase; `None` once the element is gone.
    pub fn transform(self) -> Option<&'static str> {
        match self {
            ToastPhase::Created | ToastPhase::Exiting => Some(OFF_SCREEN),
            ToastPhase::Visible => Some(ON_SCREEN),
            ToastPhase::Removed => None,
        }
    }
}

impl ToastTimings {
    /// Offsets from creation at which each later phase begins.
    pub fn transitions(&self) -> [(u32, ToastPhase); 3] {
        let visible = self.enter_delay_ms;
        let exiting = visible + self.hold_ms;
        let removed = exiting + self.transition_ms;
        [
            (visible, ToastPhase::Visible),
            (exiting, ToastPhase::Exiting),
            (removed, ToastPhase::Removed),
        ]
    }

    pub fn phase_at(&self, elapsed_ms: u32) -> ToastPhase {
        self.transitions()
            .iter()
            .rev()
            .find(|(at, _)| elapsed_ms >= *at)
            .map_or(ToastPhase::Created, |(_, phase)| *phase)
    }

    /// Total time the toast stays in the document.
    pub fn lifetime_ms(&self) -> u32 {
        self.enter_delay_ms + self.hold_ms + self.transition_ms
    }
}

/// Schedules the three timed transitions of one toast. `on_phase` sees
/// `Visible`, `Exiting` and `Removed` in that order.
pub fn schedule_lifecycle<S, F>(
    scheduler: &S,
    timings: &ToastTimings,
    on_phase: F,
) -> Result<Vec<TaskHandle>>
where
    S: Scheduler + ?Sized,
    F: FnMut(ToastPhase) + 'static,
{
    let on_phase = Rc::new(RefCell::new(on_phase));
    timings
        .transitions()
        .into_iter()
        .map(|(at, phase)| {
            let on_phase = Rc::clone(&on_phase);
            scheduler.schedule(at, Box::new(move || (*on_phase.borrow_mut())(phase)))
        })
        .collect()
}
