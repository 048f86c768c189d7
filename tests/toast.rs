use std::cell::RefCell;
use std::rc::Rc;

use portfolio_site::config::ToastTimings;
use portfolio_site::schedule::VirtualScheduler;
use portfolio_site::toast::{schedule_lifecycle, Notice, Severity, ToastPhase};

/// Plays one toast on a virtual clock, tracking its current phase.
fn spawn(scheduler: &VirtualScheduler) -> Rc<RefCell<ToastPhase>> {
    let phase = Rc::new(RefCell::new(ToastPhase::Created));
    let sink = Rc::clone(&phase);
    schedule_lifecycle(scheduler, &ToastTimings::default(), move |next| {
        *sink.borrow_mut() = next;
    })
    .unwrap();
    phase
}

#[test]
fn lifecycle_follows_the_clock() {
    let scheduler = VirtualScheduler::new();
    let phase = spawn(&scheduler);

    scheduler.advance(99);
    assert_eq!(*phase.borrow(), ToastPhase::Created);
    assert!(!phase.borrow().is_on_screen());

    scheduler.advance(1);
    assert_eq!(*phase.borrow(), ToastPhase::Visible);

    scheduler.advance(2999);
    assert_eq!(*phase.borrow(), ToastPhase::Visible);

    scheduler.advance(1);
    assert_eq!(*phase.borrow(), ToastPhase::Exiting);
    assert!(phase.borrow().is_attached());

    scheduler.advance(299);
    assert!(phase.borrow().is_attached());
    scheduler.advance(1);
    assert_eq!(*phase.borrow(), ToastPhase::Removed);
    assert!(!phase.borrow().is_attached());
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn phase_at_matches_scheduled_transitions() {
    let timings = ToastTimings::default();
    assert_eq!(timings.phase_at(0), ToastPhase::Created);
    assert_eq!(timings.phase_at(100), ToastPhase::Visible);
    assert_eq!(timings.phase_at(3099), ToastPhase::Visible);
    assert_eq!(timings.phase_at(3100), ToastPhase::Exiting);
    assert_eq!(timings.phase_at(3400), ToastPhase::Removed);
    assert_eq!(timings.phase_at(3700), ToastPhase::Removed);
    assert_eq!(timings.lifetime_ms(), 3400);
}

#[test]
fn transforms_slide_in_and_out() {
    assert_eq!(ToastPhase::Created.transform(), Some("translateX(100%)"));
    assert_eq!(ToastPhase::Visible.transform(), Some("translateX(0)"));
    assert_eq!(ToastPhase::Exiting.transform(), Some("translateX(100%)"));
    assert_eq!(ToastPhase::Removed.transform(), None);
}

#[test]
fn concurrent_toasts_are_independent() {
    let scheduler = VirtualScheduler::new();
    let first = spawn(&scheduler);
    scheduler.advance(1000);
    let second = spawn(&scheduler);

    scheduler.advance(2400);
    assert_eq!(*first.borrow(), ToastPhase::Removed);
    assert_eq!(*second.borrow(), ToastPhase::Visible);

    scheduler.advance(1000);
    assert_eq!(*second.borrow(), ToastPhase::Removed);
}

#[test]
fn severity_styling() {
    assert_eq!(Severity::default(), Severity::Info);
    assert_eq!(Notice::info("hi").severity, Severity::Info);
    assert_eq!(Severity::Success.class_name(), "notification notification-success");
    assert_eq!(Severity::Info.class_name(), "notification notification-info");
    assert_ne!(Severity::Success.background(), Severity::Info.background());
    assert!(Severity::Success.background().contains("#10b981"));
}
