//! Unit tests for the booking wizard.

use chrono::NaiveDate;

use super::wizard::{BookingWizard, Step, format_long_date};
use crate::error::AppError;
use crate::models::{AppointmentStatus, TimeSlot};
use crate::storage::{MemorySlots, SlotStorage};
use crate::store::{AppointmentRepository, AppointmentStore};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn slot(label: &str) -> TimeSlot {
    TimeSlot::offered(label).unwrap()
}

fn today() -> NaiveDate {
    day(2025, 5, 20)
}

/// Wizard on step 3 with doctor 2, 2025-06-01 at 2:00 PM.
fn wizard_at_details() -> BookingWizard {
    let mut wizard = BookingWizard::new(today(), None);
    assert!(wizard.select_doctor(2));
    assert!(wizard.next());
    assert!(wizard.set_date(day(2025, 6, 1)));
    assert!(wizard.set_time(&slot("2:00 PM")));
    assert!(wizard.next());
    wizard
}

#[test]
fn test_starts_on_doctor_step() {
    let wizard = BookingWizard::new(today(), None);
    assert_eq!(wizard.step_number(), 1);
    assert!(wizard.doctor().is_none());
    assert!(!wizard.is_preselected());
}

#[test]
fn test_doctor_step_gates_next() {
    let mut wizard = BookingWizard::new(today(), None);
    assert!(!wizard.can_proceed());
    assert!(!wizard.next());
    assert_eq!(wizard.step_number(), 1);

    assert!(!wizard.select_doctor(42));
    assert!(wizard.select_doctor(4));
    assert!(wizard.can_proceed());
    assert!(wizard.next());
    assert_eq!(wizard.step_number(), 2);
}

#[test]
fn test_schedule_step_needs_date_and_time() {
    let mut wizard = BookingWizard::new(today(), Some(1));
    assert!(wizard.next());

    // No slot can be chosen before a date.
    assert!(!wizard.set_time(&slot("9:00 AM")));
    assert!(!wizard.next());

    assert!(wizard.set_date(day(2025, 6, 1)));
    assert!(!wizard.can_proceed());
    assert!(!wizard.next());

    assert!(wizard.set_time(&slot("9:00 AM")));
    assert!(wizard.next());
    assert_eq!(wizard.step_number(), 3);
}

#[test]
fn test_rejects_past_dates_and_unoffered_slots() {
    let mut wizard = BookingWizard::new(today(), Some(1));
    wizard.next();

    assert!(!wizard.set_date(day(2025, 5, 19)));
    assert!(wizard.set_date(today()));
    assert!(!wizard.set_time(&serde_json::from_str::<TimeSlot>("\"11:11 AM\"").unwrap()));
    assert!(wizard.time().is_none());
}

#[test]
fn test_details_gates_submit_on_reason() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, "appointments");
    let mut wizard = wizard_at_details();

    assert!(!wizard.can_submit());
    assert!(matches!(wizard.submit(&store), Err(AppError::Validation(_))));

    *wizard.reason_mut().unwrap() = "   ".to_string();
    assert!(!wizard.can_submit());

    *wizard.reason_mut().unwrap() = "checkup".to_string();
    assert!(wizard.can_submit());
    assert!(!wizard.can_proceed());
}

#[test]
fn test_submit_only_from_details() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, "appointments");
    let mut wizard = BookingWizard::new(today(), Some(2));
    assert!(wizard.reason_mut().is_none());
    assert!(wizard.submit(&store).is_err());
    assert!(slots.stamp("appointments").is_none());
}

#[test]
fn test_back_keeps_selections() {
    let mut wizard = wizard_at_details();
    *wizard.reason_mut().unwrap() = "checkup".to_string();

    assert!(wizard.back());
    assert_eq!(wizard.step_number(), 2);
    assert!(wizard.back());
    assert_eq!(wizard.step_number(), 1);
    assert!(!wizard.back());

    assert_eq!(wizard.doctor().map(|d| d.id), Some(2));
    assert_eq!(wizard.date(), Some(day(2025, 6, 1)));
    assert_eq!(wizard.time().map(|t| t.as_str()), Some("2:00 PM"));
    assert_eq!(wizard.reason(), "checkup");

    // Forward again without re-entering anything.
    assert!(wizard.next());
    assert!(wizard.next());
    assert!(wizard.can_submit());
}

#[test]
fn test_preselected_doctor_is_locked() {
    let mut wizard = BookingWizard::new(today(), Some(3));
    assert!(wizard.is_preselected());
    assert_eq!(wizard.doctor().map(|d| d.name), Some("Dr. Deedat Chowdhury"));
    assert!(!wizard.select_doctor(1));
    assert!(wizard.can_proceed());
}

#[test]
fn test_unknown_preselection_ignored() {
    let wizard = BookingWizard::new(today(), Some(99));
    assert!(!wizard.is_preselected());
    assert!(matches!(wizard.step(), Step::Doctor(s) if s.doctor.is_none()));
}

#[test]
fn test_end_to_end_booking() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, "appointments");
    let prior_max = store.list().unwrap().iter().map(|a| a.id).max().unwrap();

    let mut wizard = wizard_at_details();
    *wizard.reason_mut().unwrap() = "checkup".to_string();
    let saved = wizard.submit(&store).unwrap();

    assert_eq!(saved.id, prior_max + 1);
    assert_eq!(saved.status, AppointmentStatus::Upcoming);
    assert_eq!(saved.doctor.name, "Dr. Rahat Khandokar");
    assert_eq!(saved.date, day(2025, 6, 1));
    assert_eq!(saved.time.as_str(), "2:00 PM");
    assert_eq!(saved.reason.as_deref(), Some("checkup"));
    assert_eq!(store.list().unwrap().last(), Some(&saved));
    assert!(!wizard.is_submitting());
}

#[test]
fn test_failed_submit_stays_on_details() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, "appointments");
    store.list().unwrap();

    let mut wizard = wizard_at_details();
    *wizard.reason_mut().unwrap() = "checkup".to_string();

    slots.fail_writes(true);
    assert!(wizard.submit(&store).is_err());
    assert_eq!(wizard.step_number(), 3);
    assert!(!wizard.is_submitting());
    assert!(wizard.can_submit());

    slots.fail_writes(false);
    assert_eq!(wizard.submit(&store).unwrap().id, 6);
}

#[test]
fn test_summary() {
    let wizard = wizard_at_details();
    let summary = wizard.summary().unwrap();
    assert_eq!(summary.doctor, "Dr. Rahat Khandokar");
    assert_eq!(summary.specialty, "Urologist");
    assert_eq!(summary.date, "Sunday, June 1, 2025");
    assert_eq!(summary.time, "2:00 PM");
    assert_eq!(format_long_date(day(2025, 12, 25)), "Thursday, December 25, 2025");
}
