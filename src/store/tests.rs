//! Unit tests for the appointment store.

use chrono::NaiveDate;

use super::appointments::next_id;
use super::{AppointmentRepository, AppointmentStore};
use crate::error::AppError;
use crate::models::{AppointmentStatus, NewAppointment, TimeSlot, doctor, seed_appointments};
use crate::storage::{DetachedSlots, FileSlots, MemorySlots, SlotStorage};

const KEY: &str = "appointments";

fn new_appointment(doctor_id: u32, day: u32) -> NewAppointment {
    NewAppointment {
        doctor: doctor::find(doctor_id).unwrap().snapshot(),
        date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        time: TimeSlot::offered("2:00 PM").unwrap(),
        reason: Some("checkup".to_string()),
        status: AppointmentStatus::Upcoming,
    }
}

#[test]
fn test_list_seeds_empty_slot() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, KEY);

    let listed = store.list().unwrap();
    assert_eq!(listed, seed_appointments());

    let persisted = slots.read(KEY).unwrap().expect("seed persisted");
    let parsed: Vec<crate::models::Appointment> = serde_json::from_str(&persisted).unwrap();
    assert_eq!(parsed, seed_appointments());
}

#[test]
fn test_list_is_idempotent() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, KEY);
    let first = store.list().unwrap();
    let stamp = slots.stamp(KEY);
    let second = store.list().unwrap();
    assert_eq!(first, second);
    assert_eq!(stamp, slots.stamp(KEY));
}

#[test]
fn test_detached_returns_seed_without_persisting() {
    let store = AppointmentStore::new(DetachedSlots, KEY);
    assert_eq!(store.list().unwrap().len(), 5);
    let saved = store.save(new_appointment(1, 2)).unwrap();
    assert_eq!(saved.id, 6);
    assert_eq!(store.list().unwrap().len(), 5);
}

#[test]
fn test_save_assigns_max_plus_one() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, KEY);
    store.list().unwrap();
    assert!(store.remove(4).unwrap());

    // ids {1,2,3,5}
    let saved = store.save(new_appointment(2, 1)).unwrap();
    assert_eq!(saved.id, 6);
    assert_eq!(store.list().unwrap().last(), Some(&saved));
}

#[test]
fn test_save_on_empty_collection_starts_at_one() {
    let slots = MemorySlots::new();
    slots.write(KEY, "[]").unwrap();
    let store = AppointmentStore::new(&slots, KEY);

    let saved = store.save(new_appointment(3, 10)).unwrap();
    assert_eq!(saved.id, 1);
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_next_id() {
    assert_eq!(next_id(&[]), Some(1));
    assert_eq!(next_id(&seed_appointments()), Some(6));
    assert_eq!(next_id(&[new_appointment(1, 2).with_id(u32::MAX)]), None);
}

#[test]
fn test_save_fails_when_ids_are_exhausted() {
    let slots = MemorySlots::new();
    let last = vec![new_appointment(1, 2).with_id(u32::MAX)];
    slots.write(KEY, &serde_json::to_string(&last).unwrap()).unwrap();
    let store = AppointmentStore::new(&slots, KEY);

    assert!(matches!(store.save(new_appointment(2, 3)), Err(AppError::Validation(_))));
    assert_eq!(store.list().unwrap(), last);
}

#[test]
fn test_update_replaces_in_place() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, KEY);
    let mut second = store.list().unwrap()[1].clone();
    second.status = AppointmentStatus::Completed;
    second.reason = Some("follow-up".to_string());

    assert!(store.update(second.clone()).unwrap());

    let listed = store.list().unwrap();
    assert_eq!(listed[1], second);
    assert_eq!(listed.len(), 5);
}

#[test]
fn test_update_missing_id_is_noop() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, KEY);
    let before = store.list().unwrap();
    let stamp = slots.stamp(KEY);

    let mut ghost = before[0].clone();
    ghost.id = 42;
    assert!(!store.update(ghost).unwrap());

    assert_eq!(store.list().unwrap(), before);
    assert_eq!(stamp, slots.stamp(KEY));
}

#[test]
fn test_remove_missing_id_is_noop() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, KEY);
    let before = store.list().unwrap();

    assert!(!store.remove(99).unwrap());
    assert_eq!(store.list().unwrap(), before);
}

#[test]
fn test_remove_drops_exactly_one() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, KEY);
    let before = store.list().unwrap();

    assert!(store.remove(3).unwrap());

    let after = store.list().unwrap();
    assert_eq!(after.len(), before.len() - 1);
    let expected: Vec<_> = before.into_iter().filter(|a| a.id != 3).collect();
    assert_eq!(after, expected);
}

#[test]
fn test_corrupt_slot_is_reported() {
    let slots = MemorySlots::new();
    slots.write(KEY, "{not json").unwrap();
    let store = AppointmentStore::new(&slots, KEY);

    match store.list() {
        Err(AppError::Corrupt { slot, .. }) => assert_eq!(slot, KEY),
        other => panic!("expected corrupt slot, got {:?}", other),
    }
    // Nothing overwrote the bad content.
    assert_eq!(slots.read(KEY).unwrap().as_deref(), Some("{not json"));
}

#[test]
fn test_failed_write_leaves_collection_untouched() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, KEY);
    let before = store.list().unwrap();

    slots.fail_writes(true);
    assert!(matches!(store.save(new_appointment(1, 3)), Err(AppError::Io(_))));
    slots.fail_writes(false);

    assert_eq!(store.list().unwrap(), before);
}

#[test]
fn test_cancel_and_filters() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, KEY);

    let cancelled = store.cancel(1).unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert_eq!(store.get(1).unwrap().unwrap().status, AppointmentStatus::Cancelled);

    let upcoming = store.by_status(AppointmentStatus::Upcoming).unwrap();
    assert_eq!(upcoming.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2]);

    assert!(matches!(store.cancel(77), Err(AppError::NotFound(_))));
}

#[test]
fn test_doctor_snapshot_is_a_copy() {
    let slots = MemorySlots::new();
    let store = AppointmentStore::new(&slots, KEY);
    let mut input = new_appointment(2, 1);
    input.doctor.specialty = "Renamed later".to_string();
    let saved = store.save(input).unwrap();

    let stored = store.get(saved.id).unwrap().unwrap();
    assert_eq!(stored.doctor.specialty, "Renamed later");
    assert_eq!(doctor::find(2).unwrap().specialty, "Urologist");
}

#[test]
fn test_file_slots_persist_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let saved = {
        let store = AppointmentStore::new(FileSlots::new(dir.path()), KEY);
        store.save(new_appointment(5, 20)).unwrap()
    };

    let reopened = AppointmentStore::new(FileSlots::new(dir.path()), KEY);
    let listed = reopened.list().unwrap();
    assert_eq!(listed.len(), 6);
    assert_eq!(listed.last(), Some(&saved));
}
