//! Appointment records and booking time slots.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::doctor::{self, DoctorSnapshot};

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Get human-readable name for the status.
    pub fn name(&self) -> &'static str {
        match self {
            AppointmentStatus::Upcoming => "Upcoming",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

/// Label of a booking slot, e.g. `2:30 PM`.
///
/// Stored records may hold labels outside [`TIME_SLOTS`], so any string
/// deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

/// Half-hour slots offered for a single business day.
pub const TIME_SLOTS: [&str; 14] = [
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "1:00 PM", "1:30 PM", "2:00 PM",
    "2:30 PM", "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM",
];

impl TimeSlot {
    /// Slot from one of the offered labels.
    pub fn offered(label: &str) -> Option<Self> {
        TIME_SLOTS
            .iter()
            .find(|slot| **slot == label)
            .map(|slot| Self((*slot).to_string()))
    }

    /// All offered slots in order.
    pub fn all_offered() -> impl Iterator<Item = TimeSlot> {
        TIME_SLOTS.iter().map(|slot| Self((*slot).to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_offered(&self) -> bool {
        TIME_SLOTS.contains(&self.0.as_str())
    }

    fn raw(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u32,
    pub doctor: DoctorSnapshot,
    pub date: NaiveDate,
    pub time: TimeSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub status: AppointmentStatus,
}

/// Appointment data before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub doctor: DoctorSnapshot,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub reason: Option<String>,
    pub status: AppointmentStatus,
}

impl NewAppointment {
    /// Attach the id assigned by the store.
    pub fn with_id(self, id: u32) -> Appointment {
        Appointment {
            id,
            doctor: self.doctor,
            date: self.date,
            time: self.time,
            reason: self.reason,
            status: self.status,
        }
    }
}

/// Records written on first access when no collection is persisted.
pub fn seed_appointments() -> Vec<Appointment> {
    let seed = [
        (1, 1, (2025, 5, 23), "10:00 AM", AppointmentStatus::Upcoming),
        (2, 2, (2025, 5, 25), "2:30 PM", AppointmentStatus::Upcoming),
        (3, 3, (2025, 4, 15), "9:30 AM", AppointmentStatus::Completed),
        (4, 4, (2025, 4, 5), "11:00 AM", AppointmentStatus::Cancelled),
        (5, 5, (2025, 5, 5), "11:11 AM", AppointmentStatus::Cancelled),
    ];

    seed.into_iter()
        .filter_map(|(id, doctor_id, (y, m, d), time, status)| {
            Some(Appointment {
                id,
                doctor: doctor::find(doctor_id)?.snapshot(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                time: TimeSlot::raw(time),
                reason: None,
                status,
            })
        })
        .collect()
}
