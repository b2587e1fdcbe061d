//! Appointment persistence.

pub mod appointments;

#[cfg(test)]
mod tests;

use crate::error::Result;
use crate::models::{Appointment, NewAppointment};

pub use appointments::AppointmentStore;

/// Data access for the appointment collection.
///
/// `update` and `remove` return `Ok(false)` when no record has the given id;
/// nothing is written in that case.
pub trait AppointmentRepository {
    /// Full collection in stored order.
    fn list(&self) -> Result<Vec<Appointment>>;

    /// Assign the next id, append and persist.
    fn save(&self, appointment: NewAppointment) -> Result<Appointment>;

    /// Replace the record with the same id.
    fn update(&self, appointment: Appointment) -> Result<bool>;

    /// Delete the record with this id.
    fn remove(&self, id: u32) -> Result<bool>;
}
