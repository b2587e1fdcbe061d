//! Appointment collection kept in a single slot as a JSON array.

use tracing::{debug, info, warn};

use super::AppointmentRepository;
use crate::error::{AppError, Result};
use crate::models::{Appointment, AppointmentStatus, NewAppointment, seed_appointments};
use crate::storage::SlotStorage;

/// Slot-backed appointment store. Every mutation rewrites the whole slot.
#[derive(Debug, Clone)]
pub struct AppointmentStore<S> {
    slots: S,
    key: String,
}

impl<S: SlotStorage> AppointmentStore<S> {
    pub fn new(slots: S, key: impl Into<String>) -> Self {
        Self { slots, key: key.into() }
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get appointment by ID.
    pub fn get(&self, id: u32) -> Result<Option<Appointment>> {
        Ok(self.list()?.into_iter().find(|a| a.id == id))
    }

    /// Appointments with the given status, in stored order.
    pub fn by_status(&self, status: AppointmentStatus) -> Result<Vec<Appointment>> {
        Ok(self.list()?.into_iter().filter(|a| a.status == status).collect())
    }

    /// Mark an appointment as cancelled.
    pub fn cancel(&self, id: u32) -> Result<Appointment> {
        let mut appointment = self
            .get(id)?
            .ok_or_else(|| AppError::not_found(format!("appointment {}", id)))?;
        appointment.status = AppointmentStatus::Cancelled;
        self.update(appointment.clone())?;
        Ok(appointment)
    }

    fn persist(&self, appointments: &[Appointment]) -> Result<()> {
        let json = serde_json::to_string(appointments)?;
        self.slots.write(&self.key, &json)
    }
}

/// Next id after the current maximum, 1 for an empty collection.
///
/// `None` once the maximum id is `u32::MAX`.
pub fn next_id(appointments: &[Appointment]) -> Option<u32> {
    match appointments.iter().map(|a| a.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

impl<S: SlotStorage> AppointmentRepository for AppointmentStore<S> {
    fn list(&self) -> Result<Vec<Appointment>> {
        match self.slots.read(&self.key)? {
            Some(content) => serde_json::from_str(&content).map_err(|e| AppError::corrupt(&self.key, e)),
            None => {
                let seed = seed_appointments();
                self.persist(&seed)?;
                info!("Seeded slot '{}' with {} appointments", self.key, seed.len());
                Ok(seed)
            }
        }
    }

    fn save(&self, appointment: NewAppointment) -> Result<Appointment> {
        let mut appointments = self.list()?;
        let id = next_id(&appointments)
            .ok_or_else(|| AppError::validation(format!("Slot '{}' has no appointment ids left", self.key)))?;
        let stored = appointment.with_id(id);
        appointments.push(stored.clone());
        self.persist(&appointments)?;
        info!("Saved appointment {} with {}", stored.id, stored.doctor.name);
        Ok(stored)
    }

    fn update(&self, appointment: Appointment) -> Result<bool> {
        let mut appointments = self.list()?;
        let Some(existing) = appointments.iter_mut().find(|a| a.id == appointment.id) else {
            warn!("Update skipped: no appointment {}", appointment.id);
            return Ok(false);
        };
        let id = appointment.id;
        *existing = appointment;
        self.persist(&appointments)?;
        debug!("Updated appointment {}", id);
        Ok(true)
    }

    fn remove(&self, id: u32) -> Result<bool> {
        let mut appointments = self.list()?;
        let before = appointments.len();
        appointments.retain(|a| a.id != id);
        if appointments.len() == before {
            warn!("Remove skipped: no appointment {}", id);
            return Ok(false);
        }
        self.persist(&appointments)?;
        debug!("Removed appointment {}", id);
        Ok(true)
    }
}
