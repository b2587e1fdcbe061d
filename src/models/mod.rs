//! Data models for doctors and appointments.

pub mod appointment;
pub mod doctor;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment, TIME_SLOTS, TimeSlot, seed_appointments};
pub use doctor::{Doctor, DoctorSnapshot};
