//! Appointment booking flow.

pub mod wizard;

#[cfg(test)]
mod tests;

pub use wizard::{BookingWizard, DetailsStep, DoctorStep, ScheduleStep, Step, Summary, format_long_date};
