//! Three-step booking wizard state machine.
//!
//! Each step owns exactly the selections that are guaranteed at that point,
//! so the details step cannot exist without a doctor, a date and a time.

use chrono::NaiveDate;
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::models::{Appointment, AppointmentStatus, Doctor, NewAppointment, TimeSlot, doctor};
use crate::store::AppointmentRepository;

/// Selections made in later steps, kept while the user goes back to step 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carried {
    date: Option<NaiveDate>,
    time: Option<TimeSlot>,
    reason: String,
}

/// Step 1: choose a doctor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorStep {
    pub doctor: Option<&'static Doctor>,
    carried: Carried,
}

/// Step 2: choose a date and a time slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleStep {
    pub doctor: &'static Doctor,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    reason: String,
}

/// Step 3: reason for the visit and confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsStep {
    pub doctor: &'static Doctor,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Doctor(DoctorStep),
    Schedule(ScheduleStep),
    Details(DetailsStep),
}

/// Read-only rows for the confirmation card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub doctor: &'static str,
    pub specialty: &'static str,
    pub date: String,
    pub time: String,
}

/// Booking wizard state.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: Step,
    today: NaiveDate,
    /// Doctor was chosen before the wizard opened and cannot be changed.
    preselected: bool,
    submitting: bool,
}

impl BookingWizard {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 3;

    /// Start at step 1. A `preselect` id naming a catalog doctor selects and
    /// locks that doctor; unknown ids are ignored.
    pub fn new(today: NaiveDate, preselect: Option<u32>) -> Self {
        let doctor = preselect.and_then(doctor::find);
        Self {
            step: Step::Doctor(DoctorStep {
                doctor,
                carried: Carried::default(),
            }),
            today,
            preselected: doctor.is_some(),
            submitting: false,
        }
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    /// Current step, 1-based.
    pub fn step_number(&self) -> usize {
        match self.step {
            Step::Doctor(_) => 1,
            Step::Schedule(_) => 2,
            Step::Details(_) => 3,
        }
    }

    /// Get step title.
    pub fn step_title(&self) -> &'static str {
        match self.step {
            Step::Doctor(_) => "Select a Doctor",
            Step::Schedule(_) => "Select Date and Time",
            Step::Details(_) => "Appointment Details",
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn is_preselected(&self) -> bool {
        self.preselected
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn doctor(&self) -> Option<&'static Doctor> {
        match &self.step {
            Step::Doctor(s) => s.doctor,
            Step::Schedule(s) => Some(s.doctor),
            Step::Details(s) => Some(s.doctor),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match &self.step {
            Step::Doctor(s) => s.carried.date,
            Step::Schedule(s) => s.date,
            Step::Details(s) => Some(s.date),
        }
    }

    pub fn time(&self) -> Option<&TimeSlot> {
        match &self.step {
            Step::Doctor(s) => s.carried.time.as_ref(),
            Step::Schedule(s) => s.time.as_ref(),
            Step::Details(s) => Some(&s.time),
        }
    }

    pub fn reason(&self) -> &str {
        match &self.step {
            Step::Doctor(s) => &s.carried.reason,
            Step::Schedule(s) => &s.reason,
            Step::Details(s) => &s.reason,
        }
    }

    /// Choose a catalog doctor. Only in step 1 and only without a preselection.
    pub fn select_doctor(&mut self, id: u32) -> bool {
        if self.preselected {
            return false;
        }
        match (&mut self.step, doctor::find(id)) {
            (Step::Doctor(s), Some(found)) => {
                s.doctor = Some(found);
                true
            }
            _ => false,
        }
    }

    /// Choose the appointment date. Dates before today are rejected.
    pub fn set_date(&mut self, date: NaiveDate) -> bool {
        if date < self.today {
            return false;
        }
        match &mut self.step {
            Step::Schedule(s) => {
                s.date = Some(date);
                true
            }
            _ => false,
        }
    }

    /// Choose one of the offered slots. Requires a date first.
    pub fn set_time(&mut self, slot: &TimeSlot) -> bool {
        if !slot.is_offered() {
            return false;
        }
        match &mut self.step {
            Step::Schedule(s) if s.date.is_some() => {
                s.time = Some(slot.clone());
                true
            }
            _ => false,
        }
    }

    /// Editable reason, available in step 3.
    pub fn reason_mut(&mut self) -> Option<&mut String> {
        match &mut self.step {
            Step::Details(s) => Some(&mut s.reason),
            _ => None,
        }
    }

    /// Check if user can proceed to next step.
    pub fn can_proceed(&self) -> bool {
        match &self.step {
            Step::Doctor(s) => s.doctor.is_some(),
            Step::Schedule(s) => s.date.is_some() && s.time.is_some(),
            Step::Details(_) => false,
        }
    }

    /// Advance one step if the current step is complete.
    pub fn next(&mut self) -> bool {
        if !self.can_proceed() {
            return false;
        }
        let current = std::mem::replace(&mut self.step, Step::Doctor(DoctorStep::default()));
        self.step = match current {
            Step::Doctor(DoctorStep {
                doctor: Some(doctor),
                carried,
            }) => Step::Schedule(ScheduleStep {
                doctor,
                date: carried.date,
                time: carried.time,
                reason: carried.reason,
            }),
            Step::Schedule(ScheduleStep {
                doctor,
                date: Some(date),
                time: Some(time),
                reason,
            }) => Step::Details(DetailsStep {
                doctor,
                date,
                time,
                reason,
            }),
            other => other,
        };
        true
    }

    /// Go back one step, keeping every selection.
    pub fn back(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        let current = std::mem::replace(&mut self.step, Step::Doctor(DoctorStep::default()));
        let (step, moved) = match current {
            Step::Doctor(s) => (Step::Doctor(s), false),
            Step::Schedule(s) => (
                Step::Doctor(DoctorStep {
                    doctor: Some(s.doctor),
                    carried: Carried {
                        date: s.date,
                        time: s.time,
                        reason: s.reason,
                    },
                }),
                true,
            ),
            Step::Details(s) => (
                Step::Schedule(ScheduleStep {
                    doctor: s.doctor,
                    date: Some(s.date),
                    time: Some(s.time),
                    reason: s.reason,
                }),
                true,
            ),
        };
        self.step = step;
        moved
    }

    /// Submission needs a non-blank reason and no submission in flight.
    pub fn can_submit(&self) -> bool {
        match &self.step {
            Step::Details(s) => !self.submitting && !s.reason.trim().is_empty(),
            _ => false,
        }
    }

    /// The record that submitting now would create.
    pub fn draft(&self) -> Option<NewAppointment> {
        match &self.step {
            Step::Details(s) => Some(NewAppointment {
                doctor: s.doctor.snapshot(),
                date: s.date,
                time: s.time.clone(),
                reason: Some(s.reason.clone()),
                status: AppointmentStatus::Upcoming,
            }),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<Summary> {
        match &self.step {
            Step::Details(s) => Some(Summary {
                doctor: s.doctor.name,
                specialty: s.doctor.specialty,
                date: format_long_date(s.date),
                time: s.time.to_string(),
            }),
            _ => None,
        }
    }

    /// Save the appointment. On failure the wizard stays on step 3 so the
    /// user can retry; the in-flight flag is cleared either way.
    pub fn submit(&mut self, repo: &impl AppointmentRepository) -> Result<Appointment> {
        if !self.can_submit() {
            return Err(AppError::validation("Appointment details are incomplete"));
        }
        let draft = self
            .draft()
            .ok_or_else(|| AppError::validation("Appointment details are incomplete"))?;

        self.submitting = true;
        let result = repo.save(draft);
        self.submitting = false;

        match &result {
            Ok(saved) => info!(
                "Booked appointment {} with {} on {} at {}",
                saved.id, saved.doctor.name, saved.date, saved.time
            ),
            Err(e) => error!("Error saving appointment: {}", e),
        }
        result
    }
}

/// Long form used on the summary card, e.g. `Sunday, June 1, 2025`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
