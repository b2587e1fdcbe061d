//! Doctor catalog.

use serde::{Deserialize, Serialize};

/// A bookable doctor. Static reference data, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub id: u32,
    pub name: &'static str,
    pub specialty: &'static str,
    pub image: &'static str,
}

/// Copy of a doctor's details taken at booking time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorSnapshot {
    pub name: String,
    pub specialty: String,
    pub image: String,
}

const CATALOG: [Doctor; 5] = [
    Doctor {
        id: 1,
        name: "Dr. Abir Banik",
        specialty: "Fart Analyst",
        image: "/images/doctors/doctor3.png",
    },
    Doctor {
        id: 2,
        name: "Dr. Rahat Khandokar",
        specialty: "Urologist",
        image: "/images/doctors/doctor2.png",
    },
    Doctor {
        id: 3,
        name: "Dr. Deedat Chowdhury",
        specialty: "Plastic Surgeon",
        image: "/images/doctors/doctor1.png",
    },
    Doctor {
        id: 4,
        name: "Dr. Kazi Anwar",
        specialty: "Flatulogist",
        image: "/images/doctors/doctor5.png",
    },
    Doctor {
        id: 5,
        name: "Dr. Sajid Sehgal",
        specialty: "Sexologist",
        image: "/images/doctors/doctor4.png",
    },
];

/// All bookable doctors in display order.
pub fn catalog() -> &'static [Doctor] {
    &CATALOG
}

/// Look up a doctor by id.
pub fn find(id: u32) -> Option<&'static Doctor> {
    CATALOG.iter().find(|d| d.id == id)
}

impl Doctor {
    /// Value copy stored inside an appointment.
    pub fn snapshot(&self) -> DoctorSnapshot {
        DoctorSnapshot {
            name: self.name.to_string(),
            specialty: self.specialty.to_string(),
            image: self.image.to_string(),
        }
    }
}
