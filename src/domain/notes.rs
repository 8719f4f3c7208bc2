//! Consultation notes written by the doctor after a visit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Notes,
    Diagnosis,
    Prescription,
    FollowUp,
}

impl NoteField {
    pub const ALL: [NoteField; 4] = [Self::Notes, Self::Diagnosis, Self::Prescription, Self::FollowUp];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Notes => "Consultation Notes",
            Self::Diagnosis => "Diagnosis",
            Self::Prescription => "Prescription",
            Self::FollowUp => "Follow-up",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationNote {
    /// Appointment the note belongs to. May be absent when notes are opened
    /// without a selected appointment.
    pub appointment_id: Option<String>,
    pub notes: String,
    pub diagnosis: String,
    pub prescription: String,
    pub follow_up: String,
}

impl ConsultationNote {
    #[must_use]
    pub fn for_appointment(appointment_id: Option<String>) -> Self {
        Self {
            appointment_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn get(&self, field: NoteField) -> &str {
        match field {
            NoteField::Notes => &self.notes,
            NoteField::Diagnosis => &self.diagnosis,
            NoteField::Prescription => &self.prescription,
            NoteField::FollowUp => &self.follow_up,
        }
    }

    pub fn get_mut(&mut self, field: NoteField) -> &mut String {
        match field {
            NoteField::Notes => &mut self.notes,
            NoteField::Diagnosis => &mut self.diagnosis,
            NoteField::Prescription => &mut self.prescription,
            NoteField::FollowUp => &mut self.follow_up,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        NoteField::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }
}
