//! Appointment types for both sides of the portal.
//!
//! Patients see `Appointment` (who they are seeing); doctors see
//! `DoctorAppointment` (who is coming in) with an accept/reject lifecycle.

use serde::{Deserialize, Serialize};

/// In-person visit or video consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitKind {
    InPerson,
    Video,
}

impl std::fmt::Display for VisitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InPerson => write!(f, "in-person"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// Status of a patient-side appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// An appointment as seen by the patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub doctor_name: String,
    pub specialty: String,
    /// Human date label ("Tomorrow", "Jan 15, 2024").
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub kind: VisitKind,
    pub reason: Option<String>,
}

impl Appointment {
    /// Only upcoming video appointments expose a "Join Video Call" action.
    #[must_use]
    pub fn is_joinable(&self) -> bool {
        self.status == AppointmentStatus::Upcoming && self.kind == VisitKind::Video
    }
}

/// Lifecycle of an appointment on the doctor's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoctorAppointmentStatus {
    Pending,
    Accepted,
    Completed,
    Cancelled,
}

impl std::fmt::Display for DoctorAppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Actions a doctor can take on an appointment card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentAction {
    Accept,
    Reject,
    Complete,
    JoinCall,
    Notes,
}

impl std::fmt::Display for AppointmentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Reject => write!(f, "reject"),
            Self::Complete => write!(f, "complete"),
            Self::JoinCall => write!(f, "join call"),
            Self::Notes => write!(f, "notes"),
        }
    }
}

/// An appointment as seen by the doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorAppointment {
    pub id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub date: String,
    pub time: String,
    pub status: DoctorAppointmentStatus,
    pub kind: VisitKind,
    pub reason: String,
}

impl DoctorAppointment {
    /// Actions available for the current status, in card order.
    #[must_use]
    pub fn available_actions(&self) -> Vec<AppointmentAction> {
        use DoctorAppointmentStatus as S;

        let mut actions = Vec::new();
        match self.status {
            S::Pending => {
                actions.push(AppointmentAction::Accept);
                actions.push(AppointmentAction::Reject);
            }
            S::Accepted => {
                if self.kind == VisitKind::Video {
                    actions.push(AppointmentAction::JoinCall);
                }
                actions.push(AppointmentAction::Complete);
                actions.push(AppointmentAction::Notes);
            }
            S::Completed => actions.push(AppointmentAction::Notes),
            S::Cancelled => {}
        }
        actions
    }

    #[must_use]
    pub fn allows(&self, action: AppointmentAction) -> bool {
        self.available_actions().contains(&action)
    }

    #[must_use]
    pub fn is_today(&self) -> bool {
        self.date == "Today"
    }
}

/// A doctor that can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
}

/// Bookable half-hour slots.
pub const TIME_SLOTS: [&str; 12] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "02:00 PM",
    "02:30 PM", "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor_appt(status: DoctorAppointmentStatus, kind: VisitKind) -> DoctorAppointment {
        DoctorAppointment {
            id: "1".to_string(),
            patient_name: "John Doe".to_string(),
            patient_age: 34,
            date: "Today".to_string(),
            time: "9:00 AM".to_string(),
            status,
            kind,
            reason: "Follow-up consultation".to_string(),
        }
    }

    #[test]
    fn test_pending_actions() {
        let appt = doctor_appt(DoctorAppointmentStatus::Pending, VisitKind::Video);
        assert_eq!(
            appt.available_actions(),
            vec![AppointmentAction::Accept, AppointmentAction::Reject]
        );
        assert!(!appt.allows(AppointmentAction::JoinCall));
    }

    #[test]
    fn test_accepted_video_can_join() {
        let video = doctor_appt(DoctorAppointmentStatus::Accepted, VisitKind::Video);
        assert!(video.allows(AppointmentAction::JoinCall));
        assert!(video.allows(AppointmentAction::Notes));

        let in_person = doctor_appt(DoctorAppointmentStatus::Accepted, VisitKind::InPerson);
        assert!(!in_person.allows(AppointmentAction::JoinCall));
        assert!(in_person.allows(AppointmentAction::Complete));
    }

    #[test]
    fn test_cancelled_has_no_actions() {
        let appt = doctor_appt(DoctorAppointmentStatus::Cancelled, VisitKind::Video);
        assert!(appt.available_actions().is_empty());
    }

    #[test]
    fn test_patient_joinable() {
        let appt = Appointment {
            id: "1".to_string(),
            doctor_name: "Dr. Smith".to_string(),
            specialty: "Cardiology".to_string(),
            date: "Tomorrow".to_string(),
            time: "10:00 AM".to_string(),
            status: AppointmentStatus::Upcoming,
            kind: VisitKind::Video,
            reason: None,
        };
        assert!(appt.is_joinable());

        let done = Appointment {
            status: AppointmentStatus::Completed,
            ..appt
        };
        assert!(!done.is_joinable());
    }
}
