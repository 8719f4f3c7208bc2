//! Dashboard sessions: one per login, dropped on logout.
//!
//! A session owns its navigator and its own copies of the collections it
//! shows. Mutations (accepting an appointment, filling a cart, attaching a
//! document) live only as long as the session.

mod doctor;
mod patient;

pub use doctor::DoctorSession;
pub use patient::{BookingForm, PatientSession, ScannerStep};

use crate::domain::{AppointmentAction, CartError, DoctorAppointmentStatus};

/// Errors raised by dashboard operations. None of them end the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Appointment {0} cannot be joined")]
    NotJoinable(String),

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Cannot {action} an appointment that is {status}")]
    ActionNotAllowed {
        action: AppointmentAction,
        status: DoctorAppointmentStatus,
    },

    #[error("Call flow: {0}")]
    CallFlowViolation(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Please fill in all required fields")]
    IncompleteBooking,

    #[error("Unknown time slot: {0}")]
    InvalidSlot(String),

    #[error("Finish the scan before saving")]
    ScanIncomplete,

    #[error("Select an appointment first")]
    NoAppointmentSelected,

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
    Emergency,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    #[must_use]
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn error(err: &SessionError) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Action unavailable".to_string(),
            body: err.to_string(),
        }
    }

    /// Emergency alert. Nothing is transmitted anywhere.
    #[must_use]
    pub fn sos() -> Self {
        tracing::warn!("SOS emergency alert raised");
        Self {
            kind: NoticeKind::Emergency,
            title: "Emergency Alert Sent".to_string(),
            body: "Your emergency contact has been notified.".to_string(),
        }
    }
}

/// Record a failed operation as a notice and hand the error back.
pub(crate) fn report<T>(
    notice: &mut Option<Notice>,
    result: Result<T, SessionError>,
) -> Result<T, SessionError> {
    if let Err(err) = &result {
        tracing::warn!("Dashboard operation refused: {err}");
        *notice = Some(Notice::error(err));
    }
    result
}

fn next_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0);
    (max + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_skips_non_numeric() {
        assert_eq!(next_id(["1", "3", "d1"].into_iter()), "4");
        assert_eq!(next_id(std::iter::empty()), "1");
    }

    #[test]
    fn test_report_sets_notice() {
        let mut notice = None;
        let result: Result<(), SessionError> = report(&mut notice, Err(SessionError::EmptyCart));
        assert!(result.is_err());
        let notice = notice.expect("notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.body, "Your cart is empty");
    }

    #[test]
    fn test_sos_notice() {
        let notice = Notice::sos();
        assert_eq!(notice.kind, NoticeKind::Emergency);
        assert_eq!(notice.title, "Emergency Alert Sent");
    }
}
