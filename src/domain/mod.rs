//! Domain layer: Core portal types.
//!
//! Plain data and local invariants only. Nothing here performs I/O,
//! talks to a collaborator or knows about the terminal.

mod appointment;
mod credentials;
mod navigation;
mod notes;
mod patient;
pub mod pharmacy;
mod report;

pub use appointment::{
    Appointment, AppointmentAction, AppointmentStatus, Doctor, DoctorAppointment,
    DoctorAppointmentStatus, VisitKind, TIME_SLOTS,
};
pub use credentials::{AuthMode, CredentialField, Credentials, ValidationError};
pub use navigation::{
    AppState, CallPhase, DashboardView, DoctorView, Language, PatientView, Role, Selection, Tab,
};
pub use notes::{ConsultationNote, NoteField};
pub use patient::{PatientDocument, PatientRecord, PatientStatus};
pub use pharmacy::{Cart, CartError, CartItem, Medicine, MedicineDetail, Order};
pub use report::{LabResult, Report, ReportDetail, ReportStatus, ReportSubject, ResultFlag};
