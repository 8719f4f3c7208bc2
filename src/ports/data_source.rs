//! Data source port: Trait for the portal's seed collections.
//!
//! Each dashboard session asks for fresh copies when it mounts and owns
//! them until logout. Nothing written to those copies comes back here.

use crate::domain::{
    Appointment, Doctor, DoctorAppointment, Medicine, MedicineDetail, PatientRecord, Report,
    ReportDetail,
};

/// Read-only provider of portal collections.
pub trait CareDataSource: Send + Sync {
    /// Appointments shown to the signed-in patient.
    fn patient_appointments(&self) -> Vec<Appointment>;

    /// Appointment requests shown to the signed-in doctor.
    fn doctor_appointments(&self) -> Vec<DoctorAppointment>;

    /// Doctors available for booking.
    fn doctors(&self) -> Vec<Doctor>;

    /// The doctor's patient roster.
    fn patients(&self) -> Vec<PatientRecord>;

    /// Reports list entries.
    fn reports(&self) -> Vec<Report>;

    /// Full detail for a report.
    ///
    /// # Returns
    /// `None` if the id is unknown.
    fn report_detail(&self, report_id: &str) -> Option<ReportDetail>;

    /// Pharmacy catalog.
    fn medicines(&self) -> Vec<Medicine>;

    /// Product information for a medicine.
    fn medicine_detail(&self, medicine_id: &str) -> Option<MedicineDetail>;
}
