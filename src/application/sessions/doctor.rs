//! Doctor dashboard session.

use std::sync::Arc;

use super::{next_id, report, Notice, SessionError};
use crate::application::dashboard::DashboardNavigator;
use crate::application::voice::VoiceIntent;
use crate::domain::{
    AppointmentAction, ConsultationNote, DoctorAppointment, DoctorAppointmentStatus, DoctorView,
    Medicine, PatientDocument, PatientRecord, PatientStatus, Report, Selection, Tab,
};
use crate::ports::{CapturedDocument, CareDataSource};

pub struct DoctorSession {
    nav: DashboardNavigator<DoctorView>,
    appointments: Vec<DoctorAppointment>,
    patients: Vec<PatientRecord>,
    reports: Vec<Report>,
    medicines: Vec<Medicine>,
    notes: Vec<ConsultationNote>,
    draft: ConsultationNote,
    notice: Option<Notice>,
}

impl DoctorSession {
    #[must_use]
    pub fn new(data: Arc<dyn CareDataSource>) -> Self {
        Self {
            nav: DashboardNavigator::new(),
            appointments: data.doctor_appointments(),
            patients: data.patients(),
            reports: data.reports(),
            medicines: data.medicines(),
            notes: Vec::new(),
            draft: ConsultationNote::default(),
            notice: None,
        }
    }

    #[must_use]
    pub fn nav(&self) -> &DashboardNavigator<DoctorView> {
        &self.nav
    }

    #[must_use]
    pub fn view(&self) -> DoctorView {
        self.nav.view()
    }

    #[must_use]
    pub fn appointments(&self) -> &[DoctorAppointment] {
        &self.appointments
    }

    #[must_use]
    pub fn todays_appointments(&self) -> Vec<&DoctorAppointment> {
        self.appointments.iter().filter(|a| a.is_today()).collect()
    }

    #[must_use]
    pub fn patients(&self) -> &[PatientRecord] {
        &self.patients
    }

    #[must_use]
    pub fn active_patients(&self) -> usize {
        self.patients
            .iter()
            .filter(|p| p.status != PatientStatus::Inactive)
            .count()
    }

    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    #[must_use]
    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    #[must_use]
    pub fn saved_notes(&self) -> &[ConsultationNote] {
        &self.notes
    }

    #[must_use]
    pub fn draft(&self) -> &ConsultationNote {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ConsultationNote {
        &mut self.draft
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    // --- navigation ---

    /// # Errors
    /// Refused during a call.
    pub fn open(&mut self, view: DoctorView) -> Result<(), SessionError> {
        let result = self.nav.open(view, Selection::default());
        report(&mut self.notice, result)
    }

    /// # Errors
    /// Refused during a call.
    pub fn select_tab(&mut self, tab: Tab) -> Result<(), SessionError> {
        let result = self.nav.select_tab(tab);
        report(&mut self.notice, result)
    }

    /// # Errors
    /// Refused during a call.
    pub fn back(&mut self) -> Result<bool, SessionError> {
        let result = self.nav.back();
        report(&mut self.notice, result)
    }

    pub fn return_to_dashboard(&mut self) {
        self.nav.return_to_dashboard();
    }

    /// Apply a voice intent. The Notes intent starts a blank note.
    ///
    /// # Errors
    /// Refused during a call.
    pub fn apply_voice(&mut self, intent: VoiceIntent) -> Result<bool, SessionError> {
        let result = self.nav.apply_voice(intent);
        if matches!(result, Ok(true)) && self.view() == DoctorView::Notes {
            self.draft = ConsultationNote::for_appointment(self.nav.selection().appointment_id.clone());
        }
        report(&mut self.notice, result)
    }

    // --- appointment requests ---

    fn find_appointment(&mut self, id: &str) -> Result<&mut DoctorAppointment, SessionError> {
        self.appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| SessionError::NotFound(format!("appointment {id}")))
    }

    fn transition(
        &mut self,
        id: &str,
        action: AppointmentAction,
        next: DoctorAppointmentStatus,
    ) -> Result<(), SessionError> {
        let appointment = self.find_appointment(id)?;
        if !appointment.allows(action) {
            return Err(SessionError::ActionNotAllowed {
                action,
                status: appointment.status,
            });
        }
        appointment.status = next;
        tracing::info!(id, %action, status = %next, "Appointment updated");
        Ok(())
    }

    /// # Errors
    /// `ActionNotAllowed` unless pending.
    pub fn accept(&mut self, id: &str) -> Result<(), SessionError> {
        let result = self.transition(id, AppointmentAction::Accept, DoctorAppointmentStatus::Accepted);
        report(&mut self.notice, result)
    }

    /// # Errors
    /// `ActionNotAllowed` unless pending.
    pub fn reject(&mut self, id: &str) -> Result<(), SessionError> {
        let result = self.transition(id, AppointmentAction::Reject, DoctorAppointmentStatus::Cancelled);
        report(&mut self.notice, result)
    }

    /// # Errors
    /// `ActionNotAllowed` unless accepted.
    pub fn complete(&mut self, id: &str) -> Result<(), SessionError> {
        let result =
            self.transition(id, AppointmentAction::Complete, DoctorAppointmentStatus::Completed);
        report(&mut self.notice, result)
    }

    /// Open the pre-call screen for an accepted video appointment.
    ///
    /// # Errors
    /// `NotJoinable` otherwise.
    pub fn join_call(&mut self, id: &str) -> Result<(), SessionError> {
        let joinable = self
            .appointments
            .iter()
            .any(|a| a.id == id && a.allows(AppointmentAction::JoinCall));
        let result = if joinable {
            self.nav.open(DoctorView::PreCall, Selection::appointment(id))
        } else {
            Err(SessionError::NotJoinable(id.to_string()))
        };
        report(&mut self.notice, result)
    }

    /// # Errors
    /// `CallFlowViolation` outside the pre-call screen.
    pub fn enter_call(&mut self) -> Result<(), SessionError> {
        let result = self.nav.join_call();
        report(&mut self.notice, result)
    }

    /// # Errors
    /// `CallFlowViolation` unless in a call.
    pub fn end_call(&mut self) -> Result<(), SessionError> {
        let result = self.nav.end_call();
        report(&mut self.notice, result)
    }

    /// Take notes for the call that just ended.
    ///
    /// # Errors
    /// `CallFlowViolation` unless on the end-call screen.
    pub fn notes_after_call(&mut self) -> Result<(), SessionError> {
        let result = self.nav.notes_after_call();
        if result.is_ok() {
            self.draft = ConsultationNote::for_appointment(self.nav.selection().appointment_id.clone());
        }
        report(&mut self.notice, result)
    }

    #[must_use]
    pub fn call_appointment(&self) -> Option<&DoctorAppointment> {
        let id = self.nav.selection().appointment_id.as_deref()?;
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Open the notes editor for an appointment.
    ///
    /// # Errors
    /// `ActionNotAllowed` for pending or cancelled appointments.
    pub fn add_notes(&mut self, id: &str) -> Result<(), SessionError> {
        let result = self.try_add_notes(id);
        report(&mut self.notice, result)
    }

    fn try_add_notes(&mut self, id: &str) -> Result<(), SessionError> {
        let appointment = self.find_appointment(id)?;
        if !appointment.allows(AppointmentAction::Notes) {
            return Err(SessionError::ActionNotAllowed {
                action: AppointmentAction::Notes,
                status: appointment.status,
            });
        }
        self.nav.open(DoctorView::Notes, Selection::appointment(id))?;
        self.draft = ConsultationNote::for_appointment(Some(id.to_string()));
        Ok(())
    }

    /// Whether the notes editor is bound to an appointment.
    #[must_use]
    pub fn has_note_target(&self) -> bool {
        self.view() == DoctorView::Notes && self.draft.appointment_id.is_some()
    }

    /// Store the draft and go back to the dashboard.
    ///
    /// # Errors
    /// `NoAppointmentSelected` when the editor was opened without an
    /// appointment; the draft and view are kept.
    pub fn save_notes(&mut self) -> Result<(), SessionError> {
        let result = if self.has_note_target() {
            self.store_draft();
            Ok(())
        } else {
            Err(SessionError::NoAppointmentSelected)
        };
        report(&mut self.notice, result)
    }

    fn store_draft(&mut self) {
        let note = std::mem::take(&mut self.draft);
        if note.is_blank() {
            tracing::debug!("Discarding blank consultation note");
        } else {
            tracing::info!(appointment = ?note.appointment_id, "Consultation notes saved");
            self.notes.push(note);
            self.notice = Some(Notice::info("Notes Saved", "Patient notes have been saved"));
        }
        self.nav.return_to_dashboard();
    }

    // --- patients ---

    #[must_use]
    pub fn search_patients(&self, query: &str) -> Vec<&PatientRecord> {
        self.patients.iter().filter(|p| p.matches(query)).collect()
    }

    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn view_patient(&mut self, id: &str) -> Result<(), SessionError> {
        let result = if self.patients.iter().any(|p| p.id == id) {
            self.nav.open(DoctorView::PatientDetail, Selection::patient(id))
        } else {
            Err(SessionError::NotFound(format!("patient {id}")))
        };
        report(&mut self.notice, result)
    }

    #[must_use]
    pub fn selected_patient(&self) -> Option<&PatientRecord> {
        let id = self.nav.selection().patient_id.as_deref()?;
        self.patients.iter().find(|p| p.id == id)
    }

    /// Attach a captured document to a patient.
    ///
    /// # Errors
    /// `NotFound` for an unknown patient.
    pub fn attach_document(
        &mut self,
        patient_id: &str,
        captured: CapturedDocument,
    ) -> Result<(), SessionError> {
        let result = self.try_attach(patient_id, captured);
        report(&mut self.notice, result)
    }

    fn try_attach(&mut self, patient_id: &str, captured: CapturedDocument) -> Result<(), SessionError> {
        let patient = self
            .patients
            .iter_mut()
            .find(|p| p.id == patient_id)
            .ok_or_else(|| SessionError::NotFound(format!("patient {patient_id}")))?;
        let id = format!(
            "d{}",
            next_id(patient.documents.iter().map(|d| d.id.trim_start_matches('d')))
        );
        tracing::info!(patient = patient_id, document = %id, "Document attached");
        patient.documents.push(PatientDocument {
            id,
            name: captured.label,
            summary: "Uploaded document".to_string(),
            url: Some(captured.url),
        });
        self.notice = Some(Notice::info("Document Uploaded", "The document was attached"));
        Ok(())
    }

    /// Raise the SOS alert.
    pub fn sos(&mut self) {
        self.notice = Some(Notice::sos());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticDataSource;
    use crate::domain::NoteField;

    fn session() -> DoctorSession {
        DoctorSession::new(Arc::new(StaticDataSource::new()))
    }

    #[test]
    fn test_accept_pending_request() {
        let mut s = session();
        s.accept("2").expect("pending can be accepted");
        assert_eq!(s.appointments()[1].status, DoctorAppointmentStatus::Accepted);

        let err = s.accept("2").expect_err("already accepted");
        assert_eq!(
            err,
            SessionError::ActionNotAllowed {
                action: AppointmentAction::Accept,
                status: DoctorAppointmentStatus::Accepted,
            }
        );
        assert!(s.notice().is_some());
    }

    #[test]
    fn test_reject_and_complete() {
        let mut s = session();
        s.reject("2").expect("reject");
        assert_eq!(s.appointments()[1].status, DoctorAppointmentStatus::Cancelled);
        assert!(s.complete("2").is_err());
        s.complete("1").expect("complete");
        assert_eq!(s.appointments()[0].status, DoctorAppointmentStatus::Completed);
        assert!(s.accept("99").is_err());
    }

    #[test]
    fn test_call_then_notes() {
        let mut s = session();
        assert!(s.join_call("2").is_err());
        s.join_call("1").expect("join");
        assert_eq!(s.view(), DoctorView::PreCall);
        assert!(s.notes_after_call().is_err());
        s.enter_call().expect("enter");
        s.end_call().expect("end");
        s.notes_after_call().expect("notes");
        assert_eq!(s.view(), DoctorView::Notes);
        assert_eq!(s.draft().appointment_id.as_deref(), Some("1"));

        *s.draft_mut().get_mut(NoteField::Diagnosis) = "Stable".to_string();
        s.save_notes().expect("save");
        assert_eq!(s.saved_notes().len(), 1);
        assert_eq!(s.view(), DoctorView::Dashboard);
    }

    #[test]
    fn test_voice_notes_without_appointment_cannot_save() {
        let mut s = session();
        assert!(s.apply_voice(VoiceIntent::Notes).expect("voice"));
        assert_eq!(s.view(), DoctorView::Notes);
        assert!(!s.has_note_target());

        *s.draft_mut().get_mut(NoteField::Notes) = "flu".to_string();
        assert_eq!(s.save_notes(), Err(SessionError::NoAppointmentSelected));
        assert!(s.saved_notes().is_empty());
        assert_eq!(s.view(), DoctorView::Notes);
        assert!(s.take_notice().is_some());
    }

    #[test]
    fn test_add_notes_requires_allowed_status() {
        let mut s = session();
        assert!(s.add_notes("2").is_err());
        s.add_notes("4").expect("completed appointment takes notes");
        assert_eq!(s.view(), DoctorView::Notes);
    }

    #[test]
    fn test_patient_detail_back_returns_to_list() {
        let mut s = session();
        s.open(DoctorView::Patients).expect("open");
        s.view_patient("2").expect("view");
        assert_eq!(s.view(), DoctorView::PatientDetail);
        assert_eq!(s.selected_patient().map(|p| p.name.as_str()), Some("Mary Smith"));
        s.back().expect("back");
        assert_eq!(s.view(), DoctorView::Patients);
    }

    #[test]
    fn test_attach_document() {
        let mut s = session();
        s.attach_document(
            "1",
            CapturedDocument {
                url: "file:///tmp/xray.png".to_string(),
                label: "X-Ray".to_string(),
            },
        )
        .expect("attach");
        let docs = &s.patients()[0].documents;
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[2].id, "d3");
        assert_eq!(docs[2].view_url(), Ok("file:///tmp/xray.png"));
        assert!(s.attach_document("9", CapturedDocument { url: String::new(), label: String::new() }).is_err());
    }

    #[test]
    fn test_search_patients() {
        let s = session();
        assert_eq!(s.search_patients("diabetes").len(), 1);
        assert_eq!(s.search_patients("").len(), 3);
    }

    #[test]
    fn test_voice_notes_starts_blank_draft() {
        let mut s = session();
        assert!(s.apply_voice(VoiceIntent::Notes).expect("voice"));
        assert_eq!(s.view(), DoctorView::Notes);
        assert!(s.draft().is_blank());
        assert!(!s.apply_voice(VoiceIntent::Cart).expect("voice"));
    }
}
