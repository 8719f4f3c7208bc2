//! Key maps for the dashboard screens.
//!
//! Session operations report their own refusals through the session notice,
//! so the handlers here discard those results.

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::application::sessions::ScannerStep;
use crate::application::{BookingForm, DashboardSession, DoctorSession, Notice, NoticeKind, PatientSession};
use crate::domain::pharmacy::CATEGORIES;
use crate::domain::{
    DoctorView, NoteField, PatientView, Tab, VisitKind, TIME_SLOTS,
};
use crate::ports::{CaptureError, CapturedDocument, DocumentCapture, ListenContext};
use crate::tui::ui::doctor::DOCTOR_CARDS;
use crate::tui::ui::patient::{BookingField, PatientCard};
use crate::tui::ui::{InputMode, ViewState};

/// What the app loop should do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    Notify(Notice),
    Logout,
    Listen(ListenContext),
}

fn ctrl(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Whether printable keys go into a text field on this screen.
#[must_use]
pub fn is_typing(session: &DashboardSession, view: &ViewState) -> bool {
    if view.input.is_some() {
        return true;
    }
    match session {
        DashboardSession::Patient(s) => match s.view() {
            PatientView::BookAppointment => true,
            PatientView::ScanDocument => s.scanner_step() == ScannerStep::Confirm,
            _ => false,
        },
        DashboardSession::Doctor(s) => s.has_note_target(),
    }
}

/// Type dictated text into whatever field has focus.
///
/// # Returns
/// `false` when the screen has no text field.
pub fn dictate(session: &mut DashboardSession, view: &mut ViewState, text: &str) -> bool {
    match view.input {
        Some(InputMode::Search) => {
            view.query.push_str(text);
            view.cursor = 0;
            return true;
        }
        Some(InputMode::FilePath) => {
            view.buffer.push_str(text);
            return true;
        }
        None => {}
    }
    match session {
        DashboardSession::Patient(s) => match s.view() {
            PatientView::BookAppointment => {
                let field = booking_field(view.field);
                match booking_text(&mut view.booking, field) {
                    Some(target) => {
                        target.push_str(text);
                        true
                    }
                    None => false,
                }
            }
            PatientView::ScanDocument if s.scanner_step() == ScannerStep::Confirm => {
                view.buffer.push_str(text);
                true
            }
            _ => false,
        },
        DashboardSession::Doctor(s) if s.has_note_target() => {
            s.draft_mut().get_mut(note_field(view.field)).push_str(text);
            true
        }
        DashboardSession::Doctor(_) => false,
    }
}

/// Keys while a search or file-path prompt is open.
///
/// # Returns
/// The submitted path when a file-path prompt is confirmed.
fn prompt_key(view: &mut ViewState, key: KeyEvent) -> Option<String> {
    let mode = view.input?;
    match key.code {
        KeyCode::Esc => {
            view.input = None;
            view.buffer.clear();
        }
        KeyCode::Enter => {
            view.input = None;
            if mode == InputMode::FilePath {
                return Some(std::mem::take(&mut view.buffer));
            }
        }
        KeyCode::Backspace => match mode {
            InputMode::Search => {
                view.query.pop();
                view.cursor = 0;
            }
            InputMode::FilePath => {
                view.buffer.pop();
            }
        },
        KeyCode::Char(c) if !ctrl(&key) => match mode {
            InputMode::Search => {
                view.query.push(c);
                view.cursor = 0;
            }
            InputMode::FilePath => view.buffer.push(c),
        },
        _ => {}
    }
    None
}

/// Capture a file from a typed path, labelled with its file name.
///
/// # Errors
/// Whatever the capture collaborator reports for the path.
pub fn capture_file(
    capture: &dyn DocumentCapture,
    path: &str,
) -> Result<CapturedDocument, CaptureError> {
    let path = Path::new(path.trim());
    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    capture.capture(path, &label)
}

fn capture_failed(err: &CaptureError) -> Notice {
    tracing::warn!("Document capture failed: {err}");
    Notice {
        kind: NoticeKind::Error,
        title: "Upload failed".to_string(),
        body: err.to_string(),
    }
}

/// Next position when cycling through `len` options.
#[must_use]
pub fn cycle_index(current: Option<usize>, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    }
}

fn next_tab(tab: Tab, forward: bool) -> Tab {
    let i = Tab::ALL.iter().position(|t| *t == tab);
    Tab::ALL[cycle_index(i, Tab::ALL.len(), forward)]
}

fn booking_field(index: usize) -> BookingField {
    BookingField::ALL[index.min(BookingField::ALL.len() - 1)]
}

fn note_field(index: usize) -> NoteField {
    NoteField::ALL[index.min(NoteField::ALL.len() - 1)]
}

fn booking_text(form: &mut BookingForm, field: BookingField) -> Option<&mut String> {
    match field {
        BookingField::Date => Some(&mut form.date),
        BookingField::Reason => Some(&mut form.reason),
        _ => None,
    }
}

fn focus_step(view: &mut ViewState, len: usize, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Tab | KeyCode::Down => view.field = (view.field + 1) % len,
        KeyCode::BackTab | KeyCode::Up => view.field = (view.field + len - 1) % len,
        _ => return false,
    }
    true
}

// --- patient ---

pub fn patient_key(
    s: &mut PatientSession,
    view: &mut ViewState,
    key: KeyEvent,
    capture: &dyn DocumentCapture,
) -> Effect {
    if view.input.is_some() {
        return match prompt_key(view, key) {
            Some(path) => match capture_file(capture, &path) {
                Ok(document) => {
                    s.attach_capture(document);
                    Effect::Nothing
                }
                Err(err) => Effect::Notify(capture_failed(&err)),
            },
            None => Effect::Nothing,
        };
    }

    match s.view() {
        PatientView::Dashboard => return patient_home_key(s, view, &key),
        PatientView::BookAppointment => return booking_key(s, view, &key),
        PatientView::ScanDocument => return scanner_key(s, view, &key),
        PatientView::AppointmentList => appointments_key(s, view, &key),
        PatientView::PreCall => {
            if key.code == KeyCode::Enter {
                let _ = s.enter_call();
            }
        }
        PatientView::InCall => call_controls(view, &key, || {
            let _ = s.end_call();
        }),
        PatientView::EndCall | PatientView::OrderConfirmation => {
            if key.code == KeyCode::Enter {
                s.return_to_dashboard();
            }
        }
        PatientView::ReportsList => reports_key(s, view, &key),
        PatientView::ReportDetail => {}
        PatientView::MedicineList => medicines_key(s, view, &key),
        PatientView::MedicineDetail => match key.code {
            KeyCode::Char('+') | KeyCode::Right => {
                view.quantity = PatientSession::clamp_quantity(i64::from(view.quantity) + 1);
            }
            KeyCode::Char('-') | KeyCode::Left => {
                view.quantity = PatientSession::clamp_quantity(i64::from(view.quantity) - 1);
            }
            KeyCode::Enter => {
                let _ = s.add_to_cart(view.quantity);
            }
            _ => {}
        },
        PatientView::Cart => cart_key(s, view, &key),
    }
    Effect::Nothing
}

fn patient_home_key(s: &mut PatientSession, view: &mut ViewState, key: &KeyEvent) -> Effect {
    let tab = s.nav().tab();
    match key.code {
        KeyCode::Up => view.cursor_up(),
        KeyCode::Down => view.cursor_down(PatientCard::ALL.len()),
        KeyCode::Left | KeyCode::Right => {
            let _ = s.select_tab(next_tab(tab, key.code == KeyCode::Right));
        }
        KeyCode::Char('o') | KeyCode::Char('O') if tab == Tab::Profile => return Effect::Logout,
        KeyCode::Enter if tab != Tab::Profile => {
            let card = PatientCard::ALL[view.clamped(PatientCard::ALL.len())];
            let _ = match card {
                PatientCard::BookAppointment => s.open(PatientView::BookAppointment),
                PatientCard::Appointments => s.open(PatientView::AppointmentList),
                PatientCard::VideoCall => s.start_quick_call(),
                PatientCard::Reports => s.open(PatientView::ReportsList),
                PatientCard::ScanDocument => s.start_scan(),
                PatientCard::Pharmacy => s.open(PatientView::MedicineList),
                PatientCard::Cart => s.open_cart(),
            };
        }
        _ => {}
    }
    Effect::Nothing
}

fn appointments_key(s: &mut PatientSession, view: &mut ViewState, key: &KeyEvent) {
    match key.code {
        KeyCode::Up => view.cursor_up(),
        KeyCode::Down => view.cursor_down(s.appointments().len()),
        KeyCode::Enter | KeyCode::Char('j') => {
            let id = s
                .appointments()
                .get(view.clamped(s.appointments().len()))
                .map(|a| a.id.clone());
            if let Some(id) = id {
                let _ = s.join_call(&id);
            }
        }
        KeyCode::Char('b') => {
            let _ = s.open(PatientView::BookAppointment);
        }
        _ => {}
    }
}

fn booking_key(s: &mut PatientSession, view: &mut ViewState, key: &KeyEvent) -> Effect {
    if focus_step(view, BookingField::ALL.len(), key) {
        return Effect::Nothing;
    }
    let field = booking_field(view.field);
    match key.code {
        KeyCode::Esc => {
            let _ = s.back();
        }
        KeyCode::Enter => {
            let _ = s.book_appointment(&view.booking);
        }
        KeyCode::Left | KeyCode::Right => {
            let forward = key.code == KeyCode::Right;
            let form = &mut view.booking;
            match field {
                BookingField::Doctor => {
                    let doctors = s.doctors();
                    let current = form
                        .doctor_id
                        .as_deref()
                        .and_then(|id| doctors.iter().position(|d| d.id == id));
                    form.doctor_id = doctors
                        .get(cycle_index(current, doctors.len(), forward))
                        .map(|d| d.id.clone());
                }
                BookingField::Time => {
                    let current = form
                        .time
                        .as_deref()
                        .and_then(|t| TIME_SLOTS.iter().position(|slot| *slot == t));
                    form.time = TIME_SLOTS
                        .get(cycle_index(current, TIME_SLOTS.len(), forward))
                        .map(|t| (*t).to_string());
                }
                BookingField::Kind => {
                    form.kind = match form.kind {
                        VisitKind::InPerson => VisitKind::Video,
                        VisitKind::Video => VisitKind::InPerson,
                    };
                }
                BookingField::Date | BookingField::Reason => {}
            }
        }
        KeyCode::Char('d') if ctrl(key) => return Effect::Listen(ListenContext::Dictation),
        KeyCode::Backspace => {
            if let Some(target) = booking_text(&mut view.booking, field) {
                target.pop();
            }
        }
        KeyCode::Char(c) if !ctrl(key) => {
            if let Some(target) = booking_text(&mut view.booking, field) {
                target.push(c);
            }
        }
        _ => {}
    }
    Effect::Nothing
}

fn call_controls(view: &mut ViewState, key: &KeyEvent, end_call: impl FnOnce()) {
    match key.code {
        KeyCode::Char('m') => view.muted = !view.muted,
        KeyCode::Char('c') => view.camera_off = !view.camera_off,
        KeyCode::Char('e') | KeyCode::Enter => end_call(),
        _ => {}
    }
}

fn scanner_key(s: &mut PatientSession, view: &mut ViewState, key: &KeyEvent) -> Effect {
    match s.scanner_step() {
        ScannerStep::Scan | ScannerStep::Crop => match key.code {
            KeyCode::Enter => s.advance_scan(),
            KeyCode::Char('f') | KeyCode::Char('F') => {
                view.input = Some(InputMode::FilePath);
                view.buffer.clear();
            }
            _ => {}
        },
        ScannerStep::Confirm => match key.code {
            KeyCode::Esc => {
                let _ = s.back();
            }
            KeyCode::Enter => {
                let label = std::mem::take(&mut view.buffer);
                let _ = s.confirm_scan(&label);
            }
            KeyCode::Char('d') if ctrl(key) => return Effect::Listen(ListenContext::Dictation),
            KeyCode::Backspace => {
                view.buffer.pop();
            }
            KeyCode::Char(c) if !ctrl(key) => view.buffer.push(c),
            _ => {}
        },
    }
    Effect::Nothing
}

fn reports_key(s: &mut PatientSession, view: &mut ViewState, key: &KeyEvent) {
    match key.code {
        KeyCode::Char('/') => view.input = Some(InputMode::Search),
        KeyCode::Char('s') => {
            let _ = s.start_scan();
        }
        KeyCode::Up => view.cursor_up(),
        KeyCode::Down => view.cursor_down(s.search_reports(&view.query).len()),
        KeyCode::Enter => {
            let id = {
                let reports = s.search_reports(&view.query);
                reports.get(view.clamped(reports.len())).map(|r| r.id.clone())
            };
            if let Some(id) = id {
                let _ = s.view_report(&id);
            }
        }
        _ => {}
    }
}

fn medicines_key(s: &mut PatientSession, view: &mut ViewState, key: &KeyEvent) {
    let category = CATEGORIES.get(view.category).copied().unwrap_or("all");
    match key.code {
        KeyCode::Char('/') => view.input = Some(InputMode::Search),
        KeyCode::Char('[') | KeyCode::Char(']') => {
            view.category = cycle_index(
                Some(view.category),
                CATEGORIES.len(),
                key.code == KeyCode::Char(']'),
            );
            view.cursor = 0;
        }
        KeyCode::Char('c') => {
            let _ = s.open_cart();
        }
        KeyCode::Up => view.cursor_up(),
        KeyCode::Down => view.cursor_down(s.search_medicines(&view.query, category).len()),
        KeyCode::Enter => {
            let id = {
                let medicines = s.search_medicines(&view.query, category);
                medicines
                    .get(view.clamped(medicines.len()))
                    .map(|m| m.id.clone())
            };
            if let Some(id) = id {
                let _ = s.select_medicine(&id);
            }
        }
        _ => {}
    }
}

fn cart_key(s: &mut PatientSession, view: &mut ViewState, key: &KeyEvent) {
    let selected = s
        .cart()
        .items()
        .get(view.clamped(s.cart().len()))
        .map(|item| item.medicine_id.clone());
    match key.code {
        KeyCode::Up => view.cursor_up(),
        KeyCode::Down => view.cursor_down(s.cart().len()),
        KeyCode::Char('+') => {
            if let Some(id) = selected {
                s.update_cart_quantity(&id, 1);
            }
        }
        KeyCode::Char('-') => {
            if let Some(id) = selected {
                s.update_cart_quantity(&id, -1);
            }
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some(id) = selected {
                s.remove_from_cart(&id);
            }
        }
        KeyCode::Enter => {
            let _ = s.checkout();
        }
        _ => {}
    }
}

// --- doctor ---

pub fn doctor_key(
    s: &mut DoctorSession,
    view: &mut ViewState,
    key: KeyEvent,
    capture: &dyn DocumentCapture,
) -> Effect {
    if view.input.is_some() {
        let Some(path) = prompt_key(view, key) else {
            return Effect::Nothing;
        };
        let Some(patient_id) = s.selected_patient().map(|p| p.id.clone()) else {
            return Effect::Nothing;
        };
        return match capture_file(capture, &path) {
            Ok(document) => {
                let _ = s.attach_document(&patient_id, document);
                Effect::Nothing
            }
            Err(err) => Effect::Notify(capture_failed(&err)),
        };
    }

    match s.view() {
        DoctorView::Dashboard => return doctor_home_key(s, view, &key),
        DoctorView::Notes => return notes_key(s, view, &key),
        DoctorView::PatientDetail => return patient_detail_key(s, view, &key),
        DoctorView::Appointments => requests_key(s, view, &key),
        DoctorView::PreCall => {
            if key.code == KeyCode::Enter {
                let _ = s.enter_call();
            }
        }
        DoctorView::InCall => call_controls(view, &key, || {
            let _ = s.end_call();
        }),
        DoctorView::EndCall => match key.code {
            KeyCode::Enter | KeyCode::Char('n') => {
                let _ = s.notes_after_call();
            }
            KeyCode::Char('d') => s.return_to_dashboard(),
            _ => {}
        },
        DoctorView::Reports => match key.code {
            KeyCode::Up => view.cursor_up(),
            KeyCode::Down => view.cursor_down(s.reports().len()),
            _ => {}
        },
        DoctorView::Patients => match key.code {
            KeyCode::Char('/') => view.input = Some(InputMode::Search),
            KeyCode::Up => view.cursor_up(),
            KeyCode::Down => view.cursor_down(s.search_patients(&view.query).len()),
            KeyCode::Enter => {
                let id = {
                    let patients = s.search_patients(&view.query);
                    patients
                        .get(view.clamped(patients.len()))
                        .map(|p| p.id.clone())
                };
                if let Some(id) = id {
                    let _ = s.view_patient(&id);
                }
            }
            _ => {}
        },
        DoctorView::Pharmacy => match key.code {
            KeyCode::Char('/') => view.input = Some(InputMode::Search),
            KeyCode::Up => view.cursor_up(),
            KeyCode::Down => {
                let len = s
                    .medicines()
                    .iter()
                    .filter(|m| m.matches(&view.query, "all"))
                    .count();
                view.cursor_down(len);
            }
            _ => {}
        },
    }
    Effect::Nothing
}

fn doctor_home_key(s: &mut DoctorSession, view: &mut ViewState, key: &KeyEvent) -> Effect {
    let tab = s.nav().tab();
    match key.code {
        KeyCode::Up => view.cursor_up(),
        KeyCode::Down => view.cursor_down(DOCTOR_CARDS.len()),
        KeyCode::Left | KeyCode::Right => {
            let _ = s.select_tab(next_tab(tab, key.code == KeyCode::Right));
        }
        KeyCode::Char('o') | KeyCode::Char('O') if tab == Tab::Profile => return Effect::Logout,
        KeyCode::Enter if tab != Tab::Profile => {
            let _ = s.open(DOCTOR_CARDS[view.clamped(DOCTOR_CARDS.len())]);
        }
        _ => {}
    }
    Effect::Nothing
}

fn requests_key(s: &mut DoctorSession, view: &mut ViewState, key: &KeyEvent) {
    let id = s
        .appointments()
        .get(view.clamped(s.appointments().len()))
        .map(|a| a.id.clone());
    match (key.code, id) {
        (KeyCode::Up, _) => view.cursor_up(),
        (KeyCode::Down, _) => view.cursor_down(s.appointments().len()),
        (KeyCode::Char('a'), Some(id)) => {
            let _ = s.accept(&id);
        }
        (KeyCode::Char('x'), Some(id)) => {
            let _ = s.reject(&id);
        }
        (KeyCode::Char('c'), Some(id)) => {
            let _ = s.complete(&id);
        }
        (KeyCode::Char('j'), Some(id)) => {
            let _ = s.join_call(&id);
        }
        (KeyCode::Char('n'), Some(id)) => {
            let _ = s.add_notes(&id);
        }
        _ => {}
    }
}

fn notes_key(s: &mut DoctorSession, view: &mut ViewState, key: &KeyEvent) -> Effect {
    if !s.has_note_target() {
        // The editor is hidden behind the empty state; only leaving works.
        if key.code == KeyCode::Esc {
            let _ = s.back();
        }
        return Effect::Nothing;
    }
    if focus_step(view, NoteField::ALL.len(), key) {
        return Effect::Nothing;
    }
    let field = note_field(view.field);
    match key.code {
        KeyCode::Esc => {
            let _ = s.back();
        }
        KeyCode::Enter => {
            let _ = s.save_notes();
        }
        KeyCode::Char('d') if ctrl(key) => return Effect::Listen(ListenContext::Dictation),
        KeyCode::Backspace => {
            s.draft_mut().get_mut(field).pop();
        }
        KeyCode::Char(c) if !ctrl(key) => s.draft_mut().get_mut(field).push(c),
        _ => {}
    }
    Effect::Nothing
}

fn patient_detail_key(s: &mut DoctorSession, view: &mut ViewState, key: &KeyEvent) -> Effect {
    let Some(patient) = s.selected_patient() else {
        return Effect::Nothing;
    };
    let count = patient.documents.len();
    match key.code {
        KeyCode::Up => view.cursor_up(),
        KeyCode::Down => view.cursor_down(count),
        KeyCode::Char('u') | KeyCode::Char('U') => {
            view.input = Some(InputMode::FilePath);
            view.buffer.clear();
        }
        KeyCode::Enter => {
            if let Some(document) = patient.documents.get(view.clamped(count)) {
                return Effect::Notify(match document.view_url() {
                    Ok(url) => Notice::info(document.name.clone(), format!("Opening {url}")),
                    Err(message) => Notice {
                        kind: NoticeKind::Error,
                        title: "Document".to_string(),
                        body: message,
                    },
                });
            }
        }
        _ => {}
    }
    Effect::Nothing
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::{LocalFileCapture, StaticDataSource};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn patient() -> PatientSession {
        PatientSession::new(Arc::new(StaticDataSource::new()))
    }

    fn doctor() -> DoctorSession {
        DoctorSession::new(Arc::new(StaticDataSource::new()))
    }

    #[test]
    fn test_cycle_index_wraps() {
        assert_eq!(cycle_index(None, 3, true), 0);
        assert_eq!(cycle_index(None, 3, false), 2);
        assert_eq!(cycle_index(Some(2), 3, true), 0);
        assert_eq!(cycle_index(Some(0), 3, false), 2);
        assert_eq!(cycle_index(Some(0), 0, true), 0);
    }

    #[test]
    fn test_home_card_opens_pharmacy() {
        let mut s = patient();
        let mut view = ViewState::default();
        let capture = LocalFileCapture::new();
        let pharmacy = PatientCard::ALL
            .iter()
            .position(|c| *c == PatientCard::Pharmacy)
            .expect("card");
        for _ in 0..pharmacy {
            patient_key(&mut s, &mut view, press(KeyCode::Down), &capture);
        }
        patient_key(&mut s, &mut view, press(KeyCode::Enter), &capture);
        assert_eq!(s.view(), PatientView::MedicineList);
    }

    #[test]
    fn test_booking_form_by_keys() {
        let mut s = patient();
        s.open(PatientView::BookAppointment).expect("open");
        let mut view = ViewState::default();
        let capture = LocalFileCapture::new();
        let before = s.appointments().len();

        patient_key(&mut s, &mut view, press(KeyCode::Right), &capture);
        patient_key(&mut s, &mut view, press(KeyCode::Tab), &capture);
        for c in "2026-10-20".chars() {
            patient_key(&mut s, &mut view, press(KeyCode::Char(c)), &capture);
        }
        patient_key(&mut s, &mut view, press(KeyCode::Tab), &capture);
        patient_key(&mut s, &mut view, press(KeyCode::Right), &capture);
        patient_key(&mut s, &mut view, press(KeyCode::Enter), &capture);

        assert_eq!(s.view(), PatientView::Dashboard);
        assert_eq!(s.appointments().len(), before + 1);
    }

    #[test]
    fn test_typing_screens() {
        let mut s = patient();
        let view = ViewState::default();
        assert!(!is_typing(&DashboardSession::Patient(patient()), &view));
        s.open(PatientView::BookAppointment).expect("booking");
        assert!(is_typing(&DashboardSession::Patient(s), &view));

        let searching = ViewState {
            input: Some(InputMode::Search),
            ..ViewState::default()
        };
        assert!(is_typing(&DashboardSession::Doctor(doctor()), &searching));
    }

    #[test]
    fn test_dictation_fills_focused_note_field() {
        let mut s = doctor();
        let id = s
            .appointments()
            .iter()
            .find(|a| a.allows(crate::domain::AppointmentAction::Notes))
            .map(|a| a.id.clone())
            .expect("appointment with notes");
        s.add_notes(&id).expect("notes");
        let mut session = DashboardSession::Doctor(s);
        let mut view = ViewState {
            field: 1,
            ..ViewState::default()
        };
        assert!(dictate(&mut session, &mut view, "Hypertension"));
        match &session {
            DashboardSession::Doctor(s) => assert_eq!(s.draft().diagnosis, "Hypertension"),
            DashboardSession::Patient(_) => panic!("expected doctor session"),
        }
    }

    #[test]
    fn test_notes_without_appointment_ignore_typing() {
        let mut s = doctor();
        s.apply_voice(crate::application::VoiceIntent::Notes).expect("voice");
        let mut view = ViewState::default();
        let capture = LocalFileCapture::new();

        for c in "flu".chars() {
            doctor_key(&mut s, &mut view, press(KeyCode::Char(c)), &capture);
        }
        doctor_key(&mut s, &mut view, press(KeyCode::Enter), &capture);
        assert!(s.draft().notes.is_empty());
        assert!(s.saved_notes().is_empty());

        let mut session = DashboardSession::Doctor(s);
        assert!(!is_typing(&session, &view));
        assert!(!dictate(&mut session, &mut view, "flu"));
    }

    #[test]
    fn test_search_prompt_filters_and_closes() {
        let mut s = doctor();
        s.open(DoctorView::Patients).expect("patients");
        let mut view = ViewState::default();
        let capture = LocalFileCapture::new();
        doctor_key(&mut s, &mut view, press(KeyCode::Char('/')), &capture);
        assert_eq!(view.input, Some(InputMode::Search));
        doctor_key(&mut s, &mut view, press(KeyCode::Char('d')), &capture);
        doctor_key(&mut s, &mut view, press(KeyCode::Enter), &capture);
        assert_eq!(view.input, None);
        assert_eq!(view.query, "d");
    }

    #[test]
    fn test_missing_file_is_reported() {
        let mut s = patient();
        s.start_scan().expect("scan");
        let mut view = ViewState::default();
        let capture = LocalFileCapture::new();
        patient_key(&mut s, &mut view, press(KeyCode::Char('f')), &capture);
        for c in "/no/such/file.pdf".chars() {
            patient_key(&mut s, &mut view, press(KeyCode::Char(c)), &capture);
        }
        let effect = patient_key(&mut s, &mut view, press(KeyCode::Enter), &capture);
        assert!(matches!(effect, Effect::Notify(n) if n.kind == NoticeKind::Error));
        assert_eq!(s.scanner_step(), ScannerStep::Scan);
    }
}
