//! Patient dashboard session.

use std::sync::Arc;

use chrono::Utc;

use super::{next_id, report, Notice, SessionError};
use crate::application::dashboard::DashboardNavigator;
use crate::application::voice::VoiceIntent;
use crate::domain::pharmacy::{MAX_QUANTITY, MIN_QUANTITY};
use crate::domain::{
    Appointment, AppointmentStatus, Cart, CartError, Doctor, Medicine, MedicineDetail, Order,
    PatientView, Report, ReportDetail, ReportStatus, Selection, Tab, VisitKind, TIME_SLOTS,
};
use crate::ports::{CapturedDocument, CareDataSource};

/// Fallback name for a scanned report with no label.
pub const DEFAULT_SCAN_LABEL: &str = "Medical Report";

/// Steps of the document scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScannerStep {
    #[default]
    Scan,
    Crop,
    Confirm,
}

/// Inputs of the booking screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    pub doctor_id: Option<String>,
    pub date: String,
    pub time: Option<String>,
    pub reason: String,
    pub kind: VisitKind,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            doctor_id: None,
            date: String::new(),
            time: None,
            reason: String::new(),
            kind: VisitKind::InPerson,
        }
    }
}

pub struct PatientSession {
    nav: DashboardNavigator<PatientView>,
    data: Arc<dyn CareDataSource>,
    appointments: Vec<Appointment>,
    doctors: Vec<Doctor>,
    reports: Vec<Report>,
    medicines: Vec<Medicine>,
    cart: Cart,
    last_order: Option<Order>,
    scanner: ScannerStep,
    pending_capture: Option<CapturedDocument>,
    notice: Option<Notice>,
}

impl PatientSession {
    /// Mount a dashboard with fresh copies of the seed collections.
    #[must_use]
    pub fn new(data: Arc<dyn CareDataSource>) -> Self {
        Self {
            nav: DashboardNavigator::new(),
            appointments: data.patient_appointments(),
            doctors: data.doctors(),
            reports: data.reports(),
            medicines: data.medicines(),
            data,
            cart: Cart::default(),
            last_order: None,
            scanner: ScannerStep::default(),
            pending_capture: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn nav(&self) -> &DashboardNavigator<PatientView> {
        &self.nav
    }

    #[must_use]
    pub fn view(&self) -> PatientView {
        self.nav.view()
    }

    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    #[must_use]
    pub fn upcoming_count(&self) -> usize {
        self.appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Upcoming)
            .count()
    }

    #[must_use]
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
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
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn last_order(&self) -> Option<&Order> {
        self.last_order.as_ref()
    }

    #[must_use]
    pub fn scanner_step(&self) -> ScannerStep {
        self.scanner
    }

    #[must_use]
    pub fn pending_capture(&self) -> Option<&CapturedDocument> {
        self.pending_capture.as_ref()
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
    pub fn open(&mut self, view: PatientView) -> Result<(), SessionError> {
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

    /// # Errors
    /// Refused during a call.
    pub fn apply_voice(&mut self, intent: VoiceIntent) -> Result<bool, SessionError> {
        let result = self.nav.apply_voice(intent);
        report(&mut self.notice, result)
    }

    // --- video calls ---

    /// Open the pre-call screen for an upcoming video appointment.
    ///
    /// # Errors
    /// `NotJoinable` for unknown, past or in-person appointments.
    pub fn join_call(&mut self, appointment_id: &str) -> Result<(), SessionError> {
        let joinable = self
            .appointments
            .iter()
            .any(|a| a.id == appointment_id && a.is_joinable());
        let result = if joinable {
            self.nav
                .open(PatientView::PreCall, Selection::appointment(appointment_id))
        } else {
            Err(SessionError::NotJoinable(appointment_id.to_string()))
        };
        report(&mut self.notice, result)
    }

    /// Video Calls card: a call with no appointment attached.
    ///
    /// # Errors
    /// Refused during a call.
    pub fn start_quick_call(&mut self) -> Result<(), SessionError> {
        let result = self.nav.open(PatientView::PreCall, Selection::default());
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

    /// The appointment the current call belongs to, if any.
    #[must_use]
    pub fn call_appointment(&self) -> Option<&Appointment> {
        let id = self.nav.selection().appointment_id.as_deref()?;
        self.appointments.iter().find(|a| a.id == id)
    }

    // --- booking ---

    /// Book a new appointment and return to the dashboard.
    ///
    /// # Errors
    /// `IncompleteBooking`, `NotFound` for an unknown doctor, or `InvalidSlot`.
    /// The session is unchanged on error.
    pub fn book_appointment(&mut self, form: &BookingForm) -> Result<(), SessionError> {
        let result = self.try_book(form);
        report(&mut self.notice, result)
    }

    fn try_book(&mut self, form: &BookingForm) -> Result<(), SessionError> {
        let (Some(doctor_id), Some(time)) = (form.doctor_id.as_deref(), form.time.as_deref()) else {
            return Err(SessionError::IncompleteBooking);
        };
        if form.date.trim().is_empty() {
            return Err(SessionError::IncompleteBooking);
        }
        let doctor = self
            .doctors
            .iter()
            .find(|d| d.id == doctor_id)
            .ok_or_else(|| SessionError::NotFound(format!("doctor {doctor_id}")))?;
        if !TIME_SLOTS.contains(&time) {
            return Err(SessionError::InvalidSlot(time.to_string()));
        }

        let reason = form.reason.trim();
        let appointment = Appointment {
            id: next_id(self.appointments.iter().map(|a| a.id.as_str())),
            doctor_name: doctor.name.clone(),
            specialty: doctor.specialty.clone(),
            date: form.date.trim().to_string(),
            time: time.to_string(),
            status: AppointmentStatus::Upcoming,
            kind: form.kind,
            reason: (!reason.is_empty()).then(|| reason.to_string()),
        };
        tracing::info!(id = %appointment.id, "Appointment booked");
        self.appointments.push(appointment);
        self.nav.return_to_dashboard();
        self.notice = Some(Notice::info(
            "Appointment Booked",
            "Your appointment has been scheduled successfully",
        ));
        Ok(())
    }

    // --- reports ---

    #[must_use]
    pub fn search_reports(&self, query: &str) -> Vec<&Report> {
        self.reports.iter().filter(|r| r.matches(query)).collect()
    }

    /// Open a report and mark it viewed.
    ///
    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn view_report(&mut self, report_id: &str) -> Result<(), SessionError> {
        let result = if self.reports.iter().any(|r| r.id == report_id) {
            self.nav
                .open(PatientView::ReportDetail, Selection::report(report_id))
        } else {
            Err(SessionError::NotFound(format!("report {report_id}")))
        };
        if result.is_ok() {
            if let Some(entry) = self.reports.iter_mut().find(|r| r.id == report_id) {
                entry.status = ReportStatus::Viewed;
            }
        }
        report(&mut self.notice, result)
    }

    #[must_use]
    pub fn selected_report(&self) -> Option<&Report> {
        let id = self.nav.selection().report_id.as_deref()?;
        self.reports.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn selected_report_detail(&self) -> Option<ReportDetail> {
        let id = self.nav.selection().report_id.as_deref()?;
        self.data.report_detail(id)
    }

    /// # Errors
    /// Refused during a call.
    pub fn start_scan(&mut self) -> Result<(), SessionError> {
        self.scanner = ScannerStep::Scan;
        self.pending_capture = None;
        let result = self.nav.open(PatientView::ScanDocument, Selection::default());
        report(&mut self.notice, result)
    }

    /// Move the scanner forward one step.
    pub fn advance_scan(&mut self) {
        self.scanner = match self.scanner {
            ScannerStep::Scan => ScannerStep::Crop,
            ScannerStep::Crop | ScannerStep::Confirm => ScannerStep::Confirm,
        };
    }

    /// A picked file skips straight to cropping.
    pub fn attach_capture(&mut self, document: CapturedDocument) {
        self.pending_capture = Some(document);
        self.scanner = ScannerStep::Crop;
    }

    /// Save the scan as a new report and show the reports list.
    ///
    /// # Errors
    /// `ScanIncomplete` before the confirm step.
    pub fn confirm_scan(&mut self, label: &str) -> Result<(), SessionError> {
        let result = self.try_confirm_scan(label);
        report(&mut self.notice, result)
    }

    fn try_confirm_scan(&mut self, label: &str) -> Result<(), SessionError> {
        if self.scanner != ScannerStep::Confirm {
            return Err(SessionError::ScanIncomplete);
        }
        let capture = self.pending_capture.take();
        let name = match label.trim() {
            "" => capture
                .as_ref()
                .map(|c| c.label.clone())
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SCAN_LABEL.to_string()),
            label => label.to_string(),
        };
        let entry = Report {
            id: next_id(self.reports.iter().map(|r| r.id.as_str())),
            name,
            kind: "Scanned Document".to_string(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            status: ReportStatus::New,
            subject: None,
            url: capture.map(|c| c.url),
        };
        tracing::info!(id = %entry.id, "Scanned document saved");
        self.reports.insert(0, entry);
        self.scanner = ScannerStep::Scan;
        self.nav.back_to(PatientView::ReportsList);
        self.notice = Some(Notice::info("Document Saved", "Your document was added to reports"));
        Ok(())
    }

    // --- pharmacy ---

    #[must_use]
    pub fn search_medicines(&self, query: &str, category: &str) -> Vec<&Medicine> {
        self.medicines
            .iter()
            .filter(|m| m.matches(query, category))
            .collect()
    }

    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn select_medicine(&mut self, medicine_id: &str) -> Result<(), SessionError> {
        let result = if self.medicines.iter().any(|m| m.id == medicine_id) {
            self.nav
                .open(PatientView::MedicineDetail, Selection::medicine(medicine_id))
        } else {
            Err(SessionError::NotFound(format!("medicine {medicine_id}")))
        };
        report(&mut self.notice, result)
    }

    #[must_use]
    pub fn selected_medicine(&self) -> Option<&Medicine> {
        let id = self.nav.selection().medicine_id.as_deref()?;
        self.medicines.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn selected_medicine_detail(&self) -> Option<MedicineDetail> {
        let id = self.nav.selection().medicine_id.as_deref()?;
        self.data.medicine_detail(id)
    }

    /// Add the selected medicine and go back to the catalog.
    ///
    /// # Errors
    /// `NotFound` without a selection, or a `CartError`.
    pub fn add_to_cart(&mut self, quantity: u32) -> Result<(), SessionError> {
        let result = self.try_add_to_cart(quantity);
        report(&mut self.notice, result)
    }

    fn try_add_to_cart(&mut self, quantity: u32) -> Result<(), SessionError> {
        let medicine = self
            .selected_medicine()
            .cloned()
            .ok_or_else(|| SessionError::NotFound("selected medicine".to_string()))?;
        self.cart.add(&medicine, quantity)?;
        tracing::debug!(medicine = %medicine.id, quantity, "Added to cart");
        self.nav.back_to(PatientView::MedicineList);
        self.notice = Some(Notice::info(
            "Added to Cart",
            format!("{quantity} x {} added to your cart", medicine.name),
        ));
        Ok(())
    }

    /// Clamp a detail-screen quantity to the accepted range.
    #[must_use]
    pub fn clamp_quantity(quantity: i64) -> u32 {
        let clamped = quantity.clamp(i64::from(MIN_QUANTITY), i64::from(MAX_QUANTITY));
        u32::try_from(clamped).unwrap_or(MIN_QUANTITY)
    }

    pub fn update_cart_quantity(&mut self, medicine_id: &str, delta: i32) {
        self.cart.update_quantity(medicine_id, delta);
    }

    pub fn remove_from_cart(&mut self, medicine_id: &str) {
        self.cart.remove(medicine_id);
    }

    /// # Errors
    /// Refused during a call.
    pub fn open_cart(&mut self) -> Result<(), SessionError> {
        let result = self.nav.open(PatientView::Cart, Selection::default());
        report(&mut self.notice, result)
    }

    /// Place the order, empty the cart and show the confirmation.
    ///
    /// # Errors
    /// `EmptyCart` when there is nothing to order.
    pub fn checkout(&mut self) -> Result<&Order, SessionError> {
        let order = match Order::from_cart(&self.cart, Utc::now()) {
            Ok(order) => order,
            Err(CartError::Empty) => {
                return report(&mut self.notice, Err(SessionError::EmptyCart));
            }
            Err(err) => return report(&mut self.notice, Err(err.into())),
        };
        if let Err(err) = self.nav.open(PatientView::OrderConfirmation, Selection::default()) {
            return report(&mut self.notice, Err(err));
        }

        tracing::info!(order = %order.id, total_cents = order.total_cents, "Order placed");
        self.cart.clear();
        let order = self.last_order.insert(order);
        Ok(&*order)
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

    fn session() -> PatientSession {
        PatientSession::new(Arc::new(StaticDataSource::new()))
    }

    #[test]
    fn test_join_call_requires_upcoming_video() {
        let mut s = session();
        assert_eq!(
            s.join_call("2"),
            Err(SessionError::NotJoinable("2".to_string()))
        );
        assert!(s.notice().is_some());
        assert_eq!(s.view(), PatientView::Dashboard);

        s.join_call("1").expect("joinable");
        assert_eq!(s.view(), PatientView::PreCall);
        assert_eq!(s.call_appointment().map(|a| a.doctor_name.as_str()), Some("Dr. Smith"));
    }

    #[test]
    fn test_quick_call_flow() {
        let mut s = session();
        s.start_quick_call().expect("quick call");
        assert!(s.end_call().is_err());
        s.enter_call().expect("enter");
        assert!(s.back().is_err());
        s.end_call().expect("end");
        assert_eq!(s.view(), PatientView::EndCall);
        s.return_to_dashboard();
        assert_eq!(s.view(), PatientView::Dashboard);
    }

    #[test]
    fn test_booking_validation_leaves_state() {
        let mut s = session();
        s.open(PatientView::BookAppointment).expect("open");
        let before = s.appointments().len();

        let form = BookingForm {
            doctor_id: Some("1".to_string()),
            ..BookingForm::default()
        };
        assert_eq!(s.book_appointment(&form), Err(SessionError::IncompleteBooking));
        assert_eq!(s.appointments().len(), before);
        assert_eq!(s.view(), PatientView::BookAppointment);

        let form = BookingForm {
            doctor_id: Some("4".to_string()),
            date: "2024-02-01".to_string(),
            time: Some("12:00 PM".to_string()),
            ..BookingForm::default()
        };
        assert!(matches!(s.book_appointment(&form), Err(SessionError::InvalidSlot(_))));
    }

    #[test]
    fn test_booking_appends_upcoming() {
        let mut s = session();
        s.open(PatientView::BookAppointment).expect("open");
        let form = BookingForm {
            doctor_id: Some("4".to_string()),
            date: "2024-02-01".to_string(),
            time: Some("09:30 AM".to_string()),
            reason: "Knee pain".to_string(),
            kind: VisitKind::Video,
        };
        s.book_appointment(&form).expect("booked");
        let booked = s.appointments().last().expect("appointment");
        assert_eq!(booked.id, "4");
        assert_eq!(booked.doctor_name, "Dr. Davis");
        assert!(booked.is_joinable());
        assert_eq!(s.view(), PatientView::Dashboard);
        assert_eq!(s.upcoming_count(), 3);
    }

    #[test]
    fn test_view_report_marks_viewed() {
        let mut s = session();
        s.view_report("1").expect("report");
        assert_eq!(s.view(), PatientView::ReportDetail);
        assert_eq!(s.selected_report().map(|r| r.status), Some(ReportStatus::Viewed));
        assert!(s.selected_report_detail().is_some());
        assert!(s.view_report("42").is_err());
    }

    #[test]
    fn test_view_report_refused_during_call_keeps_status() {
        let mut s = session();
        s.start_quick_call().expect("quick call");
        s.enter_call().expect("enter");
        assert!(s.view_report("1").is_err());
        assert_eq!(s.view(), PatientView::InCall);
        assert_eq!(s.reports()[0].status, ReportStatus::New);
    }

    #[test]
    fn test_scan_flow_adds_report() {
        let mut s = session();
        s.open(PatientView::ReportsList).expect("open");
        s.start_scan().expect("scan");
        assert_eq!(s.confirm_scan("x"), Err(SessionError::ScanIncomplete));

        s.attach_capture(CapturedDocument {
            url: "file:///tmp/scan.pdf".to_string(),
            label: String::new(),
        });
        assert_eq!(s.scanner_step(), ScannerStep::Crop);
        s.advance_scan();
        s.confirm_scan("  ").expect("confirm");

        assert_eq!(s.view(), PatientView::ReportsList);
        let newest = &s.reports()[0];
        assert_eq!(newest.name, DEFAULT_SCAN_LABEL);
        assert_eq!(newest.url.as_deref(), Some("file:///tmp/scan.pdf"));
        assert_eq!(s.search_reports("medical").len(), 1);
    }

    #[test]
    fn test_cart_and_checkout() {
        let mut s = session();
        assert_eq!(s.checkout().err(), Some(SessionError::EmptyCart));

        s.open(PatientView::MedicineList).expect("open");
        s.select_medicine("4").expect("select");
        assert!(matches!(s.add_to_cart(1), Err(SessionError::Cart(CartError::OutOfStock(_)))));

        s.back().expect("back");
        s.select_medicine("1").expect("select");
        s.add_to_cart(2).expect("add");
        assert_eq!(s.view(), PatientView::MedicineList);
        assert_eq!(s.cart().subtotal_cents(), 2598);

        s.open_cart().expect("cart");
        let total = s.checkout().expect("order").total_cents;
        assert_eq!(total, 2598 + 599);
        assert!(s.cart().is_empty());
        assert_eq!(s.view(), PatientView::OrderConfirmation);
        assert!(s.last_order().expect("order").id.starts_with("ORD-"));
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(PatientSession::clamp_quantity(0), 1);
        assert_eq!(PatientSession::clamp_quantity(11), 10);
        assert_eq!(PatientSession::clamp_quantity(4), 4);
    }

    #[test]
    fn test_sessions_do_not_share_collections() {
        let data: Arc<dyn CareDataSource> = Arc::new(StaticDataSource::new());
        let mut first = PatientSession::new(Arc::clone(&data));
        first.view_report("1").expect("report");
        let second = PatientSession::new(data);
        assert_eq!(second.reports()[0].status, ReportStatus::New);
    }
}
