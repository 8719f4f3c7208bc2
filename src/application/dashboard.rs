//! Dashboard sub-navigator.
//!
//! One generic navigator drives both dashboards. Role differences live in
//! the `ViewSet` implementations for `PatientView` and `DoctorView`.
//!
//! The navigator keeps an explicit history of views: forward moves push,
//! `back` pops. The call flow is linear (`PreCall -> InCall -> EndCall`) and
//! its steps replace each other instead of pushing, so `back` from the end
//! of a call lands where the call was started from.

use crate::application::sessions::SessionError;
use crate::application::voice::VoiceIntent;
use crate::domain::{CallPhase, DashboardView, DoctorView, PatientView, Selection, Tab};

/// Where a voice intent or tab lands on a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route<V> {
    pub view: V,
    pub tab: Option<Tab>,
}

/// A role's set of dashboard views.
pub trait ViewSet: Copy + Eq + std::fmt::Debug {
    /// The dashboard home view.
    const DASHBOARD: Self;

    /// Position in the call flow, if this is a call view.
    fn call_phase(self) -> Option<CallPhase>;

    fn call_view(phase: CallPhase) -> Self;

    /// View opened after a call ends, for roles that take notes.
    fn notes_view() -> Option<Self>;

    /// View shown for a bottom-nav tab.
    fn tab_view(tab: Tab) -> Self;

    /// Role mapping of a voice intent.
    ///
    /// # Returns
    /// `None` when the role has no screen for the intent.
    fn voice_route(intent: VoiceIntent) -> Option<Route<Self>>;

    fn wrap(self) -> DashboardView;
}

impl ViewSet for PatientView {
    const DASHBOARD: Self = Self::Dashboard;

    fn call_phase(self) -> Option<CallPhase> {
        match self {
            Self::PreCall => Some(CallPhase::PreCall),
            Self::InCall => Some(CallPhase::InCall),
            Self::EndCall => Some(CallPhase::EndCall),
            _ => None,
        }
    }

    fn call_view(phase: CallPhase) -> Self {
        match phase {
            CallPhase::PreCall => Self::PreCall,
            CallPhase::InCall => Self::InCall,
            CallPhase::EndCall => Self::EndCall,
        }
    }

    fn notes_view() -> Option<Self> {
        None
    }

    fn tab_view(tab: Tab) -> Self {
        match tab {
            Tab::Home | Tab::Profile => Self::Dashboard,
            Tab::Appointments => Self::AppointmentList,
            Tab::Reports => Self::ReportsList,
        }
    }

    fn voice_route(intent: VoiceIntent) -> Option<Route<Self>> {
        let (view, tab) = match intent {
            VoiceIntent::Appointments => (Self::AppointmentList, None),
            VoiceIntent::BookAppointment => (Self::BookAppointment, None),
            VoiceIntent::Reports => (Self::ReportsList, None),
            VoiceIntent::Pharmacy => (Self::MedicineList, None),
            VoiceIntent::Cart => (Self::Cart, None),
            VoiceIntent::Profile => (Self::Dashboard, Some(Tab::Profile)),
            VoiceIntent::Home => (Self::Dashboard, Some(Tab::Home)),
            VoiceIntent::Notes | VoiceIntent::Patients => return None,
        };
        Some(Route { view, tab })
    }

    fn wrap(self) -> DashboardView {
        DashboardView::Patient(self)
    }
}

impl ViewSet for DoctorView {
    const DASHBOARD: Self = Self::Dashboard;

    fn call_phase(self) -> Option<CallPhase> {
        match self {
            Self::PreCall => Some(CallPhase::PreCall),
            Self::InCall => Some(CallPhase::InCall),
            Self::EndCall => Some(CallPhase::EndCall),
            _ => None,
        }
    }

    fn call_view(phase: CallPhase) -> Self {
        match phase {
            CallPhase::PreCall => Self::PreCall,
            CallPhase::InCall => Self::InCall,
            CallPhase::EndCall => Self::EndCall,
        }
    }

    fn notes_view() -> Option<Self> {
        Some(Self::Notes)
    }

    fn tab_view(tab: Tab) -> Self {
        match tab {
            Tab::Home | Tab::Profile => Self::Dashboard,
            Tab::Appointments => Self::Appointments,
            Tab::Reports => Self::Reports,
        }
    }

    fn voice_route(intent: VoiceIntent) -> Option<Route<Self>> {
        let (view, tab) = match intent {
            VoiceIntent::Appointments | VoiceIntent::BookAppointment => {
                (Self::Appointments, Some(Tab::Appointments))
            }
            VoiceIntent::Notes => (Self::Notes, None),
            VoiceIntent::Profile => (Self::Dashboard, Some(Tab::Profile)),
            VoiceIntent::Home => (Self::Dashboard, Some(Tab::Home)),
            VoiceIntent::Pharmacy => (Self::Pharmacy, None),
            VoiceIntent::Reports => (Self::Reports, Some(Tab::Reports)),
            VoiceIntent::Patients => (Self::Patients, Some(Tab::Appointments)),
            VoiceIntent::Cart => return None,
        };
        Some(Route { view, tab })
    }

    fn wrap(self) -> DashboardView {
        DashboardView::Doctor(self)
    }
}

/// Nested view state of one mounted dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardNavigator<V: ViewSet> {
    view: V,
    tab: Tab,
    history: Vec<V>,
    selection: Selection,
}

impl<V: ViewSet> Default for DashboardNavigator<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ViewSet> DashboardNavigator<V> {
    /// A freshly mounted dashboard: home view, home tab.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: V::DASHBOARD,
            tab: Tab::Home,
            history: Vec::new(),
            selection: Selection::default(),
        }
    }

    #[must_use]
    pub fn view(&self) -> V {
        self.view
    }

    #[must_use]
    pub fn tab(&self) -> Tab {
        self.tab
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn in_call(&self) -> bool {
        self.view.call_phase() == Some(CallPhase::InCall)
    }

    /// Open `view`, merging `selection` into the current ids.
    ///
    /// # Errors
    /// `CallFlowViolation` when targeting `InCall`/`EndCall` directly, or
    /// when a call is in progress.
    pub fn open(&mut self, view: V, selection: Selection) -> Result<(), SessionError> {
        if self.in_call() {
            return Err(SessionError::CallFlowViolation("end the call first"));
        }
        match view.call_phase() {
            Some(CallPhase::InCall) => {
                return Err(SessionError::CallFlowViolation("join the call from the pre-call screen"))
            }
            Some(CallPhase::EndCall) => {
                return Err(SessionError::CallFlowViolation("a call must be in progress to end it"))
            }
            _ => {}
        }

        if view == V::DASHBOARD {
            self.return_to_dashboard();
            return Ok(());
        }

        self.selection.merge(selection);
        if view != self.view {
            self.history.push(self.view);
            tracing::debug!(from = ?self.view, to = ?view, "Dashboard view opened");
            self.view = view;
        }
        Ok(())
    }

    /// Reset to the dashboard home with a clean selection.
    pub fn return_to_dashboard(&mut self) {
        tracing::debug!(from = ?self.view, "Returning to dashboard");
        self.view = V::DASHBOARD;
        self.tab = Tab::Home;
        self.history.clear();
        self.selection.clear();
    }

    /// Highlight `tab` without changing the view.
    pub fn set_tab(&mut self, tab: Tab) {
        if tab != self.tab {
            tracing::trace!(from = ?self.tab, to = ?tab, "Tab highlighted");
        }
        self.tab = tab;
    }

    /// Switch bottom-nav tab, opening the view it stands for.
    ///
    /// # Errors
    /// `CallFlowViolation` during a call.
    pub fn select_tab(&mut self, tab: Tab) -> Result<(), SessionError> {
        let view = V::tab_view(tab);
        if view == V::DASHBOARD {
            if self.in_call() {
                return Err(SessionError::CallFlowViolation("end the call first"));
            }
            self.return_to_dashboard();
        } else {
            self.open(view, Selection::default())?;
        }
        self.set_tab(tab);
        Ok(())
    }

    /// Go back one step.
    ///
    /// # Returns
    /// `false` if there was nowhere to go.
    ///
    /// # Errors
    /// `CallFlowViolation` while in a call.
    pub fn back(&mut self) -> Result<bool, SessionError> {
        if self.in_call() {
            return Err(SessionError::CallFlowViolation("end the call to leave"));
        }

        if self.view == V::DASHBOARD {
            if self.tab != Tab::Home {
                self.set_tab(Tab::Home);
                return Ok(true);
            }
            return Ok(false);
        }

        match self.history.pop() {
            Some(previous) if previous == V::DASHBOARD => self.return_to_dashboard(),
            Some(previous) => {
                tracing::debug!(from = ?self.view, to = ?previous, "Dashboard back");
                self.view = previous;
            }
            None => self.return_to_dashboard(),
        }
        Ok(true)
    }

    /// Go back to the most recent `view` in history, or replace the current
    /// view with it if it was never visited.
    pub fn back_to(&mut self, view: V) {
        if view == V::DASHBOARD {
            self.return_to_dashboard();
            return;
        }
        if let Some(pos) = self.history.iter().rposition(|v| *v == view) {
            self.history.truncate(pos);
        }
        self.view = view;
    }

    /// `PreCall -> InCall`.
    ///
    /// # Errors
    /// `CallFlowViolation` from any other view.
    pub fn join_call(&mut self) -> Result<(), SessionError> {
        self.advance_call(CallPhase::PreCall, CallPhase::InCall)
    }

    /// `InCall -> EndCall`.
    ///
    /// # Errors
    /// `CallFlowViolation` unless a call is in progress.
    pub fn end_call(&mut self) -> Result<(), SessionError> {
        self.advance_call(CallPhase::InCall, CallPhase::EndCall)
    }

    /// `EndCall -> Notes` for roles that take notes.
    ///
    /// # Errors
    /// `CallFlowViolation` if the call has not ended or the role has no notes.
    pub fn notes_after_call(&mut self) -> Result<(), SessionError> {
        if self.view.call_phase() != Some(CallPhase::EndCall) {
            return Err(SessionError::CallFlowViolation("notes follow the end of a call"));
        }
        let notes = V::notes_view()
            .ok_or(SessionError::CallFlowViolation("notes are not available for this role"))?;
        self.view = notes;
        Ok(())
    }

    fn advance_call(&mut self, from: CallPhase, to: CallPhase) -> Result<(), SessionError> {
        if self.view.call_phase() != Some(from) {
            return Err(SessionError::CallFlowViolation("call steps must be taken in order"));
        }
        tracing::debug!(?from, ?to, "Call flow step");
        self.view = V::call_view(to);
        Ok(())
    }

    /// Apply a classified voice intent.
    ///
    /// # Returns
    /// `false` when the role has no screen for the intent (state unchanged).
    ///
    /// # Errors
    /// `CallFlowViolation` during a call.
    pub fn apply_voice(&mut self, intent: VoiceIntent) -> Result<bool, SessionError> {
        let Some(route) = V::voice_route(intent) else {
            tracing::debug!(?intent, "Voice intent not supported on this dashboard");
            return Ok(false);
        };
        if self.in_call() {
            return Err(SessionError::CallFlowViolation("end the call first"));
        }

        if route.view == V::DASHBOARD {
            self.return_to_dashboard();
        } else {
            self.open(route.view, Selection::default())?;
        }
        if let Some(tab) = route.tab {
            self.set_tab(tab);
        }
        Ok(true)
    }

    #[must_use]
    pub fn dashboard_view(&self) -> DashboardView {
        self.view.wrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::voice::classify;

    #[test]
    fn test_fresh_navigator() {
        let nav = DashboardNavigator::<DoctorView>::new();
        assert_eq!(nav.view(), DoctorView::Dashboard);
        assert_eq!(nav.tab(), Tab::Home);
        assert!(nav.selection().is_empty());
    }

    #[test]
    fn test_back_pops_history() {
        let mut nav = DashboardNavigator::<DoctorView>::new();
        nav.open(DoctorView::Patients, Selection::default()).expect("open");
        nav.open(DoctorView::PatientDetail, Selection::patient("2")).expect("open");
        assert_eq!(nav.selection().patient_id.as_deref(), Some("2"));

        assert!(nav.back().expect("back"));
        assert_eq!(nav.view(), DoctorView::Patients);
        assert!(nav.back().expect("back"));
        assert_eq!(nav.view(), DoctorView::Dashboard);
        assert!(nav.selection().is_empty());
        assert!(!nav.back().expect("back"));
    }

    #[test]
    fn test_call_views_cannot_be_opened_directly() {
        let mut nav = DashboardNavigator::<PatientView>::new();
        assert!(nav.open(PatientView::EndCall, Selection::default()).is_err());
        assert!(nav.open(PatientView::InCall, Selection::default()).is_err());
        assert!(nav.end_call().is_err());
        assert_eq!(nav.view(), PatientView::Dashboard);
    }

    #[test]
    fn test_end_call_requires_in_call() {
        let mut nav = DashboardNavigator::<DoctorView>::new();
        nav.open(DoctorView::PreCall, Selection::appointment("1")).expect("open");
        assert!(nav.end_call().is_err());
        assert_eq!(nav.view(), DoctorView::PreCall);

        nav.join_call().expect("join");
        assert!(nav.back().is_err());
        assert!(nav.open(DoctorView::Reports, Selection::default()).is_err());
        assert!(nav.apply_voice(VoiceIntent::Home).is_err());
        assert_eq!(nav.view(), DoctorView::InCall);

        nav.end_call().expect("end");
        nav.notes_after_call().expect("notes");
        assert_eq!(nav.view(), DoctorView::Notes);
        assert_eq!(nav.selection().appointment_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_patient_has_no_notes_after_call() {
        let mut nav = DashboardNavigator::<PatientView>::new();
        nav.open(PatientView::PreCall, Selection::default()).expect("open");
        nav.join_call().expect("join");
        nav.end_call().expect("end");
        assert!(nav.notes_after_call().is_err());
        assert!(nav.back().expect("back"));
        assert_eq!(nav.view(), PatientView::Dashboard);
    }

    #[test]
    fn test_go_to_appointments_for_both_roles() {
        let intent = classify("go to appointments").expect("intent");

        for start in [DoctorView::Dashboard, DoctorView::Reports, DoctorView::Patients, DoctorView::Pharmacy] {
            let mut nav = DashboardNavigator::<DoctorView>::new();
            nav.open(start, Selection::default()).expect("open");
            assert!(nav.apply_voice(intent).expect("voice"));
            assert_eq!(nav.view(), DoctorView::Appointments);
            assert_eq!(nav.tab(), Tab::Appointments);
        }

        for start in [PatientView::Dashboard, PatientView::ReportsList, PatientView::MedicineList, PatientView::Cart] {
            let mut nav = DashboardNavigator::<PatientView>::new();
            nav.open(start, Selection::default()).expect("open");
            assert!(nav.apply_voice(intent).expect("voice"));
            assert_eq!(nav.view(), PatientView::AppointmentList);
        }
    }

    #[test]
    fn test_unsupported_intent_is_noop() {
        let mut nav = DashboardNavigator::<DoctorView>::new();
        nav.open(DoctorView::Reports, Selection::default()).expect("open");
        assert!(!nav.apply_voice(VoiceIntent::Cart).expect("voice"));
        assert_eq!(nav.view(), DoctorView::Reports);
    }

    #[test]
    fn test_profile_tab_back_returns_home() {
        let mut nav = DashboardNavigator::<PatientView>::new();
        nav.select_tab(Tab::Profile).expect("tab");
        assert_eq!(nav.view(), PatientView::Dashboard);
        assert_eq!(nav.tab(), Tab::Profile);
        assert!(nav.back().expect("back"));
        assert_eq!(nav.tab(), Tab::Home);
    }

    #[test]
    fn test_back_to_truncates_history() {
        let mut nav = DashboardNavigator::<PatientView>::new();
        nav.open(PatientView::MedicineList, Selection::default()).expect("open");
        nav.open(PatientView::MedicineDetail, Selection::medicine("1")).expect("open");
        nav.back_to(PatientView::MedicineList);
        assert_eq!(nav.view(), PatientView::MedicineList);
        assert_eq!(nav.history.len(), 1);
    }

    #[test]
    fn test_set_tab_keeps_view() {
        let mut nav = DashboardNavigator::<DoctorView>::new();
        nav.open(DoctorView::Patients, Selection::default()).expect("open");
        nav.set_tab(Tab::Reports);
        assert_eq!(nav.view(), DoctorView::Patients);
        assert_eq!(nav.tab(), Tab::Reports);
        assert_eq!(nav.history.len(), 1);
    }
}
