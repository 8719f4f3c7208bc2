//! Navigation controller: owns the top-level screen state.
//!
//! Holds `AppState`, the selected role and language, an explicit history of
//! pre-login screens, and the mounted dashboard session. Every request that
//! does not fit the current state is refused with `InvalidTransition` and
//! leaves everything as it was.

use std::sync::Arc;

use crate::application::gate;
use crate::application::registry::{self, ScreenId};
use crate::application::sessions::{DoctorSession, PatientSession, SessionError};
use crate::domain::{AppState, DashboardView, Language, Role};
use crate::ports::CareDataSource;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("Cannot {action} from {from}")]
    InvalidTransition { from: AppState, action: &'static str },

    #[error("Select a role first")]
    RoleNotSelected,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// The mounted dashboard. Dropped on logout.
pub enum DashboardSession {
    Patient(PatientSession),
    Doctor(DoctorSession),
}

impl DashboardSession {
    #[must_use]
    pub fn view(&self) -> DashboardView {
        match self {
            Self::Patient(s) => s.nav().dashboard_view(),
            Self::Doctor(s) => s.nav().dashboard_view(),
        }
    }

    fn back(&mut self) -> Result<bool, SessionError> {
        match self {
            Self::Patient(s) => s.back(),
            Self::Doctor(s) => s.back(),
        }
    }
}

pub struct NavigationController {
    state: AppState,
    role: Option<Role>,
    language: Language,
    history: Vec<AppState>,
    session: Option<DashboardSession>,
    data: Arc<dyn CareDataSource>,
}

impl NavigationController {
    #[must_use]
    pub fn new(data: Arc<dyn CareDataSource>) -> Self {
        Self {
            state: AppState::Home,
            role: None,
            language: Language::default(),
            history: Vec::new(),
            session: None,
            data,
        }
    }

    #[must_use]
    pub fn state(&self) -> AppState {
        self.state
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn session(&self) -> Option<&DashboardSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut DashboardSession> {
        self.session.as_mut()
    }

    #[must_use]
    pub fn dashboard_view(&self) -> Option<DashboardView> {
        self.session.as_ref().map(DashboardSession::view)
    }

    /// The single screen to render right now.
    ///
    /// A state the role may not hold renders as `Home`; a view outside the
    /// role's set falls back to that role's dashboard home.
    #[must_use]
    pub fn screen(&self) -> ScreenId {
        if !gate::permits(self.role, self.state) {
            return ScreenId::Home;
        }
        let view = self
            .dashboard_view()
            .filter(|&view| self.role.is_some_and(|role| gate::permits_view(role, view)));
        registry::resolve(self.state, view)
    }

    fn expect_state(&self, expected: AppState, action: &'static str) -> Result<(), NavigationError> {
        if self.state == expected {
            Ok(())
        } else {
            tracing::warn!(from = %self.state, action, "Refused navigation request");
            Err(NavigationError::InvalidTransition {
                from: self.state,
                action,
            })
        }
    }

    fn push_to(&mut self, next: AppState) {
        tracing::debug!(from = %self.state, to = %next, "Navigation transition");
        self.history.push(self.state);
        self.state = next;
    }

    /// Home screen Login / Sign Up buttons.
    ///
    /// # Errors
    /// `InvalidTransition` outside `Home`.
    pub fn start(&mut self) -> Result<(), NavigationError> {
        self.expect_state(AppState::Home, "start")?;
        self.push_to(AppState::RoleSelection);
        Ok(())
    }

    /// # Errors
    /// `InvalidTransition` outside `RoleSelection`.
    pub fn select_role(&mut self, role: Role) -> Result<(), NavigationError> {
        self.expect_state(AppState::RoleSelection, "select a role")?;
        self.role = Some(role);
        self.push_to(AppState::LanguageSelection);
        Ok(())
    }

    /// # Errors
    /// `InvalidTransition` outside `LanguageSelection`; `RoleNotSelected`
    /// when no role is set (state unchanged).
    pub fn select_language(&mut self, language: Language) -> Result<(), NavigationError> {
        self.expect_state(AppState::LanguageSelection, "select a language")?;
        let role = self.role.ok_or(NavigationError::RoleNotSelected)?;
        self.language = language;
        self.push_to(gate::auth_state(role));
        Ok(())
    }

    /// Enter the role's dashboard with a fresh session.
    ///
    /// Credentials are checked by the auth screen before this is called.
    ///
    /// # Errors
    /// `InvalidTransition` unless on the auth screen of the current role.
    pub fn complete_login(&mut self) -> Result<(), NavigationError> {
        let role = self.role.ok_or(NavigationError::RoleNotSelected)?;
        self.expect_state(gate::auth_state(role), "log in")?;

        let target = gate::dashboard_state(role);
        self.session = Some(match role {
            Role::Patient => DashboardSession::Patient(PatientSession::new(Arc::clone(&self.data))),
            Role::Doctor => DashboardSession::Doctor(DoctorSession::new(Arc::clone(&self.data))),
        });
        self.history.clear();
        tracing::info!(%role, language = self.language.code, "Login complete");
        tracing::debug!(from = %self.state, to = %target, "Navigation transition");
        self.state = target;
        Ok(())
    }

    /// Reset to `Home`, dropping the role, language and dashboard session.
    pub fn logout(&mut self) {
        if self.state.is_dashboard() {
            tracing::info!("Logged out");
        }
        self.back_to_home();
    }

    pub fn back_to_home(&mut self) {
        tracing::debug!(from = %self.state, "Back to home");
        self.state = AppState::Home;
        self.role = None;
        self.language = Language::default();
        self.history.clear();
        self.session = None;
    }

    /// Go back one step.
    ///
    /// On a dashboard the request goes to the dashboard's own navigator.
    ///
    /// # Returns
    /// `false` if there was nowhere to go.
    ///
    /// # Errors
    /// Refusals from the dashboard (e.g. during a call).
    pub fn back(&mut self) -> Result<bool, NavigationError> {
        match self.state {
            AppState::Home => Ok(false),
            AppState::RoleSelection => {
                self.back_to_home();
                Ok(true)
            }
            AppState::PatientDashboard | AppState::DoctorDashboard => match self.session.as_mut() {
                Some(session) => Ok(session.back()?),
                None => Ok(false),
            },
            AppState::LanguageSelection | AppState::PatientAuth | AppState::DoctorAuth => {
                match self.history.pop() {
                    Some(previous) => {
                        tracing::debug!(from = %self.state, to = %previous, "Navigation back");
                        self.state = previous;
                    }
                    None => self.back_to_home(),
                }
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticDataSource;
    use crate::domain::{DoctorView, PatientView, Selection, Tab};

    fn controller() -> NavigationController {
        NavigationController::new(Arc::new(StaticDataSource::new()))
    }

    fn login(role: Role) -> NavigationController {
        let mut nav = controller();
        nav.start().expect("start");
        nav.select_role(role).expect("role");
        nav.select_language(Language::ENGLISH).expect("language");
        nav.complete_login().expect("login");
        nav
    }

    #[test]
    fn test_login_reaches_role_dashboard() {
        assert_eq!(login(Role::Patient).state(), AppState::PatientDashboard);
        assert_eq!(login(Role::Doctor).state(), AppState::DoctorDashboard);
    }

    #[test]
    fn test_doctor_login_lands_on_dashboard_home() {
        let nav = login(Role::Doctor);
        assert_eq!(nav.screen(), ScreenId::Doctor(DoctorView::Dashboard));
        match nav.session() {
            Some(DashboardSession::Doctor(s)) => assert_eq!(s.nav().tab(), Tab::Home),
            _ => panic!("expected doctor session"),
        }
    }

    #[test]
    fn test_logout_from_deep_view_resets() {
        let mut nav = login(Role::Doctor);
        if let Some(DashboardSession::Doctor(s)) = nav.session_mut() {
            s.join_call("1").expect("join");
            s.enter_call().expect("in call");
        }
        nav.logout();
        assert_eq!(nav.state(), AppState::Home);
        assert_eq!(nav.role(), None);
        assert_eq!(nav.language(), Language::ENGLISH);
        assert!(nav.session().is_none());
        assert_eq!(nav.screen(), ScreenId::Home);
    }

    #[test]
    fn test_invalid_transitions_leave_state() {
        let mut nav = controller();
        assert!(matches!(
            nav.select_role(Role::Patient),
            Err(NavigationError::InvalidTransition { .. })
        ));
        assert!(nav.complete_login().is_err());
        assert_eq!(nav.state(), AppState::Home);
        assert_eq!(nav.role(), None);
    }

    #[test]
    fn test_back_follows_history() {
        let mut nav = controller();
        nav.start().expect("start");
        nav.select_role(Role::Doctor).expect("role");
        nav.select_language(Language::HINDI).expect("language");
        assert_eq!(nav.state(), AppState::DoctorAuth);

        assert!(nav.back().expect("back"));
        assert_eq!(nav.state(), AppState::LanguageSelection);
        assert!(nav.back().expect("back"));
        assert_eq!(nav.state(), AppState::RoleSelection);
        assert!(nav.back().expect("back"));
        assert_eq!(nav.state(), AppState::Home);
        assert_eq!(nav.role(), None);
        assert!(!nav.back().expect("back"));
    }

    #[test]
    fn test_dashboard_back_is_delegated() {
        let mut nav = login(Role::Doctor);
        if let Some(DashboardSession::Doctor(s)) = nav.session_mut() {
            s.open(DoctorView::Patients).expect("patients");
            s.view_patient("1").expect("detail");
        }
        assert!(nav.back().expect("back"));
        assert_eq!(nav.screen(), ScreenId::Doctor(DoctorView::Patients));
        assert_eq!(nav.state(), AppState::DoctorDashboard);
    }

    #[test]
    fn test_back_refused_in_call() {
        let mut nav = login(Role::Patient);
        if let Some(DashboardSession::Patient(s)) = nav.session_mut() {
            s.start_quick_call().expect("call");
            s.enter_call().expect("in call");
        }
        assert!(matches!(nav.back(), Err(NavigationError::Session(_))));
        assert_eq!(nav.screen(), ScreenId::Patient(PatientView::InCall));
    }

    #[test]
    fn test_new_login_gets_fresh_session() {
        let mut nav = login(Role::Patient);
        if let Some(DashboardSession::Patient(s)) = nav.session_mut() {
            s.select_medicine("1").expect("medicine");
            s.add_to_cart(1).expect("add");
            assert_eq!(s.nav().selection(), &Selection::medicine("1"));
        }
        nav.logout();
        nav.start().expect("start");
        nav.select_role(Role::Patient).expect("role");
        nav.select_language(Language::PUNJABI).expect("language");
        nav.complete_login().expect("login");
        match nav.session() {
            Some(DashboardSession::Patient(s)) => assert!(s.cart().is_empty()),
            _ => panic!("expected patient session"),
        }
    }

    #[test]
    fn test_screen_goes_through_role_gate() {
        let mut nav = login(Role::Patient);
        nav.session = Some(DashboardSession::Doctor(DoctorSession::new(Arc::clone(&nav.data))));
        assert_eq!(nav.screen(), ScreenId::Patient(PatientView::Dashboard));

        nav.state = AppState::DoctorDashboard;
        assert_eq!(nav.screen(), ScreenId::Home);

        nav.role = None;
        nav.state = AppState::LanguageSelection;
        assert_eq!(nav.screen(), ScreenId::Home);
    }
}
