//! Screen registry: every renderable screen and the ids it needs.

use crate::domain::{AppState, DashboardView, DoctorView, Order, PatientView, Selection};

/// Exactly one of these is on screen at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Home,
    RoleSelection,
    LanguageSelection,
    PatientAuth,
    DoctorAuth,
    Patient(PatientView),
    Doctor(DoctorView),
}

/// A piece of context a screen renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    AppointmentId,
    ReportId,
    PatientId,
    MedicineId,
    Order,
}

impl Param {
    #[must_use]
    pub fn is_present(self, selection: &Selection, order: Option<&Order>) -> bool {
        match self {
            Self::AppointmentId => selection.appointment_id.is_some(),
            Self::ReportId => selection.report_id.is_some(),
            Self::PatientId => selection.patient_id.is_some(),
            Self::MedicineId => selection.medicine_id.is_some(),
            Self::Order => order.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSpec {
    pub title: &'static str,
    pub params: &'static [Param],
}

/// Map the top-level state and the dashboard's nested view to a screen.
///
/// Total: a dashboard state paired with a missing or foreign view falls
/// back to that role's dashboard home, and non-dashboard states ignore the
/// view.
#[must_use]
pub fn resolve(state: AppState, view: Option<DashboardView>) -> ScreenId {
    match state {
        AppState::Home => ScreenId::Home,
        AppState::RoleSelection => ScreenId::RoleSelection,
        AppState::LanguageSelection => ScreenId::LanguageSelection,
        AppState::PatientAuth => ScreenId::PatientAuth,
        AppState::DoctorAuth => ScreenId::DoctorAuth,
        AppState::PatientDashboard => match view {
            Some(DashboardView::Patient(v)) => ScreenId::Patient(v),
            _ => ScreenId::Patient(PatientView::Dashboard),
        },
        AppState::DoctorDashboard => match view {
            Some(DashboardView::Doctor(v)) => ScreenId::Doctor(v),
            _ => ScreenId::Doctor(DoctorView::Dashboard),
        },
    }
}

const NONE: &[Param] = &[];
const APPOINTMENT: &[Param] = &[Param::AppointmentId];

#[must_use]
pub fn spec(screen: ScreenId) -> ScreenSpec {
    let (title, params): (&'static str, &'static [Param]) = match screen {
        ScreenId::Home => ("HealthCare", NONE),
        ScreenId::RoleSelection => ("Choose Your Role", NONE),
        ScreenId::LanguageSelection => ("Select Language", NONE),
        ScreenId::PatientAuth => ("Patient Login", NONE),
        ScreenId::DoctorAuth => ("Doctor Login", NONE),
        ScreenId::Patient(view) => match view {
            PatientView::Dashboard => ("Patient Dashboard", NONE),
            PatientView::BookAppointment => ("Book Appointment", NONE),
            PatientView::AppointmentList => ("My Appointments", NONE),
            // Quick calls from the dashboard card carry no appointment.
            PatientView::PreCall => ("Ready to Join", NONE),
            PatientView::InCall => ("In Call", NONE),
            PatientView::EndCall => ("Call Ended", NONE),
            PatientView::ScanDocument => ("Scan Document", NONE),
            PatientView::ReportsList => ("Medical Reports", NONE),
            PatientView::ReportDetail => ("Report Detail", &[Param::ReportId]),
            PatientView::MedicineList => ("Pharmacy", NONE),
            PatientView::MedicineDetail => ("Medicine Detail", &[Param::MedicineId]),
            PatientView::Cart => ("Cart", NONE),
            PatientView::OrderConfirmation => ("Order Confirmed", &[Param::Order]),
        },
        ScreenId::Doctor(view) => match view {
            DoctorView::Dashboard => ("Doctor Dashboard", NONE),
            DoctorView::Appointments => ("Appointment Requests", NONE),
            DoctorView::PreCall => ("Ready to Join", APPOINTMENT),
            DoctorView::InCall => ("In Call", APPOINTMENT),
            DoctorView::EndCall => ("Call Ended", APPOINTMENT),
            DoctorView::Notes => ("Patient Notes", APPOINTMENT),
            DoctorView::Reports => ("Medical Reports", NONE),
            DoctorView::Patients => ("Patients", NONE),
            DoctorView::PatientDetail => ("Patient Detail", &[Param::PatientId]),
            DoctorView::Pharmacy => ("Pharmacy", NONE),
        },
    };
    ScreenSpec { title, params }
}

/// Required ids the current context lacks. The screen renders an empty
/// state for each.
#[must_use]
pub fn missing_params(screen: ScreenId, selection: &Selection, order: Option<&Order>) -> Vec<Param> {
    spec(screen)
        .params
        .iter()
        .copied()
        .filter(|p| !p.is_present(selection, order))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_views() -> Vec<Option<DashboardView>> {
        let mut views = vec![None];
        views.extend(PatientView::ALL.iter().map(|v| Some(DashboardView::Patient(*v))));
        views.extend(DoctorView::ALL.iter().map(|v| Some(DashboardView::Doctor(*v))));
        views
    }

    #[test]
    fn test_resolve_is_total_and_role_consistent() {
        for state in AppState::ALL {
            for view in all_views() {
                let screen = resolve(state, view);
                match state {
                    AppState::PatientDashboard => assert!(matches!(screen, ScreenId::Patient(_))),
                    AppState::DoctorDashboard => assert!(matches!(screen, ScreenId::Doctor(_))),
                    _ => assert!(!matches!(screen, ScreenId::Patient(_) | ScreenId::Doctor(_))),
                }
                assert!(!spec(screen).title.is_empty());
            }
        }
    }

    #[test]
    fn test_foreign_view_falls_back_to_dashboard() {
        let screen = resolve(
            AppState::PatientDashboard,
            Some(DashboardView::Doctor(DoctorView::Notes)),
        );
        assert_eq!(screen, ScreenId::Patient(PatientView::Dashboard));
    }

    #[test]
    fn test_missing_params() {
        let screen = ScreenId::Doctor(DoctorView::PatientDetail);
        assert_eq!(
            missing_params(screen, &Selection::default(), None),
            vec![Param::PatientId]
        );
        assert!(missing_params(screen, &Selection::patient("1"), None).is_empty());
        assert_eq!(
            missing_params(ScreenId::Patient(PatientView::OrderConfirmation), &Selection::default(), None),
            vec![Param::Order]
        );
    }
}
