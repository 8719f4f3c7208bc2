//! Role gate: which states and views each role may reach.
//!
//! Patients and doctors walk two parallel graphs. They share the public
//! entry screens and some leaf screens (call, reports, pharmacy), but never
//! each other's auth or dashboard states.

use crate::domain::{AppState, DashboardView, DoctorView, PatientView, Role};

#[must_use]
pub fn auth_state(role: Role) -> AppState {
    match role {
        Role::Patient => AppState::PatientAuth,
        Role::Doctor => AppState::DoctorAuth,
    }
}

#[must_use]
pub fn dashboard_state(role: Role) -> AppState {
    match role {
        Role::Patient => AppState::PatientDashboard,
        Role::Doctor => AppState::DoctorDashboard,
    }
}

/// Whether `state` is reachable with the given role (or none).
#[must_use]
pub fn permits(role: Option<Role>, state: AppState) -> bool {
    match state {
        AppState::Home | AppState::RoleSelection => true,
        AppState::LanguageSelection => role.is_some(),
        AppState::PatientAuth | AppState::PatientDashboard => role == Some(Role::Patient),
        AppState::DoctorAuth | AppState::DoctorDashboard => role == Some(Role::Doctor),
    }
}

#[must_use]
pub fn permits_patient_view(role: Role, view: PatientView) -> bool {
    match view {
        PatientView::Dashboard
        | PatientView::BookAppointment
        | PatientView::AppointmentList
        | PatientView::PreCall
        | PatientView::InCall
        | PatientView::EndCall
        | PatientView::ScanDocument
        | PatientView::ReportsList
        | PatientView::ReportDetail
        | PatientView::MedicineList
        | PatientView::MedicineDetail
        | PatientView::Cart
        | PatientView::OrderConfirmation => role == Role::Patient,
    }
}

#[must_use]
pub fn permits_doctor_view(role: Role, view: DoctorView) -> bool {
    match view {
        DoctorView::Dashboard
        | DoctorView::Appointments
        | DoctorView::PreCall
        | DoctorView::InCall
        | DoctorView::EndCall
        | DoctorView::Notes
        | DoctorView::Reports
        | DoctorView::Patients
        | DoctorView::PatientDetail
        | DoctorView::Pharmacy => role == Role::Doctor,
    }
}

#[must_use]
pub fn permits_view(role: Role, view: DashboardView) -> bool {
    match view {
        DashboardView::Patient(v) => permits_patient_view(role, v),
        DashboardView::Doctor(v) => permits_doctor_view(role, v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_cannot_cross() {
        assert!(permits(Some(Role::Patient), AppState::PatientDashboard));
        assert!(!permits(Some(Role::Patient), AppState::DoctorAuth));
        assert!(!permits(Some(Role::Doctor), AppState::PatientDashboard));
        assert!(!permits(None, AppState::LanguageSelection));
        assert!(permits(None, AppState::Home));
    }

    #[test]
    fn test_own_views_always_reachable() {
        for view in PatientView::ALL {
            assert!(permits_patient_view(Role::Patient, view));
            assert!(!permits_patient_view(Role::Doctor, view));
        }
        for view in DoctorView::ALL {
            assert!(permits_doctor_view(Role::Doctor, view));
            assert!(!permits_view(Role::Patient, DashboardView::Doctor(view)));
        }
    }

    #[test]
    fn test_state_helpers_agree_with_gate() {
        for role in [Role::Patient, Role::Doctor] {
            assert!(permits(Some(role), auth_state(role)));
            assert!(permits(Some(role), dashboard_state(role)));
        }
    }
}
