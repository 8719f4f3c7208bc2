//! Navigation state types: top-level screen selector, role, language and
//! the per-role dashboard view sets.

use serde::{Deserialize, Serialize};

/// Top-level screen selector for the whole application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppState {
    Home,
    RoleSelection,
    LanguageSelection,
    PatientAuth,
    DoctorAuth,
    PatientDashboard,
    DoctorDashboard,
}

impl AppState {
    /// All states, in flow order.
    pub const ALL: [AppState; 7] = [
        Self::Home,
        Self::RoleSelection,
        Self::LanguageSelection,
        Self::PatientAuth,
        Self::DoctorAuth,
        Self::PatientDashboard,
        Self::DoctorDashboard,
    ];

    #[must_use]
    pub fn is_dashboard(self) -> bool {
        matches!(self, Self::PatientDashboard | Self::DoctorDashboard)
    }

    #[must_use]
    pub fn is_auth(self) -> bool {
        matches!(self, Self::PatientAuth | Self::DoctorAuth)
    }
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Home => "home",
            Self::RoleSelection => "role-selection",
            Self::LanguageSelection => "language-selection",
            Self::PatientAuth => "patient-auth",
            Self::DoctorAuth => "doctor-auth",
            Self::PatientDashboard => "patient-dashboard",
            Self::DoctorDashboard => "doctor-dashboard",
        };
        write!(f, "{s}")
    }
}

/// Who is using the portal. Selected once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    /// Short blurb shown on the role selection card.
    #[must_use]
    pub fn tagline(self) -> &'static str {
        match self {
            Self::Patient => "Book appointments and manage your health",
            Self::Doctor => "Manage patients and provide care",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Doctor => write!(f, "doctor"),
        }
    }
}

/// A UI language the user may pick. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language {
        code: "en",
        name: "English",
        native: "English",
    };
    pub const HINDI: Language = Language {
        code: "hi",
        name: "Hindi",
        native: "हिंदी",
    };
    pub const PUNJABI: Language = Language {
        code: "pa",
        name: "Punjabi",
        native: "ਪੰਜਾਬੀ",
    };

    pub const SUPPORTED: [Language; 3] = [Self::ENGLISH, Self::HINDI, Self::PUNJABI];

    /// Look up a supported language by its code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|l| l.code.eq_ignore_ascii_case(code))
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::ENGLISH
    }
}

/// Bottom navigation tab inside a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Home,
    Appointments,
    Reports,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Self::Home, Self::Appointments, Self::Reports, Self::Profile];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Appointments => "Appointments",
            Self::Reports => "Reports",
            Self::Profile => "Profile",
        }
    }
}

/// Position inside the linear video-call flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallPhase {
    PreCall,
    InCall,
    EndCall,
}

/// Secondary screen selector inside the patient dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientView {
    Dashboard,
    BookAppointment,
    AppointmentList,
    PreCall,
    InCall,
    EndCall,
    ScanDocument,
    ReportsList,
    ReportDetail,
    MedicineList,
    MedicineDetail,
    Cart,
    OrderConfirmation,
}

impl PatientView {
    pub const ALL: [PatientView; 13] = [
        Self::Dashboard,
        Self::BookAppointment,
        Self::AppointmentList,
        Self::PreCall,
        Self::InCall,
        Self::EndCall,
        Self::ScanDocument,
        Self::ReportsList,
        Self::ReportDetail,
        Self::MedicineList,
        Self::MedicineDetail,
        Self::Cart,
        Self::OrderConfirmation,
    ];
}

/// Secondary screen selector inside the doctor dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoctorView {
    Dashboard,
    Appointments,
    PreCall,
    InCall,
    EndCall,
    Notes,
    Reports,
    Patients,
    PatientDetail,
    Pharmacy,
}

impl DoctorView {
    pub const ALL: [DoctorView; 10] = [
        Self::Dashboard,
        Self::Appointments,
        Self::PreCall,
        Self::InCall,
        Self::EndCall,
        Self::Notes,
        Self::Reports,
        Self::Patients,
        Self::PatientDetail,
        Self::Pharmacy,
    ];
}

/// The nested view of whichever dashboard is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashboardView {
    Patient(PatientView),
    Doctor(DoctorView),
}

/// Ephemeral selected-entity ids for the current sub-flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub appointment_id: Option<String>,
    pub report_id: Option<String>,
    pub patient_id: Option<String>,
    pub medicine_id: Option<String>,
}

impl Selection {
    #[must_use]
    pub fn appointment(id: impl Into<String>) -> Self {
        Self {
            appointment_id: Some(id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn report(id: impl Into<String>) -> Self {
        Self {
            report_id: Some(id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn patient(id: impl Into<String>) -> Self {
        Self {
            patient_id: Some(id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn medicine(id: impl Into<String>) -> Self {
        Self {
            medicine_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Overlay the ids present in `other` onto `self`.
    pub fn merge(&mut self, other: Selection) {
        if other.appointment_id.is_some() {
            self.appointment_id = other.appointment_id;
        }
        if other.report_id.is_some() {
            self.report_id = other.report_id;
        }
        if other.patient_id.is_some() {
            self.patient_id = other.patient_id;
        }
        if other.medicine_id.is_some() {
            self.medicine_id = other.medicine_id;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.appointment_id.is_none()
            && self.report_id.is_none()
            && self.patient_id.is_none()
            && self.medicine_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_lookup() {
        assert_eq!(Language::from_code("hi"), Some(Language::HINDI));
        assert_eq!(Language::from_code(" PA "), Some(Language::PUNJABI));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::default().code, "en");
    }

    #[test]
    fn test_selection_merge_keeps_existing_ids() {
        let mut sel = Selection::appointment("1");
        sel.merge(Selection::report("r9"));
        assert_eq!(sel.appointment_id.as_deref(), Some("1"));
        assert_eq!(sel.report_id.as_deref(), Some("r9"));

        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn test_app_state_display() {
        assert_eq!(AppState::DoctorAuth.to_string(), "doctor-auth");
        assert!(AppState::PatientDashboard.is_dashboard());
        assert!(!AppState::Home.is_auth());
    }
}
