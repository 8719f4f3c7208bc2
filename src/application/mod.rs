//! Application layer: navigation and dashboard use cases.
//!
//! Orchestrates domain types with the ports. Nothing here draws to the
//! terminal; the TUI calls into these types and renders what they expose.

pub mod auth;
pub mod dashboard;
pub mod gate;
pub mod navigation;
pub mod registry;
pub mod sessions;
pub mod task;
pub mod voice;

pub use auth::{BiometricLogin, BiometricOutcome, BiometricState, LoginForm};
pub use dashboard::{DashboardNavigator, ViewSet};
pub use navigation::{DashboardSession, NavigationController, NavigationError};
pub use registry::{Param, ScreenId, ScreenSpec};
pub use sessions::{BookingForm, DoctorSession, Notice, NoticeKind, PatientSession, SessionError};
pub use task::{PendingTask, TaskPoll};
pub use voice::{classify, is_navigation_command, VoiceIntent};
