//! # Careflow
//!
//! Terminal healthcare portal for patients and doctors.
//!
//! This crate provides:
//! - A view-state navigation controller with a role gate
//! - Per-role dashboards with their own nested navigation
//! - Voice command classification
//! - Mocked biometric, speech, capture and data collaborators
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core portal types (views, appointments, reports, pharmacy)
//! - `ports`: Trait definitions for external collaborators
//! - `adapters`: Mock implementations and log sanitization
//! - `application`: Navigation and dashboard use cases
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{NavigationController, ScreenId};
pub use domain::{AppState, Role};

/// Result type for Careflow operations
pub type Result<T> = std::result::Result<T, CareflowError>;

/// Main error type for Careflow
#[derive(Debug, thiserror::Error)]
pub enum CareflowError {
    #[error("Navigation failed: {0}")]
    Navigation(#[from] application::NavigationError),

    #[error("Dashboard operation failed: {0}")]
    Session(#[from] application::SessionError),

    #[error("Invalid credentials: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Biometric error: {0}")]
    Biometric(#[from] ports::BiometricError),

    #[error("Speech error: {0}")]
    Speech(#[from] ports::SpeechError),

    #[error("Document capture failed: {0}")]
    Capture(#[from] ports::CaptureError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert() {
        let err: CareflowError = application::NavigationError::RoleNotSelected.into();
        assert_eq!(err.to_string(), "Navigation failed: Select a role first");

        let err: CareflowError = domain::ValidationError::MissingFields.into();
        assert!(matches!(err, CareflowError::Validation(_)));
    }
}
