//! Biometric port: Trait for platform identity verification.
//!
//! The portal only needs to know whether a sensor exists and whether a
//! verification attempt passed. Everything else is the platform's business.

/// Kind of sensor the platform exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiometryKind {
    TouchId,
    FaceId,
    Fingerprint,
    FaceAuthentication,
    IrisAuthentication,
    Multiple,
}

impl BiometryKind {
    /// Display name used on the login prompt.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::TouchId => "Touch ID",
            Self::FaceId => "Face ID",
            Self::Fingerprint => "Fingerprint",
            Self::FaceAuthentication => "Face Authentication",
            Self::IrisAuthentication => "Iris Authentication",
            Self::Multiple => "Biometric Authentication",
        }
    }
}

/// Result of probing the platform for a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub kind: Option<BiometryKind>,
}

impl Availability {
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            kind: None,
        }
    }
}

/// A failed verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BiometricError {
    pub message: String,
    /// Whether the caller should offer manual credential entry.
    pub should_fallback: bool,
}

impl BiometricError {
    /// Build an error, deriving the fallback hint from the message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        let should_fallback = lower.contains("cancelled")
            || lower.contains("failed")
            || lower.contains("not available");
        Self {
            message,
            should_fallback,
        }
    }

    #[must_use]
    pub fn not_available() -> Self {
        Self::new("Biometric authentication not available")
    }
}

/// Platform biometric capability.
///
/// `verify_identity` is blocking; callers that must stay responsive run it
/// through a pending task.
pub trait BiometricCapability: Send + Sync {
    /// Probe for a usable sensor.
    fn is_available(&self) -> Availability;

    /// Ask the user to verify.
    ///
    /// # Errors
    /// Returns `BiometricError` when the attempt fails or is cancelled.
    fn verify_identity(&self, reason: &str) -> Result<(), BiometricError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_hint_from_message() {
        assert!(BiometricError::new("Biometric authentication failed").should_fallback);
        assert!(BiometricError::new("User cancelled").should_fallback);
        assert!(BiometricError::not_available().should_fallback);
        assert!(!BiometricError::new("Sensor busy").should_fallback);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(BiometryKind::FaceId.display_name(), "Face ID");
        assert_eq!(BiometryKind::Multiple.display_name(), "Biometric Authentication");
    }
}
