//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits are the boundary between
//! the portal and everything it does not own: biometric sensors, speech,
//! document capture and the data behind the dashboards.

mod biometric;
mod capture;
mod data_source;
mod speech;

pub use biometric::{Availability, BiometricCapability, BiometricError, BiometryKind};
pub use capture::{CaptureError, CapturedDocument, DocumentCapture};
pub use data_source::CareDataSource;
pub use speech::{ListenContext, SpeechError, SpeechRecognizer, SpeechSynthesizer};
