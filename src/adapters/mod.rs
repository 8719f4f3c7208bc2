//! Adapters layer: Concrete implementations of ports.
//!
//! Everything here is a stand-in for device or backend integration:
//! - `biometric`: mock and unavailable fingerprint sensors
//! - `speech`: canned recognizer and logging synthesizer
//! - `capture`: document capture from local files
//! - `mock_data`: built-in demo collections
//! - `sanitize`: PII filtering for logs

pub mod biometric;
pub mod capture;
pub mod mock_data;
pub mod sanitize;
pub mod speech;

pub use biometric::{select_biometric, BiometricPlatform, MockBiometric, UnavailableBiometric};
pub use capture::LocalFileCapture;
pub use mock_data::StaticDataSource;
pub use speech::{CannedSpeech, LoggingSynthesizer};
