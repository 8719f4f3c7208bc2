//! Biometric adapters: Implementations of BiometricCapability.
//!
//! There is no native sensor integration. The terminal build picks one of:
//! - `MockBiometric`: always available, passes with a configurable probability
//! - `UnavailableBiometric`: no sensor, every login falls back to manual entry
//!
//! # Mutex Behavior
//!
//! The mock keeps its RNG behind a `Mutex`. A poisoned mutex fails the
//! verification (with a fallback hint) rather than panicking.

use std::sync::Mutex;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::ports::{Availability, BiometricCapability, BiometricError, BiometryKind};

/// Default probability that a mock verification passes.
pub const DEFAULT_SUCCESS_RATE: f64 = 0.7;

/// Which biometric implementation the platform provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BiometricPlatform {
    /// Randomised mock sensor (web/desktop fallback).
    #[default]
    Mock,
    /// No sensor present.
    Unavailable,
}

impl BiometricPlatform {
    /// Parse a config value. Unknown values are `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" => Some(Self::Mock),
            "unavailable" | "none" | "off" => Some(Self::Unavailable),
            _ => None,
        }
    }
}

/// Build the capability for a platform.
#[must_use]
pub fn select_biometric(
    platform: BiometricPlatform,
    success_rate: f64,
) -> Box<dyn BiometricCapability> {
    match platform {
        BiometricPlatform::Mock => Box::new(MockBiometric::with_success_rate(success_rate)),
        BiometricPlatform::Unavailable => Box::new(UnavailableBiometric),
    }
}

/// Mock fingerprint sensor with a randomised outcome.
pub struct MockBiometric {
    success_rate: f64,
    rng: Mutex<ChaCha20Rng>,
}

impl MockBiometric {
    /// Create a mock with the default success rate.
    #[must_use]
    pub fn new() -> Self {
        Self::with_success_rate(DEFAULT_SUCCESS_RATE)
    }

    /// Create a mock passing with probability `success_rate` (clamped to 0..=1).
    #[must_use]
    pub fn with_success_rate(success_rate: f64) -> Self {
        Self {
            success_rate: sanitize_rate(success_rate),
            rng: Mutex::new(ChaCha20Rng::from_entropy()),
        }
    }

    /// Deterministic mock for tests.
    #[must_use]
    pub fn with_seed(success_rate: f64, seed: [u8; 32]) -> Self {
        Self {
            success_rate: sanitize_rate(success_rate),
            rng: Mutex::new(ChaCha20Rng::from_seed(seed)),
        }
    }

    #[must_use]
    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

impl Default for MockBiometric {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.clamp(0.0, 1.0)
    } else {
        tracing::warn!("Invalid biometric success rate {rate}, using default");
        DEFAULT_SUCCESS_RATE
    }
}

impl BiometricCapability for MockBiometric {
    fn is_available(&self) -> Availability {
        Availability {
            available: true,
            kind: Some(BiometryKind::Fingerprint),
        }
    }

    fn verify_identity(&self, reason: &str) -> Result<(), BiometricError> {
        let roll: f64 = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| BiometricError::new("Biometric service failed to initialise"))?;
            rng.gen()
        };

        tracing::debug!(reason, "Mock biometric verification");

        if roll < self.success_rate {
            Ok(())
        } else {
            Err(BiometricError::new("Biometric authentication failed"))
        }
    }
}

/// Platform without a sensor.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBiometric;

impl BiometricCapability for UnavailableBiometric {
    fn is_available(&self) -> Availability {
        Availability::unavailable()
    }

    fn verify_identity(&self, _reason: &str) -> Result<(), BiometricError> {
        Err(BiometricError::not_available())
    }
}
