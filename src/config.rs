//! Runtime configuration read from `CAREFLOW_*` environment variables.

use std::time::Duration;

use crate::adapters::biometric::{BiometricPlatform, DEFAULT_SUCCESS_RATE};
use crate::domain::Language;

/// Settings for the mocked collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Which biometric implementation to mount.
    pub biometric: BiometricPlatform,

    /// Probability that the mock sensor accepts a verification.
    pub biometric_success_rate: f64,

    /// Simulated sensor delay.
    pub biometric_delay: Duration,

    /// Simulated speech-to-text delay.
    pub speech_delay: Duration,

    /// Language highlighted on the language selection screen.
    pub language: Language,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            biometric: BiometricPlatform::Mock,
            biometric_success_rate: DEFAULT_SUCCESS_RATE,
            biometric_delay: Duration::from_millis(1500),
            speech_delay: Duration::from_millis(2000),
            language: Language::ENGLISH,
        }
    }
}

impl RuntimeConfig {
    /// Load config overrides from environment (best-effort).
    ///
    /// Supported:
    /// - CAREFLOW_BIOMETRIC=mock|unavailable
    /// - CAREFLOW_BIOMETRIC_SUCCESS_RATE (0..=1)
    /// - CAREFLOW_BIOMETRIC_DELAY_MS
    /// - CAREFLOW_SPEECH_DELAY_MS
    /// - CAREFLOW_LANGUAGE (en, hi, pa)
    ///
    /// Invalid values are ignored and the default is kept.
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = lookup("CAREFLOW_BIOMETRIC") {
            match BiometricPlatform::parse(&v) {
                Some(platform) => cfg.biometric = platform,
                None => tracing::warn!("Ignoring unknown CAREFLOW_BIOMETRIC value '{v}'"),
            }
        }

        if let Some(v) = lookup("CAREFLOW_BIOMETRIC_SUCCESS_RATE") {
            if let Ok(x) = v.trim().parse::<f64>() {
                if x.is_finite() && (0.0..=1.0).contains(&x) {
                    cfg.biometric_success_rate = x;
                }
            }
        }

        if let Some(delay) = lookup("CAREFLOW_BIOMETRIC_DELAY_MS").and_then(|v| parse_millis(&v)) {
            cfg.biometric_delay = delay;
        }

        if let Some(delay) = lookup("CAREFLOW_SPEECH_DELAY_MS").and_then(|v| parse_millis(&v)) {
            cfg.speech_delay = delay;
        }

        if let Some(language) = lookup("CAREFLOW_LANGUAGE").and_then(|v| Language::from_code(&v)) {
            cfg.language = language;
        }

        cfg
    }
}

fn parse_millis(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> RuntimeConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&[]);
        assert_eq!(cfg, RuntimeConfig::default());
        assert_eq!(cfg.biometric_delay, Duration::from_millis(1500));
        assert_eq!(cfg.language.code, "en");
    }

    #[test]
    fn test_overrides() {
        let cfg = load(&[
            ("CAREFLOW_BIOMETRIC", "unavailable"),
            ("CAREFLOW_BIOMETRIC_SUCCESS_RATE", "0.25"),
            ("CAREFLOW_BIOMETRIC_DELAY_MS", "10"),
            ("CAREFLOW_SPEECH_DELAY_MS", "20"),
            ("CAREFLOW_LANGUAGE", "PA"),
        ]);
        assert_eq!(cfg.biometric, BiometricPlatform::Unavailable);
        assert_eq!(cfg.biometric_success_rate, 0.25);
        assert_eq!(cfg.biometric_delay, Duration::from_millis(10));
        assert_eq!(cfg.speech_delay, Duration::from_millis(20));
        assert_eq!(cfg.language.code, "pa");
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let cfg = load(&[
            ("CAREFLOW_BIOMETRIC", "native"),
            ("CAREFLOW_BIOMETRIC_SUCCESS_RATE", "1.5"),
            ("CAREFLOW_BIOMETRIC_DELAY_MS", "-3"),
            ("CAREFLOW_LANGUAGE", "fr"),
        ]);
        assert_eq!(cfg, RuntimeConfig::default());
    }
}
