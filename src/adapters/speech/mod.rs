//! Speech adapters: canned recognizer and a logging synthesizer.
//!
//! There is no microphone or audio output. The recognizer picks a phrase
//! from a fixed list for the listening context; the synthesizer writes what
//! it would have said to the log.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::ports::{ListenContext, SpeechError, SpeechRecognizer, SpeechSynthesizer};

/// Phrases the assistant overlay may "hear".
pub const ASSISTANT_PHRASES: [&str; 9] = [
    "I need to book an appointment with Dr. Smith",
    "Show me my recent blood test results",
    "Order my regular blood pressure medication",
    "When is my next appointment?",
    "I'm having chest pain, please help",
    "Go to appointments",
    "Open reports",
    "Show pharmacy",
    "View my profile",
];

/// Commands the navigator sheet may "hear".
pub const NAVIGATOR_PHRASES: [&str; 8] = [
    "Go to appointments",
    "Open reports",
    "Show pharmacy",
    "View profile",
    "Go to home",
    "Show medicines",
    "Book appointment",
    "View cart",
];

/// Dictation snippets for form fields.
pub const DICTATION_PHRASES: [&str; 7] = [
    "Dr. Sarah Wilson",
    "I have been experiencing chest pain",
    "Amlodipine 5mg",
    "Tomorrow at 2 PM",
    "Blood pressure medication",
    "Dr. Smith",
    "I need a follow-up appointment",
];

/// Recognizer returning a random canned phrase.
pub struct CannedSpeech {
    rng: Mutex<ChaCha20Rng>,
}

impl CannedSpeech {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_entropy()),
        }
    }

    #[must_use]
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_seed(seed)),
        }
    }

    fn phrases(context: ListenContext) -> &'static [&'static str] {
        match context {
            ListenContext::Assistant => &ASSISTANT_PHRASES,
            ListenContext::Navigator => &NAVIGATOR_PHRASES,
            ListenContext::Dictation => &DICTATION_PHRASES,
        }
    }
}

impl Default for CannedSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechRecognizer for CannedSpeech {
    fn listen(&self, context: ListenContext) -> Result<String, SpeechError> {
        let mut rng = self.rng.lock().map_err(|_| SpeechError::Unavailable)?;
        Self::phrases(context)
            .choose(&mut *rng)
            .map(|s| (*s).to_string())
            .ok_or(SpeechError::NoSpeech)
    }
}

/// Synthesizer that logs instead of speaking.
#[derive(Debug, Default)]
pub struct LoggingSynthesizer {
    speaking: AtomicBool,
}

impl LoggingSynthesizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }
}

impl SpeechSynthesizer for LoggingSynthesizer {
    fn speak(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.speaking.store(true, Ordering::SeqCst);
        tracing::info!(chars = text.len(), "Reading page aloud: {text}");
    }

    fn stop(&self) {
        if self.speaking.swap(false, Ordering::SeqCst) {
            tracing::info!("Stopped reading");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_uses_context_vocabulary() {
        let speech = CannedSpeech::with_seed([3u8; 32]);
        for _ in 0..20 {
            let heard = speech.listen(ListenContext::Navigator).expect("phrase");
            assert!(NAVIGATOR_PHRASES.contains(&heard.as_str()));
        }
        let dictated = speech.listen(ListenContext::Dictation).expect("phrase");
        assert!(DICTATION_PHRASES.contains(&dictated.as_str()));
    }

    #[test]
    fn test_synthesizer_tracks_speaking() {
        let tts = LoggingSynthesizer::new();
        tts.speak("");
        assert!(!tts.is_speaking());
        tts.speak("Welcome to HealthCare");
        assert!(tts.is_speaking());
        tts.stop();
        assert!(!tts.is_speaking());
    }
}
