//! Speech port: capture (speech-to-text) and synthesis (text-to-speech).

/// Which voice surface is listening. Implementations may bias their
/// vocabulary on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenContext {
    /// Free-form assistant overlay.
    Assistant,
    /// Navigation-only command sheet.
    Navigator,
    /// Dictation into a form field.
    Dictation,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech recognition unavailable")]
    Unavailable,

    #[error("No speech detected")]
    NoSpeech,
}

/// Speech-to-text.
pub trait SpeechRecognizer: Send + Sync {
    /// Capture one utterance and return its transcript.
    ///
    /// # Errors
    /// Returns `SpeechError` if nothing could be transcribed.
    fn listen(&self, context: ListenContext) -> Result<String, SpeechError>;
}

/// Text-to-speech ("read this page").
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str);

    fn stop(&self);
}
