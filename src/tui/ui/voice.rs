//! Voice overlay: a listening popup layered over the current screen.

use std::sync::Arc;
use std::time::Duration;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::{is_navigation_command, PendingTask, TaskPoll};
use crate::ports::{ListenContext, SpeechError, SpeechRecognizer};
use crate::tui::styles::CareTheme;
use crate::tui::ui::{centered_rect, panel};

/// Where the overlay stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoicePhase {
    Listening,
    Heard(String),
    Failed(String),
}

/// One voice capture. Closing the overlay drops it and cancels the listen.
pub struct VoiceOverlay {
    context: ListenContext,
    recognizer: Arc<dyn SpeechRecognizer>,
    delay: Duration,
    task: Option<PendingTask<Result<String, SpeechError>>>,
    phase: VoicePhase,
}

impl VoiceOverlay {
    /// Open the overlay and start listening right away.
    #[must_use]
    pub fn listen(
        context: ListenContext,
        recognizer: Arc<dyn SpeechRecognizer>,
        delay: Duration,
    ) -> Self {
        let mut overlay = Self {
            context,
            recognizer,
            delay,
            task: None,
            phase: VoicePhase::Listening,
        };
        overlay.restart();
        overlay
    }

    /// Record again, discarding any previous transcript.
    pub fn restart(&mut self) {
        let recognizer = Arc::clone(&self.recognizer);
        let context = self.context;
        self.task = Some(PendingTask::spawn(self.delay, move || {
            recognizer.listen(context)
        }));
        self.phase = VoicePhase::Listening;
        tracing::debug!(?context, "Voice capture started");
    }

    #[must_use]
    pub fn context(&self) -> ListenContext {
        self.context
    }

    #[must_use]
    pub fn phase(&self) -> &VoicePhase {
        &self.phase
    }

    /// The transcript, once something was heard.
    #[must_use]
    pub fn transcript(&self) -> Option<&str> {
        match &self.phase {
            VoicePhase::Heard(text) => Some(text),
            _ => None,
        }
    }

    /// Pick up the capture result if it is ready.
    pub fn poll(&mut self) {
        let Some(task) = self.task.as_mut() else {
            return;
        };
        self.phase = match task.try_recv() {
            TaskPoll::Pending => return,
            TaskPoll::Ready(Ok(text)) => {
                tracing::debug!("Voice capture finished");
                VoicePhase::Heard(text)
            }
            TaskPoll::Ready(Err(err)) => VoicePhase::Failed(err.to_string()),
            TaskPoll::Closed => VoicePhase::Failed(SpeechError::Unavailable.to_string()),
        };
        self.task = None;
    }
}

pub fn render_voice(f: &mut Frame, area: Rect, overlay: &VoiceOverlay) {
    let slot = centered_rect(60, 40, area);
    let title = match overlay.context() {
        ListenContext::Assistant => "Voice Assistant",
        ListenContext::Navigator => "Voice Navigation",
        ListenContext::Dictation => "Voice Input",
    };

    let mut lines = vec![Line::from("")];
    match overlay.phase() {
        VoicePhase::Listening => {
            lines.push(Line::from(Span::styled("● Listening...", CareTheme::danger())));
            let prompt = match overlay.context() {
                ListenContext::Navigator => "Say where you want to go",
                ListenContext::Dictation => "Speak now",
                ListenContext::Assistant => "Use voice commands to navigate the app",
            };
            lines.push(Line::from(Span::styled(prompt, CareTheme::text_secondary())));
        }
        VoicePhase::Heard(text) => {
            lines.push(Line::from(Span::styled("You said:", CareTheme::text_secondary())));
            lines.push(Line::from(Span::styled(format!("\"{text}\""), CareTheme::title())));
            lines.push(Line::from(""));
            let action = match overlay.context() {
                ListenContext::Assistant if is_navigation_command(text) => "Navigate",
                ListenContext::Navigator => "Navigate",
                _ => "Use this input",
            };
            lines.push(Line::from(vec![
                Span::styled("[Enter] ", CareTheme::key_hint()),
                Span::styled(format!("{action}  "), CareTheme::key_desc()),
                Span::styled("[Space] ", CareTheme::key_hint()),
                Span::styled("Record again  ", CareTheme::key_desc()),
                Span::styled("[Esc] ", CareTheme::key_hint()),
                Span::styled("Close", CareTheme::key_desc()),
            ]));
        }
        VoicePhase::Failed(reason) => {
            lines.push(Line::from(Span::styled(reason.clone(), CareTheme::warning())));
            lines.push(Line::from(vec![
                Span::styled("[Space] ", CareTheme::key_hint()),
                Span::styled("Try again  ", CareTheme::key_desc()),
                Span::styled("[Esc] ", CareTheme::key_hint()),
                Span::styled("Close", CareTheme::key_desc()),
            ]));
        }
    }

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(CareTheme::overlay())
        .block(panel(title));

    f.render_widget(Clear, slot);
    f.render_widget(p, slot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::speech::NAVIGATOR_PHRASES;
    use crate::adapters::CannedSpeech;

    fn wait(overlay: &mut VoiceOverlay) {
        for _ in 0..500 {
            overlay.poll();
            if overlay.phase() != &VoicePhase::Listening {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("voice capture did not finish");
    }

    #[test]
    fn test_overlay_hears_navigator_phrase() {
        let recognizer = Arc::new(CannedSpeech::with_seed([7u8; 32]));
        let mut overlay =
            VoiceOverlay::listen(ListenContext::Navigator, recognizer, Duration::from_millis(5));
        assert_eq!(overlay.transcript(), None);
        wait(&mut overlay);
        let heard = overlay.transcript().expect("transcript");
        assert!(NAVIGATOR_PHRASES.contains(&heard));
    }

    #[test]
    fn test_restart_listens_again() {
        let recognizer = Arc::new(CannedSpeech::with_seed([1u8; 32]));
        let mut overlay =
            VoiceOverlay::listen(ListenContext::Dictation, recognizer, Duration::from_millis(5));
        wait(&mut overlay);
        overlay.restart();
        assert_eq!(overlay.phase(), &VoicePhase::Listening);
        wait(&mut overlay);
        assert!(overlay.transcript().is_some());
    }
}
