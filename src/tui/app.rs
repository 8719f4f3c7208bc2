//! Main TUI application state machine.
//!
//! Handles:
//! - Screen resolution from the navigation controller
//! - Input event handling
//! - Collaborator wiring (biometrics, speech, capture)
//! - Background biometric and voice tasks

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::{
    select_biometric, CannedSpeech, LocalFileCapture, LoggingSynthesizer, StaticDataSource,
};
use crate::application::registry::{self, Param, ScreenId};
use crate::application::{
    classify, is_navigation_command, BiometricOutcome, BiometricState, DashboardSession,
    NavigationController, NavigationError, Notice, NoticeKind,
};
use crate::config::RuntimeConfig;
use crate::domain::{Language, Tab};
use crate::ports::{
    BiometricCapability, CareDataSource, DocumentCapture, ListenContext, SpeechRecognizer,
    SpeechSynthesizer,
};

use super::input::{self, Effect};
use super::ui::{
    doctor::render_doctor,
    entry::{render_auth, render_home, render_languages, render_roles, ROLES},
    patient::render_patient,
    render_disclaimer, render_empty, render_footer, render_header, render_notice, render_tabs,
    voice::render_voice,
    AuthScreen, ViewState, VoiceOverlay,
};

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Main application state
pub struct App {
    /// Screen transitions and the mounted dashboard session
    nav: NavigationController,

    config: RuntimeConfig,
    biometric: Arc<dyn BiometricCapability>,
    recognizer: Arc<dyn SpeechRecognizer>,
    reader: Arc<dyn SpeechSynthesizer>,
    capture: Arc<dyn DocumentCapture>,

    /// Screen the view state below belongs to
    screen: ScreenId,

    /// Screen-local state, reset on every screen change
    view: ViewState,

    /// Open voice overlay (if listening or showing a transcript)
    voice: Option<VoiceOverlay>,

    /// Toast and when it was raised
    toast: Option<(Notice, Instant)>,

    /// Whether the screen title is being read aloud
    reading: bool,

    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    /// Create a new application instance using the built-in mock adapters.
    ///
    /// Configuration comes from `CAREFLOW_*` environment variables.
    /// For more control, use `with_dependencies()`.
    #[must_use]
    pub fn new() -> Self {
        let config = RuntimeConfig::from_env_or_default();
        let biometric: Arc<dyn BiometricCapability> = Arc::from(select_biometric(
            config.biometric,
            config.biometric_success_rate,
        ));

        Self::with_dependencies(
            config,
            Arc::new(StaticDataSource::new()),
            biometric,
            Arc::new(CannedSpeech::new()),
            Arc::new(LoggingSynthesizer::new()),
            Arc::new(LocalFileCapture::new()),
        )
    }

    /// Create application with injected collaborators (Composition Root pattern).
    #[must_use]
    pub fn with_dependencies(
        config: RuntimeConfig,
        data: Arc<dyn CareDataSource>,
        biometric: Arc<dyn BiometricCapability>,
        recognizer: Arc<dyn SpeechRecognizer>,
        reader: Arc<dyn SpeechSynthesizer>,
        capture: Arc<dyn DocumentCapture>,
    ) -> Self {
        let nav = NavigationController::new(data);
        let screen = nav.screen();
        Self {
            nav,
            config,
            biometric,
            recognizer,
            reader,
            capture,
            screen,
            view: ViewState::default(),
            voice: None,
            toast: None,
            reading: false,
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        if let Err(err) = &result {
            tracing::error!("TUI loop failed: {err}");
        }
        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.tick();

            terminal.draw(|f| self.render(f))?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Housekeeping between frames: screen changes, background tasks, toasts.
    fn tick(&mut self) {
        self.sync_screen();
        self.poll_biometric();
        if let Some(voice) = self.voice.as_mut() {
            voice.poll();
        }

        let notice = match self.nav.session_mut() {
            Some(DashboardSession::Patient(s)) => s.take_notice(),
            Some(DashboardSession::Doctor(s)) => s.take_notice(),
            None => None,
        };
        if let Some(notice) = notice {
            self.notify(notice);
        }

        if self
            .toast
            .as_ref()
            .is_some_and(|(_, raised)| raised.elapsed() >= TOAST_TTL)
        {
            self.toast = None;
        }
    }

    /// Reset screen-local state when the resolved screen changes.
    ///
    /// Dropping the old view state drops its auth screen, which cancels a
    /// biometric check still in flight.
    fn sync_screen(&mut self) {
        let screen = self.nav.screen();
        if screen == self.screen {
            return;
        }
        tracing::debug!(?screen, "Screen changed");
        self.screen = screen;
        self.view = ViewState::default();
        self.voice = None;
        if self.reading {
            self.reader.stop();
            self.reading = false;
        }

        match screen {
            ScreenId::LanguageSelection => {
                self.view.cursor = Language::SUPPORTED
                    .iter()
                    .position(|l| *l == self.config.language)
                    .unwrap_or(0);
            }
            ScreenId::PatientAuth | ScreenId::DoctorAuth => {
                if let Some(role) = self.nav.role() {
                    self.view.auth = Some(AuthScreen::new(
                        role,
                        Arc::clone(&self.biometric),
                        self.config.biometric_delay,
                    ));
                }
            }
            _ => {}
        }
    }

    fn poll_biometric(&mut self) {
        let outcome = self.view.auth.as_mut().and_then(|auth| auth.biometric.poll());
        match outcome {
            Some(BiometricOutcome::Success) => self.navigate(NavigationController::complete_login),
            Some(BiometricOutcome::Fallback(_)) => {
                if let Some(auth) = self.view.auth.as_mut() {
                    auth.form.toggle_biometric();
                }
            }
            None => {}
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.toast = Some((notice, Instant::now()));
    }

    /// Run a navigation step, surfacing a refusal as a toast.
    fn navigate(&mut self, step: impl FnOnce(&mut NavigationController) -> Result<(), NavigationError>) {
        if let Err(err) = step(&mut self.nav) {
            tracing::warn!("Navigation refused: {err}");
            self.notify(Notice {
                kind: NoticeKind::Error,
                title: "Navigation".to_string(),
                body: err.to_string(),
            });
        }
    }

    fn go_back(&mut self) {
        if let Err(err) = self.nav.back() {
            // Dashboard refusals already raised a session notice.
            tracing::debug!("Back refused: {err}");
        }
    }

    fn listen(&mut self, context: ListenContext) {
        self.voice = Some(VoiceOverlay::listen(
            context,
            Arc::clone(&self.recognizer),
            self.config.speech_delay,
        ));
    }

    // --- input ---

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global: Ctrl+Q quits from anywhere
        if ctrl && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.voice.is_some() {
            self.handle_voice_key(key);
            return;
        }

        match self.screen {
            ScreenId::Home => self.handle_home_key(key),
            ScreenId::RoleSelection => self.handle_role_key(key),
            ScreenId::LanguageSelection => self.handle_language_key(key),
            ScreenId::PatientAuth | ScreenId::DoctorAuth => self.handle_auth_key(key),
            ScreenId::Patient(_) | ScreenId::Doctor(_) => self.handle_dashboard_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Char('s') => {
                self.navigate(NavigationController::start);
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_role_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Left => self.view.cursor_up(),
            KeyCode::Down | KeyCode::Right => self.view.cursor_down(ROLES.len()),
            KeyCode::Enter => {
                let role = ROLES[self.view.clamped(ROLES.len())];
                self.navigate(|nav| nav.select_role(role));
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    fn handle_language_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.view.cursor_up(),
            KeyCode::Down => self.view.cursor_down(Language::SUPPORTED.len()),
            KeyCode::Enter => {
                let language = Language::SUPPORTED[self.view.clamped(Language::SUPPORTED.len())];
                self.navigate(|nav| nav.select_language(language));
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return self.go_back(),
            KeyCode::Char('d') if ctrl => return self.listen(ListenContext::Dictation),
            _ => {}
        }

        let Some(auth) = self.view.auth.as_mut() else {
            return;
        };
        let mut login = false;
        match key.code {
            KeyCode::Char('n') if ctrl => auth.form.toggle_mode(),
            KeyCode::Char('b') if ctrl => {
                auth.biometric.cancel();
                auth.form.toggle_biometric();
            }
            KeyCode::Tab | KeyCode::Down => auth.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => auth.form.focus_prev(),
            KeyCode::Backspace => auth.form.backspace(),
            KeyCode::Enter => {
                if auth.form.submit().is_ok() {
                    if auth.form.is_biometric() {
                        match auth.biometric.begin(auth.form.credentials()) {
                            Ok(BiometricState::Fallback(_)) => auth.form.toggle_biometric(),
                            Ok(_) => {}
                            Err(err) => tracing::debug!("Biometric login refused: {err}"),
                        }
                    } else {
                        login = true;
                    }
                }
            }
            KeyCode::Char(c) if !ctrl => auth.form.input(c),
            _ => {}
        }

        if login {
            self.navigate(NavigationController::complete_login);
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        let typing = self
            .nav
            .session()
            .is_some_and(|s| input::is_typing(s, &self.view));

        if !typing && self.handle_common_key(key) {
            return;
        }

        let capture = self.capture.as_ref();
        let effect = match self.nav.session_mut() {
            Some(DashboardSession::Patient(s)) => input::patient_key(s, &mut self.view, key, capture),
            Some(DashboardSession::Doctor(s)) => input::doctor_key(s, &mut self.view, key, capture),
            None => Effect::Nothing,
        };

        match effect {
            Effect::Nothing => {}
            Effect::Notify(notice) => self.notify(notice),
            Effect::Logout => self.nav.logout(),
            Effect::Listen(context) => self.listen(context),
        }
    }

    /// Keys shared by both dashboards outside of text fields.
    ///
    /// # Returns
    /// `true` when the key was consumed.
    fn handle_common_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('v') => self.listen(ListenContext::Assistant),
            KeyCode::Char('g') => self.listen(ListenContext::Navigator),
            KeyCode::Char('!') => match self.nav.session_mut() {
                Some(DashboardSession::Patient(s)) => s.sos(),
                Some(DashboardSession::Doctor(s)) => s.sos(),
                None => {}
            },
            KeyCode::Char('r') => self.toggle_read_aloud(),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                let Some(tab) = Tab::ALL.get(index).copied() else {
                    return false;
                };
                let _ = match self.nav.session_mut() {
                    Some(DashboardSession::Patient(s)) => s.select_tab(tab),
                    Some(DashboardSession::Doctor(s)) => s.select_tab(tab),
                    None => Ok(()),
                };
            }
            KeyCode::Esc => self.go_back(),
            _ => return false,
        }
        true
    }

    fn toggle_read_aloud(&mut self) {
        if self.reading {
            self.reader.stop();
            self.reading = false;
        } else {
            self.reader.speak(registry::spec(self.screen).title);
            self.reading = true;
        }
    }

    fn handle_voice_key(&mut self, key: KeyEvent) {
        let Some(overlay) = self.voice.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.voice = None,
            KeyCode::Char(' ') => overlay.restart(),
            KeyCode::Enter => {
                let Some(text) = overlay.transcript().map(str::to_string) else {
                    return;
                };
                let context = overlay.context();
                self.voice = None;
                self.apply_transcript(context, &text);
            }
            _ => {}
        }
    }

    fn apply_transcript(&mut self, context: ListenContext, text: &str) {
        let navigate = match context {
            ListenContext::Navigator => true,
            ListenContext::Assistant => is_navigation_command(text),
            ListenContext::Dictation => false,
        };
        if navigate {
            self.route_voice(text);
        } else if !self.dictate(text) {
            self.notify(Notice::info("Voice Input", format!("\"{text}\"")));
        }
    }

    /// Classify a spoken command and hand it to the dashboard.
    fn route_voice(&mut self, text: &str) {
        let Some(intent) = classify(text) else {
            tracing::debug!("Voice command not recognized");
            self.notify(Notice::info("Command not recognized", format!("\"{text}\"")));
            return;
        };
        let applied = match self.nav.session_mut() {
            Some(DashboardSession::Patient(s)) => s.apply_voice(intent),
            Some(DashboardSession::Doctor(s)) => s.apply_voice(intent),
            None => Ok(false),
        };
        if applied == Ok(false) {
            self.notify(Notice::info(
                "Not available here",
                format!("\"{text}\" has no screen for this role"),
            ));
        }
    }

    fn dictate(&mut self, text: &str) -> bool {
        if let Some(auth) = self.view.auth.as_mut() {
            auth.form.input_str(text);
            return true;
        }
        match self.nav.session_mut() {
            Some(session) => input::dictate(session, &mut self.view, text),
            None => false,
        }
    }

    // --- rendering ---

    fn render(&self, f: &mut Frame) {
        let session = self.nav.session();
        let show_tabs = match session {
            Some(DashboardSession::Patient(s)) => !s.nav().in_call(),
            Some(DashboardSession::Doctor(s)) => !s.nav().in_call(),
            None => false,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(if show_tabs { 2 } else { 0 }),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(f.area());
        let content = chunks[1];

        let subtitle = match self.nav.role() {
            Some(role) => format!("{role} · {}", self.nav.language().name),
            None => "Healthcare portal".to_string(),
        };
        render_header(f, chunks[0], registry::spec(self.screen).title, &subtitle);

        let language = self.nav.language();
        match (self.screen, session) {
            (ScreenId::Home, _) => render_home(f, content),
            (ScreenId::RoleSelection, _) => {
                render_roles(f, content, self.view.clamped(ROLES.len()));
            }
            (ScreenId::LanguageSelection, _) => {
                render_languages(f, content, self.view.clamped(Language::SUPPORTED.len()));
            }
            (ScreenId::PatientAuth | ScreenId::DoctorAuth, _) => {
                if let Some(auth) = &self.view.auth {
                    render_auth(f, content, auth);
                }
            }
            (_, Some(DashboardSession::Patient(s))) => {
                let missing = registry::missing_params(self.screen, s.nav().selection(), s.last_order());
                match missing.first() {
                    Some(param) => render_empty(f, content, missing_message(*param)),
                    None => render_patient(f, content, s, &self.view, language),
                }
                if show_tabs {
                    render_tabs(f, chunks[2], s.nav().tab());
                }
            }
            (_, Some(DashboardSession::Doctor(s))) => {
                let missing = registry::missing_params(self.screen, s.nav().selection(), None);
                match missing.first() {
                    Some(param) => render_empty(f, content, missing_message(*param)),
                    None => render_doctor(f, content, s, &self.view, language),
                }
                if show_tabs {
                    render_tabs(f, chunks[2], s.nav().tab());
                }
            }
            (_, None) => render_empty(f, content, "Please log in first"),
        }

        render_footer(f, chunks[3], &self.hints());
        render_disclaimer(f, chunks[4]);

        if let Some((notice, _)) = &self.toast {
            render_notice(f, content, notice);
        }
        if let Some(voice) = &self.voice {
            render_voice(f, f.area(), voice);
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match self.screen {
            ScreenId::Home => vec![("Enter", "Login"), ("S", "Sign Up"), ("Q", "Quit")],
            ScreenId::RoleSelection | ScreenId::LanguageSelection => {
                vec![("↑↓", "Move"), ("Enter", "Select"), ("Esc", "Back")]
            }
            ScreenId::PatientAuth => vec![
                ("Enter", "Submit"),
                ("Tab", "Next field"),
                ("Ctrl+N", "Login/Sign up"),
                ("Ctrl+B", "Biometric"),
                ("Ctrl+D", "Dictate"),
                ("Esc", "Back"),
            ],
            ScreenId::DoctorAuth => vec![
                ("Enter", "Submit"),
                ("Tab", "Next field"),
                ("Ctrl+N", "Login/Sign up"),
                ("Ctrl+D", "Dictate"),
                ("Esc", "Back"),
            ],
            ScreenId::Patient(_) | ScreenId::Doctor(_) => {
                let typing = self
                    .nav
                    .session()
                    .is_some_and(|s| input::is_typing(s, &self.view));
                if typing {
                    vec![("Enter", "Submit"), ("Tab", "Next field"), ("Ctrl+D", "Dictate"), ("Esc", "Back")]
                } else {
                    vec![
                        ("1-4", "Tabs"),
                        ("V", "Voice"),
                        ("G", "Go to"),
                        ("R", "Read aloud"),
                        ("!", "SOS"),
                        ("Esc", "Back"),
                        ("Ctrl+Q", "Quit"),
                    ]
                }
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_message(param: Param) -> &'static str {
    match param {
        Param::AppointmentId => "Select an appointment first",
        Param::ReportId => "Select a report first",
        Param::PatientId => "Select a patient first",
        Param::MedicineId => "Select a medicine first",
        Param::Order => "No order has been placed yet",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockBiometric;
    use crate::domain::{AppState, PatientView, Role};

    fn app(success_rate: f64) -> App {
        let config = RuntimeConfig {
            biometric_delay: Duration::from_millis(5),
            speech_delay: Duration::from_millis(5),
            ..RuntimeConfig::default()
        };
        App::with_dependencies(
            config,
            Arc::new(StaticDataSource::new()),
            Arc::new(MockBiometric::with_seed(success_rate, [3u8; 32])),
            Arc::new(CannedSpeech::with_seed([5u8; 32])),
            Arc::new(LoggingSynthesizer::new()),
            Arc::new(LocalFileCapture::new()),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        app.tick();
    }

    fn press_ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
        app.tick();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn to_auth(app: &mut App, role: Role) {
        press(app, KeyCode::Enter);
        if role == Role::Doctor {
            press(app, KeyCode::Down);
        }
        press(app, KeyCode::Enter);
        press(app, KeyCode::Enter);
    }

    fn wait_until(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..500 {
            app.tick();
            if done(app) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("condition not reached");
    }

    #[test]
    fn test_password_login_reaches_dashboard() {
        let mut app = app(1.0);
        to_auth(&mut app, Role::Patient);
        assert_eq!(app.screen, ScreenId::PatientAuth);

        type_text(&mut app, "ana@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.nav.state(), AppState::PatientDashboard);
        assert_eq!(app.screen, ScreenId::Patient(PatientView::Dashboard));
        assert!(app.view.auth.is_none());
    }

    #[test]
    fn test_empty_login_stays_on_auth() {
        let mut app = app(1.0);
        to_auth(&mut app, Role::Doctor);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.nav.state(), AppState::DoctorAuth);
        let auth = app.view.auth.as_ref().expect("auth screen");
        assert!(auth.form.error().is_some());
    }

    #[test]
    fn test_biometric_login_succeeds() {
        let mut app = app(1.0);
        to_auth(&mut app, Role::Patient);
        press_ctrl(&mut app, 'b');
        type_text(&mut app, "Ana");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "5550100");
        press(&mut app, KeyCode::Enter);

        wait_until(&mut app, |a| a.nav.state() == AppState::PatientDashboard);
    }

    #[test]
    fn test_biometric_failure_falls_back_to_password() {
        let mut app = app(0.0);
        to_auth(&mut app, Role::Patient);
        press_ctrl(&mut app, 'b');
        type_text(&mut app, "Ana");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "5550100");
        press(&mut app, KeyCode::Enter);

        wait_until(&mut app, |a| {
            a.view
                .auth
                .as_ref()
                .is_some_and(|auth| !auth.form.is_biometric())
        });
        assert_eq!(app.nav.state(), AppState::PatientAuth);
    }

    #[test]
    fn test_back_from_auth_drops_form() {
        let mut app = app(1.0);
        to_auth(&mut app, Role::Patient);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, ScreenId::LanguageSelection);
        assert!(app.view.auth.is_none());
    }

    #[test]
    fn test_profile_tab_logout() {
        let mut app = app(1.0);
        to_auth(&mut app, Role::Patient);
        type_text(&mut app, "ana@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.nav.state(), AppState::Home);
        assert!(app.nav.session().is_none());
    }

    #[test]
    fn test_unknown_voice_command_raises_toast() {
        let mut app = app(1.0);
        to_auth(&mut app, Role::Doctor);
        type_text(&mut app, "dr@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.nav.state(), AppState::DoctorDashboard);

        app.route_voice("sing me a song");
        let (notice, _) = app.toast.as_ref().expect("toast");
        assert_eq!(notice.title, "Command not recognized");
    }
}
