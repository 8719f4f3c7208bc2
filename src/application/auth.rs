//! Authentication flows: the credentials form and biometric login.
//!
//! Neither flow verifies anything against a backend. The form gates on
//! required fields; the biometric flow asks the platform capability and
//! falls back to manual entry on any failure.

use std::sync::Arc;
use std::time::Duration;

use crate::application::task::{PendingTask, TaskPoll};
use crate::domain::{AuthMode, CredentialField, Credentials, Role, ValidationError};
use crate::ports::{BiometricCapability, BiometricError, BiometryKind};

/// Prompt shown while the sensor is waiting.
pub const BIOMETRIC_REASON: &str = "Place your thumb on the scanner";

/// Name shown for the platform's sensor.
#[must_use]
pub fn biometry_name(kind: Option<BiometryKind>) -> &'static str {
    kind.map_or(BiometryKind::Multiple.display_name(), BiometryKind::display_name)
}

const IDENTITY_FIELDS: &[CredentialField] = &[CredentialField::Name, CredentialField::Phone];

/// State of an auth screen's form.
#[derive(Debug)]
pub struct LoginForm {
    role: Role,
    mode: AuthMode,
    biometric: bool,
    credentials: Credentials,
    focus: usize,
    error: Option<ValidationError>,
}

impl LoginForm {
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            mode: AuthMode::Login,
            biometric: false,
            credentials: Credentials::default(),
            focus: 0,
            error: None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub fn is_biometric(&self) -> bool {
        self.biometric
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Fields currently on screen, in focus order.
    #[must_use]
    pub fn fields(&self) -> &'static [CredentialField] {
        if self.biometric {
            IDENTITY_FIELDS
        } else {
            Credentials::fields(self.role, self.mode)
        }
    }

    #[must_use]
    pub fn focused(&self) -> Option<CredentialField> {
        self.fields().get(self.focus).copied()
    }

    /// Switch between login and sign-up. Every field is cleared.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::Login,
        };
        self.reset();
    }

    /// Switch between password and biometric login. Patients only.
    pub fn toggle_biometric(&mut self) {
        if self.role == Role::Patient {
            self.biometric = !self.biometric;
            self.mode = AuthMode::Login;
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.credentials.clear();
        self.focus = 0;
        self.error = None;
    }

    pub fn focus_next(&mut self) {
        let len = self.fields().len();
        if len > 0 {
            self.focus = (self.focus + 1) % len;
        }
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields().len();
        if len > 0 {
            self.focus = (self.focus + len - 1) % len;
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(field) = self.focused() {
            self.credentials.get_mut(field).push(c);
            self.error = None;
        }
    }

    /// Type a whole string into the focused field (dictation).
    pub fn input_str(&mut self, text: &str) {
        text.chars().for_each(|c| self.input(c));
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused() {
            self.credentials.get_mut(field).pop();
        }
    }

    /// Validate the form. The error is kept for inline display.
    ///
    /// # Errors
    /// The validation message; nothing else changes.
    pub fn submit(&mut self) -> Result<(), ValidationError> {
        let result = if self.biometric {
            self.credentials.validate_identity()
        } else {
            self.credentials.validate(self.role, self.mode)
        };
        if let Err(err) = &result {
            tracing::debug!(role = %self.role, "Login form rejected: {err}");
        }
        self.error = result.as_ref().err().cloned();
        result
    }
}

/// Where a biometric attempt stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BiometricState {
    Idle,
    Scanning,
    Succeeded,
    /// Manual entry is offered with this reason.
    Fallback(String),
}

/// Resolved biometric attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BiometricOutcome {
    Success,
    Fallback(String),
}

/// Biometric login bound to the auth screen that started it.
///
/// Dropping it cancels any verification still in flight.
pub struct BiometricLogin {
    capability: Arc<dyn BiometricCapability>,
    delay: Duration,
    task: Option<PendingTask<Result<(), BiometricError>>>,
    state: BiometricState,
}

impl BiometricLogin {
    #[must_use]
    pub fn new(capability: Arc<dyn BiometricCapability>, delay: Duration) -> Self {
        Self {
            capability,
            delay,
            task: None,
            state: BiometricState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &BiometricState {
        &self.state
    }

    /// Name of the sensor for the prompt.
    #[must_use]
    pub fn sensor_name(&self) -> &'static str {
        biometry_name(self.capability.is_available().kind)
    }

    /// Start a verification for the given identity.
    ///
    /// # Errors
    /// `MissingIdentity` when name or phone is blank; nothing starts.
    pub fn begin(&mut self, identity: &Credentials) -> Result<&BiometricState, ValidationError> {
        identity.validate_identity()?;
        self.cancel();

        let availability = self.capability.is_available();
        if !availability.available {
            tracing::info!("Biometric sensor not available, falling back to manual login");
            self.state = BiometricState::Fallback(BiometricError::not_available().message);
            return Ok(&self.state);
        }

        let capability = Arc::clone(&self.capability);
        self.task = Some(PendingTask::spawn(self.delay, move || {
            capability.verify_identity(BIOMETRIC_REASON)
        }));
        self.state = BiometricState::Scanning;
        tracing::debug!("Biometric verification started");
        Ok(&self.state)
    }

    /// Poll the in-flight verification.
    ///
    /// # Returns
    /// The outcome once, when it resolves.
    pub fn poll(&mut self) -> Option<BiometricOutcome> {
        let task = self.task.as_mut()?;
        let outcome = match task.try_recv() {
            TaskPoll::Pending => return None,
            TaskPoll::Ready(Ok(())) => BiometricOutcome::Success,
            TaskPoll::Ready(Err(err)) => BiometricOutcome::Fallback(err.message),
            TaskPoll::Closed => BiometricOutcome::Fallback("Biometric authentication failed".to_string()),
        };
        self.task = None;
        self.state = match &outcome {
            BiometricOutcome::Success => {
                tracing::info!("Biometric authentication successful");
                BiometricState::Succeeded
            }
            BiometricOutcome::Fallback(reason) => {
                tracing::info!("Biometric authentication fell back to manual login: {reason}");
                BiometricState::Fallback(reason.clone())
            }
        };
        Some(outcome)
    }

    /// Abandon the attempt. A cancelled attempt never resolves.
    pub fn cancel(&mut self) {
        if let Some(mut task) = self.task.take() {
            task.cancel();
            tracing::debug!("Biometric verification cancelled");
        }
        self.state = BiometricState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockBiometric, UnavailableBiometric};

    fn identity() -> Credentials {
        let mut c = Credentials::default();
        c.name = "Sabrina".to_string();
        c.phone = "5551234567".to_string();
        c
    }

    fn wait(login: &mut BiometricLogin) -> BiometricOutcome {
        for _ in 0..500 {
            if let Some(outcome) = login.poll() {
                return outcome;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("biometric verification did not resolve");
    }

    #[test]
    fn test_form_requires_fields() {
        let mut form = LoginForm::new(Role::Doctor);
        assert_eq!(form.submit(), Err(ValidationError::MissingFields));
        assert_eq!(form.error(), Some(&ValidationError::MissingFields));

        form.input_str("dr@clinic.test");
        form.focus_next();
        form.input_str("pw");
        assert!(form.submit().is_ok());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_toggle_mode_clears_fields() {
        let mut form = LoginForm::new(Role::Patient);
        form.input_str("a@b.io");
        form.toggle_mode();
        assert_eq!(form.mode(), AuthMode::SignUp);
        assert!(form.credentials().email.is_empty());
        assert_eq!(form.focused(), Some(CredentialField::Name));
    }

    #[test]
    fn test_doctor_has_no_biometric_mode() {
        let mut form = LoginForm::new(Role::Doctor);
        form.toggle_biometric();
        assert!(!form.is_biometric());
    }

    #[test]
    fn test_biometric_requires_identity() {
        let mut login = BiometricLogin::new(Arc::new(MockBiometric::new()), Duration::ZERO);
        assert_eq!(
            login.begin(&Credentials::default()).err(),
            Some(ValidationError::MissingIdentity)
        );
        assert_eq!(login.state(), &BiometricState::Idle);

        let mut form = LoginForm::new(Role::Patient);
        form.toggle_biometric();
        form.input_str("Ana");
        assert_eq!(form.submit(), Err(ValidationError::MissingIdentity));
        assert_eq!(
            login.begin(form.credentials()).err(),
            Some(ValidationError::MissingIdentity)
        );
        assert_eq!(login.state(), &BiometricState::Idle);
    }

    #[test]
    fn test_unavailable_sensor_falls_back_immediately() {
        let mut login = BiometricLogin::new(Arc::new(UnavailableBiometric), Duration::from_secs(60));
        let state = login.begin(&identity()).expect("begin").clone();
        assert!(matches!(state, BiometricState::Fallback(_)));
        assert_eq!(login.poll(), None);
    }

    #[test]
    fn test_successful_verification() {
        let sensor = MockBiometric::with_seed(1.0, [0u8; 32]);
        let mut login = BiometricLogin::new(Arc::new(sensor), Duration::from_millis(5));
        login.begin(&identity()).expect("begin");
        assert_eq!(login.state(), &BiometricState::Scanning);
        assert_eq!(wait(&mut login), BiometricOutcome::Success);
        assert_eq!(login.state(), &BiometricState::Succeeded);
    }

    #[test]
    fn test_failed_verification_offers_fallback() {
        let sensor = MockBiometric::with_seed(0.0, [0u8; 32]);
        let mut login = BiometricLogin::new(Arc::new(sensor), Duration::from_millis(5));
        login.begin(&identity()).expect("begin");
        assert_eq!(
            wait(&mut login),
            BiometricOutcome::Fallback("Biometric authentication failed".to_string())
        );
    }

    #[test]
    fn test_cancelled_login_never_resolves() {
        let sensor = MockBiometric::with_seed(1.0, [0u8; 32]);
        let mut login = BiometricLogin::new(Arc::new(sensor), Duration::from_millis(30));
        login.begin(&identity()).expect("begin");
        login.cancel();
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(login.poll(), None);
        assert_eq!(login.state(), &BiometricState::Idle);
    }

    #[test]
    fn test_biometry_names() {
        assert_eq!(biometry_name(Some(BiometryKind::FaceId)), "Face ID");
        assert_eq!(biometry_name(None), "Biometric Authentication");
    }
}
