//! Login and sign-up form data.
//!
//! No credential is checked, hashed or stored anywhere. The forms only gate
//! on required fields. Secret buffers are wiped when cleared or dropped.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::Role;

/// Inline validation failure shown under a form. Never changes navigation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please enter both name and phone number")]
    MissingIdentity,
}

/// Whether the auth screen is in login or sign-up mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    SignUp,
}

/// Field identifiers, in tab order, for each mode and role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Name,
    Phone,
    Email,
    Password,
    ConfirmPassword,
    License,
}

impl CredentialField {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
            Self::License => "License Number",
        }
    }

    #[must_use]
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

/// Credentials form for either role.
#[derive(Debug, Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub license: String,
}

impl Credentials {
    /// Fields shown for a role in a given mode.
    #[must_use]
    pub fn fields(role: Role, mode: AuthMode) -> &'static [CredentialField] {
        use CredentialField as F;
        match (role, mode) {
            (_, AuthMode::Login) => &[F::Email, F::Password],
            (Role::Patient, AuthMode::SignUp) => {
                &[F::Name, F::Phone, F::Email, F::Password, F::ConfirmPassword]
            }
            (Role::Doctor, AuthMode::SignUp) => &[F::Name, F::License, F::Email, F::Password],
        }
    }

    #[must_use]
    pub fn get(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::Name => &self.name,
            CredentialField::Phone => &self.phone,
            CredentialField::Email => &self.email,
            CredentialField::Password => &self.password,
            CredentialField::ConfirmPassword => &self.confirm_password,
            CredentialField::License => &self.license,
        }
    }

    pub fn get_mut(&mut self, field: CredentialField) -> &mut String {
        match field {
            CredentialField::Name => &mut self.name,
            CredentialField::Phone => &mut self.phone,
            CredentialField::Email => &mut self.email,
            CredentialField::Password => &mut self.password,
            CredentialField::ConfirmPassword => &mut self.confirm_password,
            CredentialField::License => &mut self.license,
        }
    }

    /// Check required fields for the role and mode.
    ///
    /// # Errors
    /// Returns the inline message to show.
    pub fn validate(&self, role: Role, mode: AuthMode) -> Result<(), ValidationError> {
        let missing = Self::fields(role, mode)
            .iter()
            .any(|f| self.get(*f).trim().is_empty());
        if missing {
            return Err(ValidationError::MissingFields);
        }

        if role == Role::Patient && mode == AuthMode::SignUp && self.password != self.confirm_password
        {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(())
    }

    /// Name and phone are what the biometric login asks for.
    ///
    /// # Errors
    /// Returns `MissingIdentity` if either is blank.
    pub fn validate_identity(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() || self.phone.trim().is_empty() {
            return Err(ValidationError::MissingIdentity);
        }
        Ok(())
    }

    /// Wipe every buffer.
    pub fn clear(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_email_and_password() {
        let mut c = Credentials::default();
        assert_eq!(
            c.validate(Role::Doctor, AuthMode::Login),
            Err(ValidationError::MissingFields)
        );

        c.email = "dr@clinic.test".to_string();
        c.password = "secret".to_string();
        assert!(c.validate(Role::Doctor, AuthMode::Login).is_ok());
        assert!(c.validate(Role::Patient, AuthMode::Login).is_ok());
    }

    #[test]
    fn test_patient_signup_password_mismatch() {
        // Struct update syntax is unavailable on a Drop type.
        let mut c = Credentials::default();
        c.name = "Jane".to_string();
        c.phone = "5551234".to_string();
        c.email = "jane@example.test".to_string();
        c.password = "one".to_string();
        c.confirm_password = "two".to_string();
        assert_eq!(
            c.validate(Role::Patient, AuthMode::SignUp),
            Err(ValidationError::PasswordMismatch)
        );

        c.confirm_password = "one".to_string();
        assert!(c.validate(Role::Patient, AuthMode::SignUp).is_ok());
    }

    #[test]
    fn test_doctor_signup_needs_license() {
        let mut c = Credentials::default();
        c.name = "Dr. Who".to_string();
        c.email = "who@clinic.test".to_string();
        c.password = "pw".to_string();
        assert_eq!(
            c.validate(Role::Doctor, AuthMode::SignUp),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_clear_wipes_fields() {
        let mut c = Credentials::default();
        c.email = "a@b.test".to_string();
        c.password = "pw".to_string();
        c.clear();
        assert!(c.email.is_empty());
        assert!(c.password.is_empty());
    }
}
