//! Pre-login screens: home, role and language selection, and the auth form.

use std::sync::Arc;
use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::application::auth::BIOMETRIC_REASON;
use crate::application::{BiometricLogin, BiometricState, LoginForm};
use crate::domain::{AuthMode, Language, Role};
use crate::ports::BiometricCapability;
use crate::tui::styles::{CareTheme, LOGO};
use crate::tui::ui::{panel, render_input, row, rows};

/// Roles in the order the selection cards show them.
pub const ROLES: [Role; 2] = [Role::Patient, Role::Doctor];

/// State of an auth screen. Dropping it abandons any biometric check.
pub struct AuthScreen {
    pub form: LoginForm,
    pub biometric: BiometricLogin,
}

impl AuthScreen {
    #[must_use]
    pub fn new(role: Role, capability: Arc<dyn BiometricCapability>, delay: Duration) -> Self {
        Self {
            form: LoginForm::new(role),
            biometric: BiometricLogin::new(capability, delay),
        }
    }
}

pub fn render_home(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), CareTheme::subtitle())))
        .collect();
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "Your health, connected.",
            CareTheme::title(),
        )),
        Line::from(Span::styled(
            "Appointments, video consultations, reports and pharmacy in one place.",
            CareTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", CareTheme::key_hint()),
            Span::styled("Login    ", CareTheme::key_desc()),
            Span::styled("[S] ", CareTheme::key_hint()),
            Span::styled("Sign Up", CareTheme::key_desc()),
        ]),
    ]);

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel("Welcome"));
    f.render_widget(p, area);
}

pub fn render_roles(f: &mut Frame, area: Rect, cursor: usize) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    for (i, role) in ROLES.iter().enumerate() {
        let focused = i == cursor;
        let name = match role {
            Role::Patient => "I'm a Patient",
            Role::Doctor => "I'm a Doctor",
        };
        let block = panel(name).border_style(if focused {
            CareTheme::border_focused()
        } else {
            CareTheme::border()
        });
        let card = Paragraph::new(vec![
            Line::from(""),
            row(focused, vec![Span::styled(name.to_string(), CareTheme::title())]),
            Line::from(""),
            Line::from(Span::styled(role.tagline().to_string(), CareTheme::text_secondary())),
        ])
        .block(block);
        f.render_widget(card, columns[i]);
    }
}

pub fn render_languages(f: &mut Frame, area: Rect, cursor: usize) {
    let lines: Vec<Line> = Language::SUPPORTED
        .iter()
        .enumerate()
        .map(|(i, lang)| {
            row(
                i == cursor,
                vec![
                    Span::styled(format!("{:<10}", lang.name), CareTheme::text()),
                    Span::styled(lang.native.to_string(), CareTheme::text_secondary()),
                ],
            )
        })
        .collect();

    let p = Paragraph::new(lines).block(panel("Choose your preferred language"));
    f.render_widget(p, area);
}

pub fn render_auth(f: &mut Frame, area: Rect, screen: &AuthScreen) {
    let form = &screen.form;
    let fields = form.fields();

    let mut heights = vec![2];
    heights.extend(std::iter::repeat(3).take(fields.len()));
    heights.push(3);
    let chunks = rows(area, &heights);

    let mode = match (form.is_biometric(), form.mode()) {
        (true, _) => format!("Biometric login with {}", screen.biometric.sensor_name()),
        (false, AuthMode::Login) => "Welcome back".to_string(),
        (false, AuthMode::SignUp) => "Create your account".to_string(),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(mode, CareTheme::subtitle()))),
        chunks[0],
    );

    let focused = form.focused();
    for (i, field) in fields.iter().enumerate() {
        render_input(
            f,
            chunks[i + 1],
            field.label(),
            form.credentials().get(*field),
            "",
            focused == Some(*field),
            field.is_secret(),
        );
    }

    let status = match (form.error(), screen.biometric.state()) {
        (Some(err), _) => Line::from(vec![
            Span::styled("! ", CareTheme::danger()),
            Span::styled(err.to_string(), CareTheme::danger()),
        ]),
        (None, BiometricState::Scanning) => Line::from(Span::styled(
            format!("{BIOMETRIC_REASON}..."),
            CareTheme::info(),
        )),
        (None, BiometricState::Succeeded) => {
            Line::from(Span::styled("Authentication successful", CareTheme::success()))
        }
        (None, BiometricState::Fallback(reason)) => Line::from(vec![
            Span::styled(format!("{reason}. "), CareTheme::warning()),
            Span::styled("Please use password login.", CareTheme::text_secondary()),
        ]),
        (None, BiometricState::Idle) => Line::from(""),
    };
    f.render_widget(Paragraph::new(status), chunks[fields.len() + 1]);
}
