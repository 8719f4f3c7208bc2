//! Care-themed color palette and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::application::NoticeKind;
use crate::domain::{
    AppointmentStatus, DoctorAppointmentStatus, PatientStatus, ReportStatus, ResultFlag,
};

/// Portal color palette.
pub struct CareTheme;

impl CareTheme {
    // === Primary Colors ===

    /// Deep teal
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488

    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    pub const PRIMARY_DARK: Color = Color::Rgb(15, 118, 110); // #0F766E

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    // === Background / Text ===

    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A

    pub const BG_SURFACE: Color = Color::Rgb(30, 41, 59); // #1E293B

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Highlighted row or card under the cursor
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Active bottom-nav tab
    #[must_use]
    pub fn tab_active() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn overlay() -> Style {
        Style::default().bg(Self::BG_SURFACE)
    }

    #[must_use]
    pub fn notice(kind: NoticeKind) -> Style {
        match kind {
            NoticeKind::Info => Self::info(),
            NoticeKind::Error => Self::warning(),
            NoticeKind::Emergency => Self::danger().add_modifier(Modifier::BOLD),
        }
    }

    #[must_use]
    pub fn appointment_status(status: AppointmentStatus) -> Style {
        match status {
            AppointmentStatus::Upcoming => Self::info(),
            AppointmentStatus::Completed => Self::success(),
            AppointmentStatus::Cancelled => Self::danger(),
        }
    }

    #[must_use]
    pub fn request_status(status: DoctorAppointmentStatus) -> Style {
        match status {
            DoctorAppointmentStatus::Pending => Self::warning(),
            DoctorAppointmentStatus::Accepted => Self::info(),
            DoctorAppointmentStatus::Completed => Self::success(),
            DoctorAppointmentStatus::Cancelled => Self::danger(),
        }
    }

    #[must_use]
    pub fn patient_status(status: PatientStatus) -> Style {
        match status {
            PatientStatus::Active => Self::success(),
            PatientStatus::Inactive => Self::text_muted(),
            PatientStatus::Critical => Self::danger(),
        }
    }

    #[must_use]
    pub fn report_status(status: ReportStatus) -> Style {
        match status {
            ReportStatus::New => Self::info(),
            ReportStatus::Viewed => Self::text_muted(),
        }
    }

    #[must_use]
    pub fn result_flag(flag: ResultFlag) -> Style {
        match flag {
            ResultFlag::Normal => Self::success(),
            ResultFlag::High => Self::danger(),
            ResultFlag::Low => Self::warning(),
        }
    }
}

/// ASCII art logo for the home screen
pub const LOGO: &str = r#"
 ╔═╗┌─┐┬─┐┌─┐╔═╗┬  ┌─┐┬ ┬
 ║  ├─┤├┬┘├┤ ╠╣ │  │ ││││
 ╚═╝┴ ┴┴└─└─┘╚  ┴─┘└─┘└┴┘
"#;
