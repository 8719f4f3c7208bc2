//! UI module: View components for the TUI.

pub mod doctor;
pub mod entry;
pub mod patient;
pub mod voice;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::{BookingForm, Notice};
use crate::domain::pharmacy::MIN_QUANTITY;
use crate::domain::Tab;
use crate::tui::styles::CareTheme;

pub use entry::AuthScreen;
pub use voice::VoiceOverlay;

/// What the keyboard is currently typing into, for list screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Search,
    FilePath,
}

/// Screen-local UI state. Replaced whenever the resolved screen changes, so
/// anything it owns (including a pending biometric check) goes with it.
pub struct ViewState {
    pub cursor: usize,
    pub field: usize,
    pub query: String,
    pub category: usize,
    pub input: Option<InputMode>,
    pub buffer: String,
    pub quantity: u32,
    pub booking: BookingForm,
    pub muted: bool,
    pub camera_off: bool,
    pub auth: Option<AuthScreen>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            cursor: 0,
            field: 0,
            query: String::new(),
            category: 0,
            input: None,
            buffer: String::new(),
            quantity: MIN_QUANTITY,
            booking: BookingForm::default(),
            muted: false,
            camera_off: false,
            auth: None,
        }
    }
}

impl ViewState {
    pub fn cursor_down(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1).min(len - 1);
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Keep the cursor inside a list that may have shrunk.
    #[must_use]
    pub fn clamped(&self, len: usize) -> usize {
        self.cursor.min(len.saturating_sub(1))
    }
}

pub fn render_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", CareTheme::text()),
        Span::styled("Careflow", CareTheme::subtitle()),
        Span::styled(" │ ", CareTheme::text_muted()),
        Span::styled(title.to_string(), CareTheme::title()),
        Span::styled(format!("  {subtitle}"), CareTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(CareTheme::border()),
    );

    f.render_widget(header, area);
}

/// Key hints as `[key] description` pairs.
pub fn render_footer(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, desc) in hints {
        spans.push(Span::styled(format!("[{key}] "), CareTheme::key_hint()));
        spans.push(Span::styled(format!("{desc}  "), CareTheme::key_desc()));
    }

    let footer = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(CareTheme::border()),
        );

    f.render_widget(footer, area);
}

/// Toast line drawn over the bottom of the content area.
pub fn render_notice(f: &mut Frame, area: Rect, notice: &Notice) {
    let height = 3.min(area.height);
    let slot = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(height),
        width: area.width,
        height,
    };
    let style = CareTheme::notice(notice.kind);
    let toast = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", notice.title), style),
        Span::styled(notice.body.clone(), CareTheme::text()),
    ]))
    .style(CareTheme::overlay())
    .block(Block::default().borders(Borders::ALL).border_style(style));

    f.render_widget(Clear, slot);
    f.render_widget(toast, slot);
}

/// Bottom navigation bar for the dashboards.
pub fn render_tabs(f: &mut Frame, area: Rect, active: Tab) {
    let mut spans = Vec::new();
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let style = if *tab == active {
            CareTheme::tab_active()
        } else {
            CareTheme::text_secondary()
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(CareTheme::border()),
    );
    f.render_widget(bar, area);
}

/// Bordered panel with a styled title.
#[must_use]
pub fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {title} "), CareTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(CareTheme::border())
}

/// A list row, highlighted when under the cursor.
#[must_use]
pub fn row(selected: bool, mut spans: Vec<Span<'static>>) -> Line<'static> {
    let marker = if selected {
        Span::styled("▶ ", CareTheme::selected())
    } else {
        Span::raw("  ")
    };
    spans.insert(0, marker);
    let line = Line::from(spans);
    if selected {
        line.style(CareTheme::focused())
    } else {
        line
    }
}

pub fn render_empty(f: &mut Frame, area: Rect, message: &str) {
    let p = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), CareTheme::text_muted())),
    ])
    .alignment(ratatui::layout::Alignment::Center)
    .block(panel(""));
    f.render_widget(p, area);
}

/// Single-line input box in the style of the login form.
pub fn render_input(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    hint: &str,
    focused: bool,
    secret: bool,
) {
    let (border_style, title_style) = if focused {
        (CareTheme::border_focused(), CareTheme::focused())
    } else {
        (CareTheme::border(), CareTheme::text_secondary())
    };

    let block = Block::default()
        .title(Span::styled(format!(" {label} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let shown = if value.is_empty() {
        Span::styled(hint.to_string(), CareTheme::text_muted())
    } else if secret {
        Span::styled("•".repeat(value.chars().count()), CareTheme::text())
    } else {
        Span::styled(value.to_string(), CareTheme::text())
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        shown,
        if focused {
            Span::styled("▌", CareTheme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(block);

    f.render_widget(content, area);
}

/// Search or file-path prompt shown above a list.
pub fn render_prompt(f: &mut Frame, area: Rect, state: &ViewState) {
    let (label, value, hint) = match state.input {
        Some(InputMode::FilePath) => ("File path", state.buffer.as_str(), "path to a document"),
        _ => ("Search", state.query.as_str(), "press / to search"),
    };
    render_input(f, area, label, value, hint, state.input.is_some(), false);
}

/// Stack of fixed-height rows followed by a filler.
#[must_use]
pub fn rows(area: Rect, heights: &[u16]) -> Vec<Rect> {
    let constraints: Vec<Constraint> = heights
        .iter()
        .map(|h| Constraint::Length(*h))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Rectangle centered in `area`, sized as a percentage of it.
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let p = Paragraph::new(Line::from(Span::styled(
        "Demo portal: no data leaves this machine. Calls, scans and orders are simulated.",
        CareTheme::text_muted(),
    )))
    .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut state = ViewState::default();
        state.cursor_up();
        assert_eq!(state.cursor, 0);
        for _ in 0..5 {
            state.cursor_down(3);
        }
        assert_eq!(state.cursor, 2);
        assert_eq!(state.clamped(1), 0);
        state.cursor_down(0);
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_default_quantity_is_minimum() {
        assert_eq!(ViewState::default().quantity, MIN_QUANTITY);
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 50, area);
        assert!(inner.width <= 50 && inner.height <= 20);
        assert!(inner.x >= 25 && inner.y >= 10);
    }
}
