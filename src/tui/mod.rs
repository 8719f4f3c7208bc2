//! TUI module: Terminal User Interface using Ratatui.
//!
//! Renders whatever screen the navigation controller resolves to:
//! - Home, role and language selection
//! - Patient and doctor login (password or biometric)
//! - Both dashboards with their nested views
//! - Voice overlay and toasts on top

mod app;
mod input;
mod styles;
mod ui;

pub use app::App;
pub use styles::CareTheme;
