//! TUI module: Terminal User Interface using Ratatui.
//!
//! Single screen with:
//! - Measurement sliders in a sidebar
//! - Predicted species, probability chart and listing

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::BotanicalTheme;
