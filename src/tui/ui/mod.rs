//! UI module: View components for the TUI.

pub mod result;
pub mod sliders;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::BotanicalTheme;

pub fn render_header(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![
            Span::styled(" ", BotanicalTheme::text()),
            Span::styled("Iris Flower Species Prediction", BotanicalTheme::title()),
        ]),
        Line::from(Span::styled(
            " Predicts the species of an iris flower from its measurements. Use the sliders on the left to customize them.",
            BotanicalTheme::text_secondary(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(BotanicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

pub fn render_footer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![
            Span::styled("[↑↓] ", BotanicalTheme::key_hint()),
            Span::styled("Select ", BotanicalTheme::key_desc()),
            Span::styled("[←→] ", BotanicalTheme::key_hint()),
            Span::styled("±0.1 ", BotanicalTheme::key_desc()),
            Span::styled("[Shift+←→] ", BotanicalTheme::key_hint()),
            Span::styled("±1.0 ", BotanicalTheme::key_desc()),
            Span::styled("[Enter] ", BotanicalTheme::key_hint()),
            Span::styled("Predict ", BotanicalTheme::key_desc()),
            Span::styled("[R] ", BotanicalTheme::key_hint()),
            Span::styled("Reset ", BotanicalTheme::key_desc()),
            Span::styled("[Q] ", BotanicalTheme::key_hint()),
            Span::styled("Quit", BotanicalTheme::key_desc()),
        ]),
        Line::from(Span::styled(
            "Made with Rust, Ratatui and a logistic regression model",
            BotanicalTheme::text_muted(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(BotanicalTheme::border());

    let p = Paragraph::new(text).block(block);
    f.render_widget(p, area);
}
