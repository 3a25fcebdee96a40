//! Prediction result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{Measurements, Prediction};
use crate::tui::styles::BotanicalTheme;

/// Result panel state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing predicted yet
    #[default]
    Idle,
    /// Completed with result, remembering the inputs it was computed for
    Complete {
        prediction: Prediction,
        inputs: Measurements,
    },
    /// Prediction was rejected
    Error { message: String },
}

/// Render the result panel
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState, current: &Measurements) {
    match state {
        ResultState::Idle => render_idle(f, area),
        ResultState::Complete { prediction, inputs } => {
            render_prediction(f, area, prediction, inputs != current)
        }
        ResultState::Error { message } => render_error(f, area, message),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Adjust the sliders on the left and press [Enter] to predict.",
            BotanicalTheme::info(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(BotanicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_prediction(f: &mut Frame, area: Rect, prediction: &Prediction, stale: bool) {
    let block = Block::default()
        .title(Span::styled(" Prediction ", BotanicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(BotanicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let listing_height = prediction.classes.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),              // Species
            Constraint::Min(6),                 // Chart
            Constraint::Length(listing_height), // Listing
        ])
        .margin(1)
        .split(inner);

    let mut species = vec![
        Line::from(Span::styled("Predicted Species:", BotanicalTheme::text_secondary())),
        Line::from(Span::styled(prediction.display_label(), BotanicalTheme::result())),
    ];
    if stale {
        species.push(Line::from(Span::styled(
            "Inputs changed since this prediction; press [Enter] to update.",
            BotanicalTheme::warning(),
        )));
    }
    f.render_widget(
        Paragraph::new(species).alignment(Alignment::Center),
        chunks[0],
    );

    let bars: Vec<Bar> = prediction
        .classes
        .iter()
        .enumerate()
        .map(|(i, class)| {
            let style = BotanicalTheme::bar(i == prediction.class_index);
            Bar::default()
                .value(percent(class.probability))
                .text_value(format!("{:.2}", class.probability))
                .label(Line::from(class.label.clone()))
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " Prediction Probabilities ",
                    BotanicalTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(BotanicalTheme::border()),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(3)
        .max(100);
    f.render_widget(chart, chunks[1]);

    let listing: Vec<Line> = prediction
        .classes
        .iter()
        .map(|class| {
            Line::from(vec![
                Span::styled("- ", BotanicalTheme::text_muted()),
                Span::styled(class.listing(), BotanicalTheme::text()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(listing), chunks[2]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", BotanicalTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, BotanicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(BotanicalTheme::danger()),
    );

    f.render_widget(content, area);
}

/// Probability as a whole percentage for bar heights.
fn percent(probability: f64) -> u64 {
    (probability.clamp(0.0, 1.0) * 100.0).round() as u64
}
