//! Measurement sliders.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::domain::{Measurements, FEATURE_LABELS, SLIDER_MAX, SLIDER_MIN};
use crate::tui::styles::BotanicalTheme;

/// Small step (arrow keys)
pub const FINE_STEP: f64 = 0.1;

/// Large step (Shift + arrow keys)
pub const COARSE_STEP: f64 = 1.0;

/// A single bounded slider.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub label: &'static str,
    pub value: f64,
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl Slider {
    fn new(label: &'static str, default: f64) -> Self {
        Self {
            label,
            value: default,
            default,
            min: SLIDER_MIN,
            max: SLIDER_MAX,
        }
    }

    /// Set the value, clamped to the range and rounded to one decimal.
    pub fn set(&mut self, value: f64) {
        let clamped = value.clamp(self.min, self.max);
        self.value = (clamped * 10.0).round() / 10.0;
    }

    /// Move the value by `delta`.
    pub fn nudge(&mut self, delta: f64) {
        self.set(self.value + delta);
    }

    /// Position of the value inside the range (0.0 to 1.0).
    #[must_use]
    pub fn ratio(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Slider panel state
pub struct SliderState {
    pub sliders: Vec<Slider>,
    pub selected: usize,
}

impl Default for SliderState {
    fn default() -> Self {
        let defaults = Measurements::default().to_array();
        Self {
            sliders: FEATURE_LABELS
                .into_iter()
                .zip(defaults)
                .map(|(label, default)| Slider::new(label, default))
                .collect(),
            selected: 0,
        }
    }
}

impl SliderState {
    /// Move to the next slider
    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.sliders.len();
    }

    /// Move to the previous slider
    pub fn prev(&mut self) {
        if self.selected == 0 {
            self.selected = self.sliders.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Nudge the selected slider
    pub fn nudge(&mut self, delta: f64) {
        self.sliders[self.selected].nudge(delta);
    }

    /// Jump the selected slider to its minimum
    pub fn to_min(&mut self) {
        let slider = &mut self.sliders[self.selected];
        let min = slider.min;
        slider.set(min);
    }

    /// Jump the selected slider to its maximum
    pub fn to_max(&mut self) {
        let slider = &mut self.sliders[self.selected];
        let max = slider.max;
        slider.set(max);
    }

    /// Restore every slider to its default value
    pub fn reset(&mut self) {
        for slider in self.sliders.iter_mut() {
            slider.value = slider.default;
        }
    }

    /// Current values as measurements
    #[must_use]
    pub fn measurements(&self) -> Measurements {
        let values: Vec<f64> = self.sliders.iter().map(|s| s.value).collect();
        Measurements::from_vec(&values).unwrap_or_default()
    }
}

/// Render the slider sidebar
pub fn render_sliders(f: &mut Frame, area: Rect, state: &SliderState) {
    let block = Block::default()
        .title(Span::styled(" Input Features ", BotanicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(BotanicalTheme::border());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let constraints: Vec<Constraint> = state
        .sliders
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, slider) in state.sliders.iter().enumerate() {
        let is_selected = i == state.selected;

        let (border_style, title_style) = if is_selected {
            (BotanicalTheme::border_focused(), BotanicalTheme::focused())
        } else {
            (BotanicalTheme::border(), BotanicalTheme::text_secondary())
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(format!(" {} ", slider.label), title_style))
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .gauge_style(BotanicalTheme::slider(is_selected))
            .ratio(slider.ratio())
            .label(format!("{:.1}", slider.value));

        f.render_widget(gauge, chunks[i]);
    }
}
