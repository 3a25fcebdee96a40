//! Main TUI application.
//!
//! Handles:
//! - Terminal setup and teardown
//! - Input event handling
//! - Synchronous prediction on demand

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::application::InferenceService;
use crate::ports::Classifier;

use super::ui::{
    render_footer, render_header,
    result::{render_result, ResultState},
    sliders::{render_sliders, SliderState, COARSE_STEP, FINE_STEP},
};

/// Main application state
pub struct App<C>
where
    C: Classifier,
{
    /// Whether the app should quit
    should_quit: bool,

    /// Inference service (loaded before the terminal is touched)
    inference_service: InferenceService<C>,

    /// Slider sidebar state
    slider_state: SliderState,

    /// Result panel state
    result_state: ResultState,
}

impl<C> App<C>
where
    C: Classifier,
{
    /// Create application with an injected, already initialized service.
    pub fn new(inference_service: InferenceService<C>) -> Self {
        Self {
            should_quit: false,
            inference_service,
            slider_state: SliderState::default(),
            result_state: ResultState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal even if the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the whole screen.
    pub fn draw(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(0)])
            .split(rows[1]);

        render_header(f, rows[0]);
        render_sliders(f, columns[0], &self.slider_state);
        render_result(
            f,
            columns[1],
            &self.result_state,
            &self.slider_state.measurements(),
        );
        render_footer(f, rows[2]);
    }

    /// Whether the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current result panel state.
    #[must_use]
    pub fn result_state(&self) -> &ResultState {
        &self.result_state
    }

    /// Current slider state.
    #[must_use]
    pub fn slider_state(&self) -> &SliderState {
        &self.slider_state
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let coarse = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => self.slider_state.prev(),
            KeyCode::Down | KeyCode::Tab => self.slider_state.next(),
            KeyCode::Left => self
                .slider_state
                .nudge(if coarse { -COARSE_STEP } else { -FINE_STEP }),
            KeyCode::Right => self
                .slider_state
                .nudge(if coarse { COARSE_STEP } else { FINE_STEP }),
            KeyCode::Char('[') => self.slider_state.nudge(-COARSE_STEP),
            KeyCode::Char(']') => self.slider_state.nudge(COARSE_STEP),
            KeyCode::Home => self.slider_state.to_min(),
            KeyCode::End => self.slider_state.to_max(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.slider_state.reset(),
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => self.predict(),
            _ => {}
        }
    }

    fn predict(&mut self) {
        let inputs = self.slider_state.measurements();
        self.result_state = match self.inference_service.predict_measurements(&inputs) {
            Ok(prediction) => ResultState::Complete { prediction, inputs },
            Err(e) => {
                tracing::warn!("Prediction rejected: {}", e);
                ResultState::Error {
                    message: e.to_string(),
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logistic::LogisticRegressionAdapter;
    use crate::PetalscopeError;
    use ratatui::backend::TestBackend;
    use std::path::Path;
    use std::sync::Arc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn create_test_app() -> App<LogisticRegressionAdapter> {
        let service =
            InferenceService::init(Path::new("models"), true).expect("Bundled model should load");
        App::new(service)
    }

    fn screen_text(app: &App<impl Classifier>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).expect("terminal");
        terminal.draw(|f| app.draw(f)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    /// Classifier that claims a feature count the sliders cannot supply.
    struct WideClassifier(Vec<String>);

    impl Classifier for WideClassifier {
        fn n_features(&self) -> usize {
            5
        }
        fn class_names(&self) -> &[String] {
            &self.0
        }
        fn predict(&self, _: &[f64]) -> Result<usize, PetalscopeError> {
            Ok(0)
        }
        fn predict_proba(&self, _: &[f64]) -> Result<Vec<f64>, PetalscopeError> {
            Ok(vec![1.0])
        }
    }

    #[test]
    fn test_idle_screen() {
        let app = create_test_app();
        assert!(matches!(app.result_state(), ResultState::Idle));

        let text = screen_text(&app);
        assert!(text.contains("Iris Flower Species Prediction"));
        assert!(text.contains("Input Features"));
        assert!(text.contains("press [Enter] to predict"));
    }

    #[test]
    fn test_predict_default_sliders() {
        let mut app = create_test_app();
        app.handle_key(press(KeyCode::Enter));

        match app.result_state() {
            ResultState::Complete { prediction, .. } => assert_eq!(prediction.label, "setosa"),
            other => panic!("unexpected state: {other:?}"),
        }

        let text = screen_text(&app);
        assert!(text.contains("Setosa"));
        assert!(text.contains("setosa: 0.98"));
        assert!(text.contains("virginica: 0.00"));
        assert!(!text.contains("Inputs changed"));
    }

    #[test]
    fn test_slider_change_marks_result_stale() {
        let mut app = create_test_app();
        app.handle_key(press(KeyCode::Char('p')));
        app.handle_key(press(KeyCode::Right));

        assert!((app.slider_state().sliders[0].value - 5.2).abs() < 1e-9);
        assert!(screen_text(&app).contains("Inputs changed"));
    }

    #[test]
    fn test_keys_drive_sliders_to_virginica() {
        let mut app = create_test_app();
        // Petal length 1.4 -> 6.4, petal width 0.2 -> 2.2
        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Down));
        for _ in 0..5 {
            app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        }
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Char(']')));
        app.handle_key(press(KeyCode::Char(']')));
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(
            app.slider_state().measurements().to_array(),
            [5.1, 3.5, 6.4, 2.2]
        );
        match app.result_state() {
            ResultState::Complete { prediction, .. } => {
                assert_eq!(prediction.label, "virginica")
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_input_is_shown_not_fatal() {
        let classifier = WideClassifier(vec!["only".into()]);
        let mut app = App::new(InferenceService::new(Arc::new(classifier)));
        app.handle_key(press(KeyCode::Enter));

        assert!(matches!(app.result_state(), ResultState::Error { .. }));
        assert!(!app.should_quit());
        assert!(screen_text(&app).contains("Invalid input"));
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = create_test_app();
            app.handle_key(key);
            assert!(app.should_quit());
        }
    }
}
