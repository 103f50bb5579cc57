use crossterm::event::KeyCode;

use super::form::{FormEditor, FormInput};
use crate::flows::WorkoutForm;
use crate::state::AppState;

/// Application state for the TUI dashboard
pub struct App {
    /// Should the application quit?
    pub should_quit: bool,
    /// Selected row in the workout history
    pub selected_index: usize,
    /// Show help overlay
    pub show_help: bool,
    pub mode: Mode,
    pub state: AppState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Browse,
    /// Workout entry form is open
    Editing(FormEditor),
    /// Waiting for y/n on deleting the workout with this id
    ConfirmDelete(String),
}

/// Work the dashboard loop has to do against the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    SaveWorkout,
    DeleteWorkout { id: String, confirmed: bool },
    Analysis,
    Logout,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self {
            should_quit: false,
            selected_index: 0,
            show_help: false,
            mode: Mode::Browse,
            state,
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Action> {
        // Help overlay takes precedence
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return None;
        }

        match &mut self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Editing(editor) => match editor.handle_key(key, &self.state.exercises) {
                FormInput::Editing => None,
                FormInput::Submit => Some(Action::SaveWorkout),
                FormInput::Cancel => {
                    self.mode = Mode::Browse;
                    None
                }
            },
            Mode::ConfirmDelete(id) => {
                let confirmed = match key {
                    KeyCode::Char('y') | KeyCode::Char('Y') => true,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
                    _ => return None,
                };
                let id = std::mem::take(id);
                self.mode = Mode::Browse;
                Some(Action::DeleteWorkout { id, confirmed })
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyCode) -> Option<Action> {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                None
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Refresh),
            KeyCode::Char('a') | KeyCode::Char('A') => {
                // The button is hidden while a request is in flight
                self.state
                    .analysis
                    .button_visible
                    .then_some(Action::Analysis)
            }
            KeyCode::Char('o') | KeyCode::Char('O') => Some(Action::Logout),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.open_form();
                None
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                if let Some(entry) = self.state.history.get(self.selected_index) {
                    self.mode = Mode::ConfirmDelete(entry.id.clone());
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = self.selected_index.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max_index = self.state.history.len().saturating_sub(1);
                if self.selected_index < max_index {
                    self.selected_index += 1;
                }
                None
            }
            KeyCode::Left | KeyCode::Char('[') => {
                self.state.cycle_exercise(false);
                None
            }
            KeyCode::Right | KeyCode::Char(']') => {
                self.state.cycle_exercise(true);
                None
            }
            _ => None,
        }
    }

    fn open_form(&mut self) {
        let form = WorkoutForm::dated(self.state.clock.today());
        self.mode = Mode::Editing(FormEditor::new(form, &self.state.exercises));
    }

    /// Keep the history cursor on an existing row after a reload
    pub fn clamp_selection(&mut self) {
        let max_index = self.state.history.len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, WorkoutEntry};
    use crate::state::Clock;
    use chrono::NaiveDate;

    fn entry(id: &str) -> WorkoutEntry {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "workout_date": "2024-02-18",
            "sets": 3,
            "reps": 8,
            "weight_kg": 60.0
        }))
        .unwrap()
    }

    fn app() -> App {
        let mut state = AppState::default()
            .with_clock(Clock::Fixed(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()));
        state.history = vec![entry("w1"), entry("w2")];
        state.exercises = vec![Exercise {
            id: "e1".to_string(),
            name: "Squat".to_string(),
            muscle_group: None,
        }];
        App::new(state)
    }

    #[test]
    fn test_quit_and_help() {
        let mut app = app();
        app.handle_key(KeyCode::Char('?'));
        assert!(app.show_help);

        // Keys are swallowed by the overlay
        app.handle_key(KeyCode::Char('q'));
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Esc);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_delete_requires_answer() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::ConfirmDelete("w2".to_string()));

        assert_eq!(app.handle_key(KeyCode::Char('x')), None);
        assert_eq!(
            app.handle_key(KeyCode::Char('n')),
            Some(Action::DeleteWorkout {
                id: "w2".to_string(),
                confirmed: false
            })
        );
        assert_eq!(app.mode, Mode::Browse);

        app.handle_key(KeyCode::Char('d'));
        assert_eq!(
            app.handle_key(KeyCode::Char('y')),
            Some(Action::DeleteWorkout {
                id: "w2".to_string(),
                confirmed: true
            })
        );
    }

    #[test]
    fn test_form_opens_dated_today() {
        let mut app = app();
        app.handle_key(KeyCode::Char('n'));

        let Mode::Editing(editor) = &app.mode else {
            panic!("form should be open");
        };
        assert_eq!(editor.form.workout_date, "2024-02-20");
        assert_eq!(editor.form.exercise_id, "e1");

        assert_eq!(app.handle_key(KeyCode::Enter), Some(Action::SaveWorkout));
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.mode, Mode::Browse);
    }

    #[test]
    fn test_analysis_only_while_button_visible() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('a')), Some(Action::Analysis));

        app.state.analysis.begin();
        assert_eq!(app.handle_key(KeyCode::Char('a')), None);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.selected_index, 1);

        app.state.history.truncate(1);
        app.clamp_selection();
        assert_eq!(app.selected_index, 0);
    }
}
