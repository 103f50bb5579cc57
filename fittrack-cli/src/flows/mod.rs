//! User-triggered operations: each one talks to the API and updates `AppState`.

pub mod analysis;
pub mod auth;
pub mod dashboard;
pub mod workouts;

use anyhow::Result;

pub use analysis::get_ai_analysis;
pub use auth::{login, logout, register, LoginForm, LoginOutcome, RegisterForm, RegisterOutcome};
pub use dashboard::{init_dashboard, load_exercises, load_stats_and_charts, load_workout_history};
pub use workouts::{
    delete_failure, delete_workout, save_failure, save_workout, DeleteOutcome, FormError,
    WorkoutForm, DELETE_PROMPT,
};

/// Interactive yes/no question asked before destructive actions
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> Result<bool>,
{
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self(prompt)
    }
}
