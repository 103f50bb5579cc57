//! View state shared by the loader, the handlers and the renderers.

mod analysis;

use chrono::{Local, NaiveDate};
use std::time::{Duration, Instant};

use crate::charts::Charts;
use crate::config::{ChartsConfig, Config};
use crate::models::{Exercise, StatsSnapshot, WorkoutEntry};

pub use analysis::AnalysisPanel;

/// Source of "today" for the trailing chart window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

/// A message that disappears on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// `None` when the TTL lies beyond what `Instant` can represent
    pub expires_at: Option<Instant>,
}

impl Notice {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Everything the dashboard shows
#[derive(Debug)]
pub struct AppState {
    pub username: Option<String>,
    pub exercises: Vec<Exercise>,
    pub history: Vec<WorkoutEntry>,
    /// Last successfully fetched statistics, replaced wholesale
    pub stats: Option<StatsSnapshot>,
    /// Options of the progression chart selector
    pub chart_exercises: Vec<String>,
    pub selected_exercise: Option<String>,
    pub charts: Charts,
    pub analysis: AnalysisPanel,
    pub toast: Option<Notice>,
    pub error: Option<Notice>,
    pub clock: Clock,
    pub chart_config: ChartsConfig,
    toast_ttl: Duration,
    error_ttl: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            username: None,
            exercises: Vec::new(),
            history: Vec::new(),
            stats: None,
            chart_exercises: Vec::new(),
            selected_exercise: None,
            charts: Charts::new(),
            analysis: AnalysisPanel::default(),
            toast: None,
            error: None,
            clock: Clock::System,
            chart_config: config.charts.clone(),
            toast_ttl: Duration::from_secs(config.ui.toast_seconds),
            error_ttl: Duration::from_secs(config.ui.error_seconds),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("User")
    }

    /// Install a freshly fetched snapshot and rebuild the selector and charts.
    /// The rebuilt selector starts with nothing selected.
    pub fn set_stats(&mut self, stats: StatsSnapshot) {
        self.chart_exercises = stats.exercise_names();
        self.selected_exercise = None;

        self.stats = Some(stats);
        self.draw_charts();
    }

    pub fn draw_charts(&mut self) {
        let today = self.clock.today();
        self.charts.draw_all(
            self.stats.as_ref(),
            self.selected_exercise.as_deref(),
            today,
            &self.chart_config,
        );
    }

    /// Change the progression selector; only that chart is redrawn
    pub fn select_exercise(&mut self, exercise: Option<String>) {
        self.selected_exercise = exercise.filter(|name| !name.is_empty());
        self.charts.update_progression(
            self.stats.as_ref(),
            self.selected_exercise.as_deref(),
            &self.chart_config,
        );
    }

    /// Step through the selector options; `None` sits before the first entry
    pub fn cycle_exercise(&mut self, forward: bool) {
        let len = self.chart_exercises.len();
        if len == 0 {
            return;
        }

        let current = self
            .selected_exercise
            .as_ref()
            .and_then(|name| self.chart_exercises.iter().position(|n| n == name));

        // Slot 0 is "no selection", slots 1..=len are the exercises
        let slot = current.map_or(0, |i| i + 1);
        let next = if forward {
            (slot + 1) % (len + 1)
        } else {
            (slot + len) % (len + 1)
        };

        let exercise = next.checked_sub(1).map(|i| self.chart_exercises[i].clone());
        self.select_exercise(exercise);
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Notice::new(message, self.toast_ttl));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(Notice::new(message, self.error_ttl));
    }

    /// Drop notices whose time is up
    pub fn expire_notices(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
        if self.error.as_ref().is_some_and(|e| e.is_expired(now)) {
            self.error = None;
        }
    }
}
