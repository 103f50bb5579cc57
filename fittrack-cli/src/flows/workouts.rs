use anyhow::Result;
use chrono::NaiveDate;
use thiserror::Error;

use super::dashboard::{load_stats_and_charts, load_workout_history};
use super::Confirm;
use crate::api::ApiClient;
use crate::models::NewWorkout;
use crate::state::AppState;

/// A form field that does not satisfy its input constraint
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Please choose an exercise")]
    MissingExercise,

    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a whole number, got {value:?}")]
    NotAnInteger { field: &'static str, value: String },

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("Date must look like YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),
}

/// Text fields of the workout entry form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutForm {
    pub exercise_id: String,
    pub workout_date: String,
    pub sets: String,
    pub reps: String,
    pub weight_kg: String,
    pub notes: String,
}

impl WorkoutForm {
    /// Empty form dated `date`
    pub fn dated(date: NaiveDate) -> Self {
        Self {
            workout_date: date.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Parse the fields into the request payload
    pub fn to_payload(&self) -> Result<NewWorkout, FormError> {
        let exercise_id = self.exercise_id.trim();
        if exercise_id.is_empty() {
            return Err(FormError::MissingExercise);
        }

        let date = required("Date", &self.workout_date)?;
        let workout_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(date.to_string()))?;

        Ok(NewWorkout {
            exercise_id: exercise_id.to_string(),
            workout_date,
            sets: parse_integer("Sets", &self.sets)?,
            reps: parse_integer("Reps", &self.reps)?,
            weight_kg: parse_number("Weight", &self.weight_kg)?,
            notes: self.notes.trim().to_string(),
        })
    }

    /// Reset the per-set fields; exercise and date stay for the next entry
    pub fn clear_entry_fields(&mut self) {
        self.sets.clear();
        self.reps.clear();
        self.weight_kg.clear();
        self.notes.clear();
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Missing { field })
    } else {
        Ok(value)
    }
}

fn parse_integer(field: &'static str, value: &str) -> Result<i64, FormError> {
    let value = required(field, value)?;
    value.parse().map_err(|_| FormError::NotAnInteger {
        field,
        value: value.to_string(),
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, FormError> {
    let value = required(field, value)?;
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FormError::NotANumber {
            field,
            value: value.to_string(),
        })
}

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this workout?";

/// Message shown when `save_workout` fails
pub fn save_failure(err: &anyhow::Error) -> String {
    format!("Could not save: {}", err)
}

/// Message shown when `delete_workout` fails
pub fn delete_failure(err: &anyhow::Error) -> String {
    format!("Could not delete: {}", err)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Submit the form, then clear it and reload history and statistics
pub async fn save_workout(
    client: &ApiClient,
    state: &mut AppState,
    form: &mut WorkoutForm,
) -> Result<()> {
    let payload = form.to_payload()?;

    client.create_workout(&payload).await?;
    tracing::info!(
        "Saved workout: exercise {} on {}",
        payload.exercise_id,
        payload.workout_date
    );

    form.clear_entry_fields();
    state.show_toast("Workout saved!");

    load_workout_history(client, state).await;
    load_stats_and_charts(client, state).await;

    Ok(())
}

/// Delete after confirmation, then reload history and statistics
pub async fn delete_workout(
    client: &ApiClient,
    state: &mut AppState,
    id: &str,
    confirm: &mut impl Confirm,
) -> Result<DeleteOutcome> {
    if !confirm.confirm(DELETE_PROMPT)? {
        tracing::debug!("Deletion of workout {} cancelled", id);
        return Ok(DeleteOutcome::Cancelled);
    }

    client.delete_workout(id).await?;
    tracing::info!("Deleted workout {}", id);

    state.show_toast("Workout deleted.");

    load_workout_history(client, state).await;
    load_stats_and_charts(client, state).await;

    Ok(DeleteOutcome::Deleted)
}
