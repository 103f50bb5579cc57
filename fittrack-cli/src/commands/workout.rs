use anyhow::{Context as _, Result};
use clap::Args;
use dialoguer::{Confirm, Input, Select};

use super::{require_login, show_error, show_success, Context};
use crate::flows::{self, DeleteOutcome, WorkoutForm};
use crate::models::Exercise;

#[derive(Args)]
pub struct LogWorkoutCommand {
    /// Exercise name or id (chosen from the catalog when omitted)
    #[arg(short, long)]
    exercise: Option<String>,

    /// Workout date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<String>,

    /// Number of sets
    #[arg(long)]
    sets: Option<String>,

    /// Repetitions per set
    #[arg(long)]
    reps: Option<String>,

    /// Weight in kg
    #[arg(long)]
    weight: Option<String>,

    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,
}

impl LogWorkoutCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        require_login(ctx)?;

        println!("Log a workout");
        println!();

        let mut state = ctx.new_state();
        flows::load_exercises(&ctx.client, &mut state).await;

        let exercise = match self.exercise {
            Some(query) => find_exercise(&state.exercises, &query)
                .with_context(|| format!("Unknown exercise '{}'", query))?
                .clone(),
            None => pick_exercise(&state.exercises)?,
        };

        let mut form = WorkoutForm::dated(state.clock.today());
        form.exercise_id = exercise.id.clone();
        if let Some(date) = self.date {
            form.workout_date = date;
        }
        form.sets = value_or_prompt(self.sets, "Sets")?;
        form.reps = value_or_prompt(self.reps, "Reps")?;
        form.weight_kg = value_or_prompt(self.weight, "Weight (kg)")?;
        form.notes = match self.notes {
            Some(notes) => notes,
            None => Input::new()
                .with_prompt("Notes")
                .allow_empty(true)
                .interact_text()?,
        };

        match flows::save_workout(&ctx.client, &mut state, &mut form).await {
            Ok(()) => {
                if let Some(toast) = &state.toast {
                    show_success(&toast.message);
                }
                println!();
                println!("  Exercise: {}", exercise);
                if let Some(stats) = &state.stats {
                    println!("  Workouts logged: {}", stats.total_workouts);
                    println!("  This week:       {}", stats.this_week_workouts);
                }
                Ok(())
            }
            Err(e) => {
                show_error(&flows::save_failure(&e));
                Err(e)
            }
        }
    }
}

/// Match by id first, then by case-insensitive name
fn find_exercise<'a>(exercises: &'a [Exercise], query: &str) -> Option<&'a Exercise> {
    exercises
        .iter()
        .find(|e| e.id == query)
        .or_else(|| exercises.iter().find(|e| e.name.eq_ignore_ascii_case(query)))
}

fn pick_exercise(exercises: &[Exercise]) -> Result<Exercise> {
    if exercises.is_empty() {
        anyhow::bail!("No exercises available");
    }

    let index = Select::new()
        .with_prompt("Exercise")
        .items(exercises)
        .default(0)
        .interact()?;

    Ok(exercises[index].clone())
}

fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

pub async fn list_workouts(ctx: &Context, limit: usize) -> Result<()> {
    require_login(ctx)?;

    let history = ctx.client.workout_history().await?;

    println!("Workout History");
    println!();

    if history.is_empty() {
        println!("No workouts logged yet.");
        return Ok(());
    }

    for workout in history.iter().take(limit) {
        println!(
            "  {}  {:<20} {}  [{}]",
            workout.display_date(),
            workout.exercise_name(),
            workout.volume_summary(),
            workout.id
        );
    }

    if history.len() > limit {
        println!();
        println!("  ... {} more (use --limit)", history.len() - limit);
    }

    Ok(())
}

pub async fn delete_workout(ctx: &Context, id: &str, force: bool) -> Result<()> {
    require_login(ctx)?;

    let mut state = ctx.new_state();

    let mut confirm = |prompt: &str| -> Result<bool> {
        if force {
            return Ok(true);
        }
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    };

    match flows::delete_workout(&ctx.client, &mut state, id, &mut confirm).await {
        Ok(DeleteOutcome::Deleted) => {
            if let Some(toast) = &state.toast {
                show_success(&toast.message);
            }
            println!("  {} workouts remaining", state.history.len());
            Ok(())
        }
        Ok(DeleteOutcome::Cancelled) => {
            println!("Deletion cancelled.");
            Ok(())
        }
        Err(e) => {
            show_error(&flows::delete_failure(&e));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_exercise_by_id_or_name() {
        let exercises = vec![
            Exercise {
                id: "e1".to_string(),
                name: "Back Squat".to_string(),
                muscle_group: Some("Legs".to_string()),
            },
            Exercise {
                id: "e2".to_string(),
                name: "Bench Press".to_string(),
                muscle_group: None,
            },
        ];

        assert_eq!(find_exercise(&exercises, "e2").unwrap().name, "Bench Press");
        assert_eq!(find_exercise(&exercises, "back squat").unwrap().id, "e1");
        assert!(find_exercise(&exercises, "Row").is_none());
    }
}
