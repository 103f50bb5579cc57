use crate::api::ApiClient;
use crate::state::AppState;

/// Populate the dashboard. Each fetch is independent: a failure is logged and
/// the remaining ones still run.
pub async fn init_dashboard(client: &ApiClient, state: &mut AppState) {
    match client.profile().await {
        Ok(profile) => state.username = Some(profile.display_name().to_string()),
        Err(e) => tracing::warn!("Could not load profile: {}", e),
    }

    load_exercises(client, state).await;
    load_workout_history(client, state).await;
    load_stats_and_charts(client, state).await;
}

pub async fn load_exercises(client: &ApiClient, state: &mut AppState) {
    match client.exercises().await {
        Ok(exercises) => {
            tracing::debug!("Loaded {} exercises", exercises.len());
            state.exercises = exercises;
        }
        Err(e) => tracing::error!("Could not load exercises: {}", e),
    }
}

pub async fn load_workout_history(client: &ApiClient, state: &mut AppState) {
    match client.workout_history().await {
        Ok(history) => {
            tracing::debug!("Loaded {} workouts", history.len());
            state.history = history;
        }
        Err(e) => tracing::error!("Could not load workout history: {}", e),
    }
}

pub async fn load_stats_and_charts(client: &ApiClient, state: &mut AppState) {
    match client.stats().await {
        Ok(stats) => state.set_stats(stats),
        Err(e) => tracing::error!("Could not load statistics: {}", e),
    }
}
