use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Exercise name embedded in a workout row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRef {
    pub name: String,
    #[serde(default)]
    pub muscle_group: Option<String>,
}

/// Workout entry as returned by the history endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::deserialize_opt_id")]
    pub exercise_id: Option<String>,
    pub workout_date: String,
    #[serde(default)]
    pub sets: i64,
    #[serde(default)]
    pub reps: i64,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Option<ExerciseRef>,
}

impl WorkoutEntry {
    pub fn exercise_name(&self) -> &str {
        self.exercises
            .as_ref()
            .map(|e| e.name.as_str())
            .unwrap_or("Unknown")
    }

    /// `dd.mm.yyyy` for ISO dates, the stored text otherwise
    pub fn display_date(&self) -> String {
        let parts: Vec<&str> = self.workout_date.split('-').collect();
        match parts.as_slice() {
            [year, month, day] => format!("{}.{}.{}", day, month, year),
            _ => self.workout_date.clone(),
        }
    }

    /// One-line summary: "3 sets × 10 reps × 42.5 kg"
    pub fn volume_summary(&self) -> String {
        format!(
            "{} sets × {} reps × {} kg",
            self.sets, self.reps, self.weight_kg
        )
    }
}

/// Payload for `POST /api/workouts`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWorkout {
    pub exercise_id: String,
    pub workout_date: NaiveDate,
    pub sets: i64,
    pub reps: i64,
    pub weight_kg: f64,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_row_decoding() {
        let row: WorkoutEntry = serde_json::from_value(json!({
            "id": "w1",
            "exercise_id": "e1",
            "workout_date": "2024-03-09",
            "sets": 3,
            "reps": 8,
            "weight_kg": 62.5,
            "notes": "",
            "created_at": "2024-03-09T10:00:00",
            "exercises": {"name": "Bench Press", "muscle_group": "Chest"}
        }))
        .unwrap();

        assert_eq!(row.exercise_name(), "Bench Press");
        assert_eq!(row.display_date(), "09.03.2024");
        assert_eq!(row.volume_summary(), "3 sets × 8 reps × 62.5 kg");
    }

    #[test]
    fn test_missing_exercise_and_odd_date() {
        let row: WorkoutEntry = serde_json::from_value(json!({
            "id": 12,
            "workout_date": "yesterday",
            "sets": 1,
            "reps": 1,
            "weight_kg": 0.0,
            "exercises": null
        }))
        .unwrap();

        assert_eq!(row.id, "12");
        assert_eq!(row.exercise_name(), "Unknown");
        assert_eq!(row.display_date(), "yesterday");
    }

    #[test]
    fn test_new_workout_serializes_numbers() {
        let payload = NewWorkout {
            exercise_id: "e1".to_string(),
            workout_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            sets: 3,
            reps: 10,
            weight_kg: 42.5,
            notes: String::new(),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "exercise_id": "e1",
                "workout_date": "2024-01-05",
                "sets": 3,
                "reps": 10,
                "weight_kg": 42.5,
                "notes": ""
            })
        );
    }
}
