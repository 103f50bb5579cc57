use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One historical `(date, weight)` observation for an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub date: String,
    #[serde(default)]
    pub weight: f64,
}

/// Server-computed summary of the user's workout history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_workouts: u64,
    #[serde(default)]
    pub this_week_workouts: u64,
    #[serde(default)]
    pub most_used_exercise: Option<String>,
    #[serde(default)]
    pub total_exercises: u64,
    #[serde(default)]
    pub progress_by_exercise: BTreeMap<String, Vec<ProgressRecord>>,
}

impl StatsSnapshot {
    pub fn most_used_label(&self) -> &str {
        self.most_used_exercise
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("-")
    }

    /// Exercise names offered by the progression chart selector
    pub fn exercise_names(&self) -> Vec<String> {
        self.progress_by_exercise.keys().cloned().collect()
    }

    pub fn records_for(&self, exercise: &str) -> Option<&[ProgressRecord]> {
        self.progress_by_exercise.get(exercise).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_decoding() {
        let stats: StatsSnapshot = serde_json::from_str(
            r#"{
                "total_workouts": 4,
                "this_week_workouts": 2,
                "most_used_exercise": "Squat",
                "total_exercises": 2,
                "recent_workouts": [],
                "progress_by_exercise": {
                    "Squat": [{"date": "2024-01-01", "weight": 80}],
                    "Deadlift": [{"date": "2024-01-02", "weight": 100.5}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(stats.total_workouts, 4);
        assert_eq!(stats.most_used_label(), "Squat");
        assert_eq!(stats.exercise_names(), vec!["Deadlift", "Squat"]);
        assert_eq!(stats.records_for("Deadlift").unwrap()[0].weight, 100.5);
        assert!(stats.records_for("Row").is_none());
    }

    #[test]
    fn test_recent_workouts_are_ignored() {
        let stats: StatsSnapshot = serde_json::from_str(
            r#"{
                "total_workouts": 1,
                "recent_workouts": [{"id": null, "sets": "many"}],
                "progress_by_exercise": {}
            }"#,
        )
        .unwrap();

        assert_eq!(stats.total_workouts, 1);
    }

    #[test]
    fn test_empty_snapshot_defaults() {
        let stats: StatsSnapshot =
            serde_json::from_str(r#"{"most_used_exercise": ""}"#).unwrap();

        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.most_used_label(), "-");
        assert!(stats.exercise_names().is_empty());
    }
}
