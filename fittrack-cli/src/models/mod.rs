pub mod auth;
pub mod exercise;
pub mod stats;
pub mod workout;

pub use auth::{AnalysisResponse, LoginRequest, Profile, RegisterRequest, TokenResponse};
pub use exercise::Exercise;
pub use stats::{ProgressRecord, StatsSnapshot};
pub use workout::{ExerciseRef, NewWorkout, WorkoutEntry};

use serde::{Deserialize, Deserializer};

/// Backend ids are strings, but integer ids are accepted and kept as text.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "deserialize_id")] String);

    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(id)| id))
}
