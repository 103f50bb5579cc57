use serde::{Deserialize, Serialize};

/// Reference exercise from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub muscle_group: Option<String>,
}

impl std::fmt::Display for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.muscle_group.as_deref() {
            Some(group) if !group.is_empty() => write!(f, "{} ({})", self.name, group),
            _ => f.write_str(&self.name),
        }
    }
}
