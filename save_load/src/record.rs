use {
    crate::SaveError,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    wallet::Wallet,
};

/// On-disk shape of a save:
/// `{ "resources": {cp, it, ne}, "level", "storyQueue", "lastSaved" }`.
///
/// Every field is optional when reading; absent ones take the initial-state value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveRecord {
    pub resources: Wallet,
    pub level: u32,
    pub story_queue: Vec<String>,
    pub last_saved: Option<DateTime<Utc>>,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            resources: Wallet::INITIAL,
            level: 1,
            story_queue: Vec::new(),
            last_saved: None,
        }
    }
}

impl SaveRecord {
    /// Clamps values no running game can produce back into range.
    pub fn sanitized(self) -> Self {
        Self {
            resources: self.resources.sanitized(),
            level: self.level.max(1),
            ..self
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        serde_json::to_string(self).map_err(SaveError::Serialize)
    }

    pub fn from_json(data: &str) -> Result<Self, SaveError> {
        serde_json::from_str(data).map_err(SaveError::Deserialize)
    }
}
