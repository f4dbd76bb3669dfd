//! Trainer configuration.
//!
//! Every field has a default matching the shipped training pages, so an
//! empty `{}` file (or no file at all) yields a working trainer.

use crate::error::TrainerResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Key holding the session document.
    pub state_key:    String,
    /// Key holding the id of the scenario currently being played.
    pub template_key: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            state_key:    "phishingSimulatorState".into(),
            template_key: "currentPhishTemplate".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRoutes {
    pub dashboard:  String,
    pub simulation: String,
    pub analysis:   String,
    pub receive:    String,
    pub welcome:    String,
}

impl Default for PageRoutes {
    fn default() -> Self {
        Self {
            dashboard:  "dashboard.html".into(),
            simulation: "simulation.html".into(),
            analysis:   "analysis.html".into(),
            receive:    "receive.html".into(),
            welcome:    "welcome.html".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub storage:          StorageKeys,
    pub routes:           PageRoutes,
    /// Treat whitespace-only fields as blank when judging a submission.
    pub trim_credentials: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            storage:          StorageKeys::default(),
            routes:           PageRoutes::default(),
            trim_credentials: true,
        }
    }
}

impl TrainerConfig {
    /// Load a JSON config file. Missing fields fall back to defaults.
    pub fn from_file(path: &str) -> TrainerResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> TrainerResult<Self> {
        let config: TrainerConfig = serde_json::from_str(content)?;
        log::debug!(
            "config loaded: state_key={} trim_credentials={}",
            config.storage.state_key,
            config.trim_credentials
        );
        Ok(config)
    }
}
