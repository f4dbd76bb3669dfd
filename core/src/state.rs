//! The persisted session document.
//!
//! On disk the document keeps the browser-era shape:
//!
//! ```json
//! {"attempts":1,"fails":1,"avoided":0,"darkMode":false,
//!  "compromised":[{"username":"a","password":"b","timestamp":"2024-01-15T09:30:00Z"}]}
//! ```
//!
//! `fails` is written for compatibility but never trusted on read:
//! the fail count is always `compromised.len()`.

use crate::types::{ScenarioId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};

/// One captured username/password pair. Stored verbatim and unencrypted;
/// this is a training artefact, not a credential vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompromisedRecord {
    pub username:  String,
    pub password:  String,
    pub timestamp: Timestamp,
    /// Template that was active when the credentials were typed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario:  Option<ScenarioId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredDocument", into = "StoredDocument")]
pub struct SessionState {
    pub attempts:    u64,
    pub avoided:     u64,
    pub dark_mode:   bool,
    compromised:     Vec<CompromisedRecord>,
}

impl SessionState {
    pub fn fails(&self) -> u64 {
        self.compromised.len() as u64
    }

    /// Oldest first, in capture order.
    pub fn compromised(&self) -> &[CompromisedRecord] {
        &self.compromised
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &CompromisedRecord> {
        self.compromised.iter().rev()
    }

    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    pub fn record_avoided(&mut self) {
        self.avoided += 1;
    }

    /// Append-only: the only way a record enters the log.
    pub fn record_compromise(&mut self, record: CompromisedRecord) {
        self.compromised.push(record);
    }

    /// Zero every counter and drop the log. The theme preference survives.
    pub fn clear_statistics(&mut self) {
        self.attempts = 0;
        self.avoided = 0;
        self.compromised.clear();
    }
}

/// Wire shape of the document. Every field defaults so partial or
/// hand-edited documents still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    #[serde(default)]
    attempts:    u64,
    #[serde(default)]
    fails:       u64,
    #[serde(default)]
    avoided:     u64,
    #[serde(default)]
    dark_mode:   bool,
    #[serde(default, deserialize_with = "readable_records")]
    compromised: Vec<CompromisedRecord>,
}

/// A record that cannot be read (bad timestamp, missing username) is
/// dropped on its own; the counters and the remaining records survive.
fn readable_records<'de, D>(deserializer: D) -> Result<Vec<CompromisedRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let total = raw.len();
    let records: Vec<CompromisedRecord> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("dropping unreadable compromised record #{i}: {e}");
                None
            }
        })
        .collect();
    if records.len() != total {
        log::warn!("kept {} of {total} compromised records", records.len());
    }
    Ok(records)
}

impl From<StoredDocument> for SessionState {
    fn from(doc: StoredDocument) -> Self {
        if doc.fails != doc.compromised.len() as u64 {
            log::debug!(
                "stored fails={} disagrees with {} compromised records; using the log",
                doc.fails,
                doc.compromised.len()
            );
        }
        Self {
            attempts:    doc.attempts,
            avoided:     doc.avoided,
            dark_mode:   doc.dark_mode,
            compromised: doc.compromised,
        }
    }
}

impl From<SessionState> for StoredDocument {
    fn from(state: SessionState) -> Self {
        Self {
            attempts:    state.attempts,
            fails:       state.fails(),
            avoided:     state.avoided,
            dark_mode:   state.dark_mode,
            compromised: state.compromised,
        }
    }
}
