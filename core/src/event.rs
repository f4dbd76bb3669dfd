//! Activity events — what each trainee action did.
//!
//! RULE: Events never carry passwords. The compromised log in the session
//! document is the only place a captured secret is kept.

use crate::{
    scenario::EntryPoint,
    types::{ScenarioId, SessionId},
};
use serde::{Deserialize, Serialize};

/// Variants are added over time — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrainingEvent {
    ScenarioStarted {
        entry:       EntryPoint,
        scenario:    ScenarioId,
        destination: String,
        attempts:    u64,
    },
    CredentialsCompromised {
        scenario: Option<ScenarioId>,
        username: String,
        fails:    u64,
    },
    AttackAvoided {
        reason:  AvoidReason,
        avoided: u64,
    },
    DarkModeChanged {
        enabled: bool,
    },
    StatisticsReset,
    ResetDeclined,
    LoggedOut {
        destination: String,
    },
    LogoutDeclined,
    SimEmailTargetChanged {
        target: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvoidReason {
    /// Submitted the form with a blank field.
    BlankSubmission,
    /// Dismissed the scenario outright.
    Ignored,
}

impl TrainingEvent {
    /// Stable name for the `event_type` column.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ScenarioStarted { .. }        => "scenario_started",
            Self::CredentialsCompromised { .. } => "credentials_compromised",
            Self::AttackAvoided { .. }          => "attack_avoided",
            Self::DarkModeChanged { .. }        => "dark_mode_changed",
            Self::StatisticsReset               => "statistics_reset",
            Self::ResetDeclined                 => "reset_declined",
            Self::LoggedOut { .. }              => "logged_out",
            Self::LogoutDeclined                => "logout_declined",
            Self::SimEmailTargetChanged { .. }  => "sim_email_target_changed",
        }
    }
}

/// The activity log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id:          Option<i64>,
    pub session_id:  SessionId,
    pub recorded_at: String, // RFC 3339
    pub event_type:  String,
    pub payload:     String, // JSON-serialized TrainingEvent
}
