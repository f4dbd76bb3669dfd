use crate::scenario::EntryPoint;
use serde::{Deserialize, Serialize};

/// Every action a trainee can take on a page.
/// Variants are added over time — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TraineeAction {
    /// Page load: apply the theme and render counters.
    ShowDashboard,

    // ── Scenario entry ────────────────────────────
    StartScenario {
        entry:    EntryPoint,
        scenario: String,
    },
    ClickEmailLink,

    // ── Login form ────────────────────────────────
    SubmitCredentials {
        username: String,
        password: String,
    },
    IgnorePhish,

    // ── Dashboard controls ────────────────────────
    SetDarkMode { enabled: bool },
    SetSimEmail { target: String },
    ResetStatistics,
    Logout,
}
