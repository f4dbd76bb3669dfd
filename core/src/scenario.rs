//! Scenario entry — every way a trainee can start a simulation.
//!
//! Starting counts as an attempt regardless of entry point. The scenario
//! id is remembered as-is; no validation.

use crate::{
    config::PageRoutes,
    error::{TrainerError, TrainerResult},
    state::SessionState,
    types::ScenarioId,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Scenario id recorded when the trainee clicks the link inside the
/// simulated email.
pub const EMAIL_LINK_SCENARIO: &str = "email";

pub const EMAIL_LINK_ALERT: &str =
    "Simulated result: User clicked the suspicious link (a major security failure). \
     This is only a training simulation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPoint {
    /// Red-flag walkthrough of a template.
    Analysis,
    /// Straight to the fake login form.
    Simulation,
    /// The simulated inbox.
    Receive,
    /// The suspicious link inside the simulated email.
    EmailLink,
}

impl EntryPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis   => "analysis",
            Self::Simulation => "simulation",
            Self::Receive    => "receive",
            Self::EmailLink  => "email_link",
        }
    }

    pub fn destination(&self, routes: &PageRoutes, scenario: &str) -> String {
        match self {
            Self::Analysis   => format!("{}#scenario-{scenario}", routes.analysis),
            Self::Simulation => routes.simulation.clone(),
            Self::Receive    => routes.receive.clone(),
            Self::EmailLink  => routes.simulation.clone(),
        }
    }
}

impl FromStr for EntryPoint {
    type Err = TrainerError;

    fn from_str(s: &str) -> TrainerResult<Self> {
        match s {
            "analysis"                  => Ok(Self::Analysis),
            "simulation" | "template"   => Ok(Self::Simulation),
            "receive"                   => Ok(Self::Receive),
            "email_link" | "email-link" => Ok(Self::EmailLink),
            other => Err(TrainerError::UnknownEntryPoint { name: other.to_string() }),
        }
    }
}

/// Where a started scenario sends the trainee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioStart {
    pub entry:       EntryPoint,
    pub scenario:    ScenarioId,
    pub destination: String,
}

/// Count the attempt and work out the destination. The email link always
/// plays the `email` template whatever id the caller passed.
pub fn begin(
    state:    &mut SessionState,
    entry:    EntryPoint,
    scenario: &str,
    routes:   &PageRoutes,
) -> ScenarioStart {
    state.record_attempt();
    let scenario = match entry {
        EntryPoint::EmailLink => EMAIL_LINK_SCENARIO.to_string(),
        _ => scenario.to_string(),
    };
    let destination = entry.destination(routes, &scenario);
    ScenarioStart { entry, scenario, destination }
}
