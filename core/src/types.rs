//! Shared primitive types used across the trainer.

use chrono::{DateTime, Utc};

/// Identifier of a phishing template ("bank", "paypal", "email", ...).
/// Never validated; whatever the page passes is remembered verbatim.
pub type ScenarioId = String;

/// One trainer instance's activity-log identifier (a v4 UUID).
pub type SessionId = String;

/// Capture and log timestamps are always UTC.
pub type Timestamp = DateTime<Utc>;
