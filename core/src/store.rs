//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Everything else sees a string key/value store holding one session
//! document, plus an append-only activity log.

use crate::{
    config::StorageKeys,
    confirm::{Confirm, RESET_PROMPT},
    error::TrainerResult,
    event::ActivityLogEntry,
    state::SessionState,
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct StateStore {
    conn: Connection,
    keys: StorageKeys,
}

impl StateStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: &str) -> TrainerResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn, keys: StorageKeys::default() })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> TrainerResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, keys: StorageKeys::default() })
    }

    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> TrainerResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_local_storage.sql"))?;
        Ok(())
    }

    // ── Key/value ──────────────────────────────────────────────

    pub fn get_item(&self, key: &str) -> TrainerResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_item(&self, key: &str, value: &str) -> TrainerResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> TrainerResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Session document ───────────────────────────────────────

    /// The stored session, or a zeroed one. Never fails: unreadable or
    /// malformed storage is logged and treated as absent.
    pub fn load(&self) -> SessionState {
        let raw = match self.get_item(&self.keys.state_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SessionState::default(),
            Err(e) => {
                log::warn!("session read failed, starting from defaults: {e}");
                return SessionState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("session document is malformed, starting from defaults: {e}");
                SessionState::default()
            }
        }
    }

    /// Overwrite the stored session in a single write.
    pub fn save(&self, state: &SessionState) -> TrainerResult<()> {
        let json = serde_json::to_string(state)?;
        self.set_item(&self.keys.state_key, &json)?;
        log::debug!(
            "session saved: attempts={} fails={} avoided={}",
            state.attempts,
            state.fails(),
            state.avoided
        );
        Ok(())
    }

    /// Zero the counters and clear the compromised log once `confirm`
    /// agrees. Returns the cleared state, or `None` when declined.
    pub fn reset(&self, confirm: &mut dyn Confirm) -> TrainerResult<Option<SessionState>> {
        if !confirm.confirm(RESET_PROMPT) {
            log::info!("reset declined");
            return Ok(None);
        }
        let mut state = self.load();
        state.clear_statistics();
        self.save(&state)?;
        log::info!("statistics and compromised data reset");
        Ok(Some(state))
    }

    // ── Active scenario ────────────────────────────────────────

    pub fn current_template(&self) -> TrainerResult<Option<String>> {
        self.get_item(&self.keys.template_key)
    }

    pub fn set_current_template(&self, scenario: &str) -> TrainerResult<()> {
        self.set_item(&self.keys.template_key, scenario)
    }

    // ── Activity log ───────────────────────────────────────────

    pub fn append_event(&self, entry: &ActivityLogEntry) -> TrainerResult<()> {
        self.conn.execute(
            "INSERT INTO activity_log (session_id, recorded_at, event_type, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.session_id,
                entry.recorded_at,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_session(&self, session_id: &str) -> TrainerResult<Vec<ActivityLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, recorded_at, event_type, payload
             FROM activity_log WHERE session_id = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![session_id], |row| {
                Ok(ActivityLogEntry {
                    id:          Some(row.get(0)?),
                    session_id:  row.get(1)?,
                    recorded_at: row.get(2)?,
                    event_type:  row.get(3)?,
                    payload:     row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self) -> TrainerResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM activity_log", [], |row| row.get(0))?;
        Ok(count)
    }
}
