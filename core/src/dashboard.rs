//! Dashboard renderer — reflects the session document onto a page.
//!
//! Counters go into `attempts` / `fails` / `avoided`; the compromised log
//! becomes a header row plus one row per record, newest first, or a single
//! placeholder row when nothing has been captured. Capture times are
//! stored in UTC and shown in the trainee's local time zone.

use crate::{
    page::{ids, ListRow, Page},
    state::SessionState,
    types::Timestamp,
};
use chrono::{Local, TimeZone};
use std::fmt::Display;

pub const EMPTY_LOG_PLACEHOLDER: &str = "No credentials compromised yet. Keep up the good work!";

pub const HEADER_COLUMNS: [&str; 3] = ["Username", "Password", "Time of Theft"];

pub fn render(state: &SessionState, page: &mut Page) {
    render_in(state, page, &Local);
}

/// Same as [`render`], with capture times shown in `tz`.
pub fn render_in<Tz>(state: &SessionState, page: &mut Page, tz: &Tz)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    page.set_text(ids::ATTEMPTS, &state.attempts.to_string());
    page.set_text(ids::FAILS, &state.fails().to_string());
    page.set_text(ids::AVOIDED, &state.avoided.to_string());

    if let Some(list) = page.element_mut(ids::COMPROMISED_LIST) {
        list.rows = compromised_rows(state, tz);
    }
    log::debug!(
        "dashboard rendered on '{}': attempts={} fails={} avoided={}",
        page.name,
        state.attempts,
        state.fails(),
        state.avoided
    );
}

pub fn compromised_rows<Tz>(state: &SessionState, tz: &Tz) -> Vec<ListRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if state.compromised().is_empty() {
        return vec![ListRow::Placeholder { text: EMPTY_LOG_PLACEHOLDER.into() }];
    }

    let mut rows = Vec::with_capacity(state.compromised().len() + 1);
    rows.push(ListRow::Header {
        columns: HEADER_COLUMNS.iter().map(|c| c.to_string()).collect(),
    });
    rows.extend(state.newest_first().map(|record| ListRow::Item {
        username:    record.username.clone(),
        password:    record.password.clone(),
        captured_at: format_capture_time(record.timestamp, tz),
    }));
    rows
}

/// `HH:MM, M/D/YYYY` in `tz`.
pub fn format_capture_time<Tz>(ts: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%H:%M, %-m/%-d/%Y").to_string()
}
