//! Dashboard rendering tests — counters, placeholder, newest-first log.

use phishtrain_core::{
    dashboard::{self, format_capture_time, EMPTY_LOG_PLACEHOLDER, HEADER_COLUMNS},
    page::{ids, ListRow, Page},
    state::{CompromisedRecord, SessionState},
};
use chrono::{Duration, FixedOffset, TimeZone, Utc};

fn state_with_captures(names: &[&str]) -> SessionState {
    let start = Utc.with_ymd_and_hms(2024, 1, 15, 9, 5, 0).unwrap();
    let mut state = SessionState::default();
    for (i, name) in names.iter().enumerate() {
        state.record_attempt();
        state.record_compromise(CompromisedRecord {
            username:  name.to_string(),
            password:  format!("{name}-pw"),
            timestamp: start + Duration::minutes(i as i64),
            scenario:  None,
        });
    }
    state
}

#[test]
fn counters_written_to_targets() {
    let mut state = state_with_captures(&["a", "b"]);
    state.record_avoided();
    state.record_attempt();
    let mut page = Page::dashboard();

    dashboard::render(&state, &mut page);

    assert_eq!(page.text(ids::ATTEMPTS), Some("3"));
    assert_eq!(page.text(ids::FAILS), Some("2"));
    assert_eq!(page.text(ids::AVOIDED), Some("1"));
}

#[test]
fn empty_log_shows_placeholder_exactly_once() {
    let mut page = Page::dashboard();

    dashboard::render(&SessionState::default(), &mut page);
    dashboard::render(&SessionState::default(), &mut page);

    let rows = &page.element(ids::COMPROMISED_LIST).unwrap().rows;
    let placeholders = rows
        .iter()
        .filter(|r| matches!(r, ListRow::Placeholder { text } if text == EMPTY_LOG_PLACEHOLDER))
        .count();
    assert_eq!(placeholders, 1);
    assert_eq!(rows.len(), 1);
}

#[test]
fn log_rendered_newest_first_under_header() {
    let state = state_with_captures(&["first", "second", "third"]);
    let rows = dashboard::compromised_rows(&state, &Utc);

    assert_eq!(rows.len(), 4);
    assert_eq!(
        rows[0],
        ListRow::Header { columns: HEADER_COLUMNS.iter().map(|c| c.to_string()).collect() }
    );
    let usernames: Vec<&str> = rows[1..]
        .iter()
        .map(|r| match r {
            ListRow::Item { username, .. } => username.as_str(),
            other => panic!("unexpected row {other:?}"),
        })
        .collect();
    assert_eq!(usernames, vec!["third", "second", "first"]);
}

#[test]
fn rows_carry_password_and_formatted_time() {
    let state = state_with_captures(&["only"]);
    let rows = dashboard::compromised_rows(&state, &Utc);

    assert_eq!(
        rows[1],
        ListRow::Item {
            username:    "only".into(),
            password:    "only-pw".into(),
            captured_at: "09:05, 1/15/2024".into(),
        }
    );
}

#[test]
fn capture_time_format() {
    let ts = Utc.with_ymd_and_hms(2023, 11, 3, 17, 42, 9).unwrap();
    assert_eq!(format_capture_time(ts, &Utc), "17:42, 11/3/2023");
}

#[test]
fn capture_time_shown_in_the_trainee_zone() {
    let ts = Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap();
    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

    assert_eq!(format_capture_time(ts, &new_york), "18:30, 1/15/2024");
    // Crosses midnight, so the date moves too.
    assert_eq!(format_capture_time(ts, &tokyo), "08:30, 1/16/2024");
}

#[test]
fn render_in_uses_the_given_zone_for_rows() {
    let state = state_with_captures(&["only"]);
    let mut page = Page::dashboard();
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

    dashboard::render_in(&state, &mut page, &plus_two);

    let rows = &page.element(ids::COMPROMISED_LIST).unwrap().rows;
    match &rows[1] {
        ListRow::Item { captured_at, .. } => assert_eq!(captured_at, "11:05, 1/15/2024"),
        other => panic!("unexpected row {other:?}"),
    }
}

#[test]
fn pages_without_targets_render_quietly() {
    let state = state_with_captures(&["a"]);
    let mut page = Page::login_form("", "");

    dashboard::render(&state, &mut page);

    assert!(page.element(ids::ATTEMPTS).is_none());
    assert!(page.element(ids::COMPROMISED_LIST).is_none());
}
