//! Credential capture tests — blank vs. filled submissions on the login form.

use phishtrain_core::{
    capture::{self, Verdict, AVOIDED_MESSAGE, FAILED_MESSAGE, IGNORED_MESSAGE},
    config::PageRoutes,
    page::{ids, Element, Page, SUBMIT_CLASS},
    state::SessionState,
};
use chrono::{TimeZone, Utc};

fn submit(state: &mut SessionState, page: &mut Page, trim: bool) -> Verdict {
    let now = Utc.with_ymd_and_hms(2024, 5, 2, 8, 15, 0).unwrap();
    capture::submit(state, page, Some("bank".into()), now, trim, &PageRoutes::default())
}

#[test]
fn blank_username_counts_as_avoided() {
    let mut state = SessionState::default();
    let mut page = Page::login_form("", "secret");

    let verdict = submit(&mut state, &mut page, true);

    assert_eq!(verdict, Verdict::Avoided);
    assert_eq!(state.avoided, 1);
    assert_eq!(state.fails(), 0);
    assert!(state.compromised().is_empty());

    let result = page.element(ids::RESULT_MSG).unwrap();
    assert_eq!(result.text, AVOIDED_MESSAGE);
    assert_eq!(result.classes, vec!["result", "good"]);
    assert!(result.action.is_none());
}

#[test]
fn blank_password_counts_as_avoided() {
    let mut state = SessionState::default();
    let mut page = Page::login_form("bob@example.com", "");

    assert_eq!(submit(&mut state, &mut page, true), Verdict::Avoided);
    assert_eq!(state.avoided, 1);
    assert!(state.compromised().is_empty());
}

#[test]
fn whitespace_only_fields_are_blank_when_trimming() {
    let mut state = SessionState::default();
    let mut page = Page::login_form("   ", "\t");

    assert_eq!(submit(&mut state, &mut page, true), Verdict::Avoided);
    assert!(state.compromised().is_empty());
}

#[test]
fn whitespace_only_fields_are_captured_without_trimming() {
    let mut state = SessionState::default();
    let mut page = Page::login_form("   ", "\t");

    assert!(matches!(submit(&mut state, &mut page, false), Verdict::Compromised(_)));
    assert_eq!(state.fails(), 1);
}

#[test]
fn filled_form_is_captured_verbatim() {
    let mut state = SessionState::default();
    let mut page = Page::login_form(" carol@example.com ", "p@ss word");

    let verdict = submit(&mut state, &mut page, true);

    let record = match verdict {
        Verdict::Compromised(record) => record,
        other => panic!("expected a compromise, got {other:?}"),
    };
    assert_eq!(record.username, " carol@example.com ");
    assert_eq!(record.password, "p@ss word");
    assert_eq!(record.scenario.as_deref(), Some("bank"));
    assert_eq!(state.fails(), 1);
    assert_eq!(state.avoided, 0);
    assert_eq!(state.compromised(), &[record]);
}

#[test]
fn failure_clears_inputs_and_offers_return_link() {
    let mut state = SessionState::default();
    let mut page = Page::login_form("a", "b");

    submit(&mut state, &mut page, true);

    assert_eq!(page.value(ids::EMAIL), "");
    assert_eq!(page.value(ids::PASSWORD), "");
    let result = page.element(ids::RESULT_MSG).unwrap();
    assert_eq!(result.text, FAILED_MESSAGE);
    assert_eq!(result.classes, vec!["result", "bad"]);
    let link = result.action.as_ref().expect("return link");
    assert_eq!(link.label, "Return to Dashboard");
    assert_eq!(link.href, "dashboard.html");
}

#[test]
fn form_is_locked_after_either_outcome() {
    for (user, pass) in [("", ""), ("a", "b")] {
        let mut state = SessionState::default();
        let mut page = Page::login_form(user, pass);

        submit(&mut state, &mut page, true);

        assert!(page.element(ids::EMAIL).unwrap().disabled);
        assert!(page.element(ids::PASSWORD).unwrap().disabled);
        assert!(page.element(ids::LOGIN_BUTTON).unwrap().hidden);
    }
}

#[test]
fn missing_elements_are_skipped() {
    // A bare page: no inputs, no result target, no button.
    let mut state = SessionState::default();
    let mut page = Page::new("bare");

    assert_eq!(submit(&mut state, &mut page, true), Verdict::Avoided);
    assert_eq!(state.avoided, 1);
}

#[test]
fn submit_control_found_by_class() {
    let mut state = SessionState::default();
    let mut page = Page::new("custom")
        .with_element(ids::EMAIL, Element::input("a"))
        .with_element(ids::PASSWORD, Element::input("b"))
        .with_element("go", Element::default().with_class(SUBMIT_CLASS));

    submit(&mut state, &mut page, true);
    assert!(page.element("go").unwrap().hidden);
}

#[test]
fn ignore_counts_as_avoided() {
    let mut state = SessionState::default();
    let mut page = Page::receive();

    capture::ignore(&mut state, &mut page);

    assert_eq!(state.avoided, 1);
    assert!(state.compromised().is_empty());
    assert_eq!(page.text(ids::RESULT_MSG), Some(IGNORED_MESSAGE));
}

#[test]
fn explicit_values_judged_without_inputs() {
    let mut state = SessionState::default();
    let mut page = Page::dashboard();
    let now = Utc.with_ymd_and_hms(2024, 5, 2, 8, 15, 0).unwrap();

    let verdict = capture::submit_values(
        &mut state,
        &mut page,
        "carol".into(),
        "pw".into(),
        None,
        now,
        true,
        &PageRoutes::default(),
    );

    match verdict {
        Verdict::Compromised(record) => {
            assert_eq!(record.username, "carol");
            assert_eq!(record.timestamp, now);
        }
        other => panic!("expected a compromise, got {other:?}"),
    }
    assert_eq!(state.fails(), 1);
    assert_eq!(state.avoided, 0);
    assert!(page.element(ids::EMAIL).is_none(), "no inputs are created");
}
