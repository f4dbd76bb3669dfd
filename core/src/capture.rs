//! Credential capture on the fake login form.
//!
//! A submission with either field blank is an avoided attack. Anything
//! else is a failure: the raw values are appended to the compromised log,
//! the inputs are cleared, and a return-to-dashboard link is offered.
//! Either way the form is locked afterwards.

use crate::{
    config::PageRoutes,
    page::{ids, Link, Page, SUBMIT_CLASS},
    state::{CompromisedRecord, SessionState},
    types::{ScenarioId, Timestamp},
};

pub const AVOIDED_MESSAGE: &str =
    "✅ Success! You avoided the attack by NOT entering credentials.";
pub const FAILED_MESSAGE: &str =
    "⚠️ Failed! You fell for the phishing attack by entering credentials.";
pub const IGNORED_MESSAGE: &str =
    "✅ Excellent! You successfully identified and ignored the phishing attempt.";

pub const RESULT_GOOD_CLASS: &str = "result good";
pub const RESULT_BAD_CLASS: &str = "result bad";

pub const RETURN_LABEL: &str = "Return to Dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Avoided,
    Compromised(CompromisedRecord),
}

/// True when the submission should count as avoided.
pub fn is_blank_submission(username: &str, password: &str, trim: bool) -> bool {
    let blank = |s: &str| if trim { s.trim().is_empty() } else { s.is_empty() };
    blank(username) || blank(password)
}

/// Judge the form as it stands on `page` and update `state` accordingly.
pub fn submit(
    state:    &mut SessionState,
    page:     &mut Page,
    scenario: Option<ScenarioId>,
    now:      Timestamp,
    trim:     bool,
    routes:   &PageRoutes,
) -> Verdict {
    let username = page.value(ids::EMAIL);
    let password = page.value(ids::PASSWORD);
    submit_values(state, page, username, password, scenario, now, trim, routes)
}

/// Judge the given credentials, whatever page they were sent from. The
/// result message, input clearing and form lock still land on `page`
/// where its elements exist.
#[allow(clippy::too_many_arguments)]
pub fn submit_values(
    state:    &mut SessionState,
    page:     &mut Page,
    username: String,
    password: String,
    scenario: Option<ScenarioId>,
    now:      Timestamp,
    trim:     bool,
    routes:   &PageRoutes,
) -> Verdict {
    let verdict = if is_blank_submission(&username, &password, trim) {
        state.record_avoided();
        show_result(page, AVOIDED_MESSAGE, RESULT_GOOD_CLASS, None);
        Verdict::Avoided
    } else {
        let record = CompromisedRecord {
            username,
            password,
            timestamp: now,
            scenario,
        };
        state.record_compromise(record.clone());

        page.set_value(ids::EMAIL, "");
        page.set_value(ids::PASSWORD, "");
        let back = Link {
            label: RETURN_LABEL.into(),
            href:  routes.dashboard.clone(),
        };
        show_result(page, FAILED_MESSAGE, RESULT_BAD_CLASS, Some(back));
        Verdict::Compromised(record)
    };

    lock_form(page);
    verdict
}

/// Explicit dismissal of the scenario.
pub fn ignore(state: &mut SessionState, page: &mut Page) {
    state.record_avoided();
    show_result(page, IGNORED_MESSAGE, RESULT_GOOD_CLASS, None);
}

fn show_result(page: &mut Page, message: &str, class_name: &str, action: Option<Link>) {
    if let Some(result) = page.element_mut(ids::RESULT_MSG) {
        result.text = message.to_string();
        result.set_class_name(class_name);
        result.action = action;
    }
}

fn lock_form(page: &mut Page) {
    for id in [ids::EMAIL, ids::PASSWORD] {
        if let Some(input) = page.element_mut(id) {
            input.disabled = true;
        }
    }
    if let Some(button) = page.first_with_class_mut(SUBMIT_CLASS) {
        button.hidden = true;
    }
}
