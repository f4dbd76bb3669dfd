//! In-memory page model.
//!
//! Handlers only ever touch elements by their fixed ids. An element that
//! is not on the current page is skipped silently; reading the value of a
//! missing input yields "".

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Fixed element identifiers shared with the training pages.
pub mod ids {
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const RESULT_MSG: &str = "resultMsg";
    pub const ATTEMPTS: &str = "attempts";
    pub const FAILS: &str = "fails";
    pub const AVOIDED: &str = "avoided";
    pub const COMPROMISED_LIST: &str = "compromisedList";
    pub const TOGGLE_DARK: &str = "toggleDark";
    pub const SIM_EMAIL_LINK: &str = "simEmailLink";
    pub const TARGET_EMAIL_INPUT: &str = "targetEmailInput";
    pub const SIM_EMAIL_TARGET: &str = "simEmailTarget";
    pub const LOGIN_BUTTON: &str = "loginButton";
}

/// Class carried by the login form's submit control.
pub const SUBMIT_CLASS: &str = "login-btn";

/// Body class toggled by the theme preference.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href:  String,
}

/// A row of the compromised-credentials list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListRow {
    Placeholder { text: String },
    Header { columns: Vec<String> },
    Item { username: String, password: String, captured_at: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub classes:  Vec<String>,
    pub text:     String,
    pub value:    String,
    pub checked:  bool,
    pub disabled: bool,
    pub hidden:   bool,
    pub action:   Option<Link>,
    pub rows:     Vec<ListRow>,
}

impl Element {
    pub fn input(value: &str) -> Self {
        Self { value: value.to_string(), ..Self::default() }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Replace the whole class list, the way `el.className = "..."` does.
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name.split_whitespace().map(str::to_string).collect();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub name:         String,
    pub body_classes: BTreeSet<String>,
    elements:         BTreeMap<String, Element>,
}

impl Page {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    pub fn with_element(mut self, id: &str, element: Element) -> Self {
        self.elements.insert(id.to_string(), element);
        self
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn first_with_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.elements.values_mut().find(|el| el.has_class(class))
    }

    /// Current value of an input, "" when the input is absent.
    pub fn value(&self, id: &str) -> String {
        self.element(id).map(|el| el.value.clone()).unwrap_or_default()
    }

    pub fn set_value(&mut self, id: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.value = value.to_string();
        }
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(|el| el.text.as_str())
    }

    pub fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.element_mut(id) {
            el.text = text.to_string();
        }
    }

    pub fn set_body_class(&mut self, class: &str, on: bool) {
        if on {
            self.body_classes.insert(class.to_string());
        } else {
            self.body_classes.remove(class);
        }
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    // ── Templates ──────────────────────────────────────────────

    pub fn dashboard() -> Self {
        Self::new("dashboard")
            .with_element(ids::ATTEMPTS, Element::default())
            .with_element(ids::FAILS, Element::default())
            .with_element(ids::AVOIDED, Element::default())
            .with_element(ids::COMPROMISED_LIST, Element::default())
            .with_element(ids::TOGGLE_DARK, Element::default())
            .with_element(ids::TARGET_EMAIL_INPUT, Element::default())
            .with_element(ids::SIM_EMAIL_TARGET, Element::default())
    }

    /// The fake login form, pre-filled with whatever the trainee typed.
    pub fn login_form(username: &str, password: &str) -> Self {
        Self::new("simulation")
            .with_element(ids::EMAIL, Element::input(username))
            .with_element(ids::PASSWORD, Element::input(password))
            .with_element(ids::RESULT_MSG, Element::default())
            .with_element(ids::LOGIN_BUTTON, Element::default().with_class(SUBMIT_CLASS))
            .with_element(ids::TOGGLE_DARK, Element::default())
    }

    /// The simulated inbox with the suspicious link.
    pub fn receive() -> Self {
        Self::new("receive")
            .with_element(ids::SIM_EMAIL_LINK, Element::default())
            .with_element(ids::RESULT_MSG, Element::default())
            .with_element(ids::TOGGLE_DARK, Element::default())
    }
}
