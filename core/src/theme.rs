//! Dark-mode preference.

use crate::{
    page::{ids, Page, DARK_CLASS},
    state::SessionState,
};

/// Reflect the stored preference onto a freshly loaded page.
pub fn apply(state: &SessionState, page: &mut Page) {
    page.set_body_class(DARK_CLASS, state.dark_mode);
    if let Some(toggle) = page.element_mut(ids::TOGGLE_DARK) {
        toggle.checked = state.dark_mode;
    }
}

/// Flip the preference from the toggle and restyle the page.
pub fn set_dark_mode(state: &mut SessionState, page: &mut Page, enabled: bool) {
    state.dark_mode = enabled;
    apply(state, page);
}
