//! The trainer — runs every trainee action through one cycle:
//!
//!   1. load the session document from the store
//!   2. mutate it (scenario / capture / theme / reset)
//!   3. save it back in a single write
//!   4. re-render the dashboard targets on the current page
//!   5. append the resulting events to the activity log
//!
//! RULES:
//!   - Handlers never hold state between calls; the store is the only
//!     source of truth.
//!   - Destructive actions go through a `Confirm` and do nothing on decline.

use crate::{
    capture::{self, Verdict},
    clock::{Clock, SystemClock},
    command::TraineeAction,
    config::TrainerConfig,
    confirm::{Confirm, LOGOUT_PROMPT},
    dashboard,
    error::TrainerResult,
    event::{ActivityLogEntry, AvoidReason, TrainingEvent},
    page::{ids, Page},
    scenario::{self, EntryPoint, EMAIL_LINK_ALERT},
    state::SessionState,
    store::StateStore,
    theme,
    types::{SessionId, Timestamp},
};
use serde::Serialize;

pub const RESET_DONE_ALERT: &str = "Statistics and compromised data have been reset!";

/// What a handler did, for the caller to act on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub events:      Vec<TrainingEvent>,
    /// Page the trainee should be sent to next, if any.
    pub navigate_to: Option<String>,
    /// Blocking messages to show, in order.
    pub alerts:      Vec<String>,
}

impl Outcome {
    fn event(event: TrainingEvent) -> Self {
        Self { events: vec![event], ..Self::default() }
    }
}

pub struct Trainer {
    pub session_id: SessionId,
    pub config:     TrainerConfig,
    pub store:      StateStore,
    clock:          Box<dyn Clock>,
}

impl Trainer {
    pub fn new(store: StateStore, config: TrainerConfig) -> Self {
        let store = store.with_keys(config.storage.clone());
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            config,
            store,
            clock: Box::new(SystemClock),
        }
    }

    /// In-memory store, default config, fixed clock.
    pub fn build_test() -> TrainerResult<Self> {
        let store = StateStore::in_memory()?;
        store.migrate()?;
        Ok(Self::new(store, TrainerConfig::default())
            .with_clock(Box::new(crate::clock::FixedClock::default_test())))
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> SessionState {
        self.store.load()
    }

    /// Dispatch a serialized action. Values carried by the action are
    /// judged as sent, even when `page` lacks the matching inputs.
    pub fn apply(
        &mut self,
        action:  TraineeAction,
        page:    &mut Page,
        confirm: &mut dyn Confirm,
    ) -> TrainerResult<Outcome> {
        match action {
            TraineeAction::ShowDashboard => self.init_page(page),
            TraineeAction::StartScenario { entry, scenario } => {
                self.start_scenario(entry, &scenario, page)
            }
            TraineeAction::ClickEmailLink => self.click_email_link(page),
            TraineeAction::SubmitCredentials { username, password } => {
                self.submit_values(page, username, password)
            }
            TraineeAction::IgnorePhish => self.ignore_phish(page),
            TraineeAction::SetDarkMode { enabled } => self.set_dark_mode(page, enabled),
            TraineeAction::SetSimEmail { target } => self.set_sim_email_to(page, &target),
            TraineeAction::ResetStatistics => self.reset_statistics(page, confirm),
            TraineeAction::Logout => self.logout(confirm),
        }
    }

    /// Page load: restore the theme and fill in the dashboard.
    pub fn init_page(&mut self, page: &mut Page) -> TrainerResult<Outcome> {
        let state = self.store.load();
        theme::apply(&state, page);
        dashboard::render(&state, page);
        Ok(Outcome::default())
    }

    pub fn refresh_dashboard(&self, page: &mut Page) {
        dashboard::render(&self.store.load(), page);
    }

    pub fn start_scenario(
        &mut self,
        entry:    EntryPoint,
        scenario: &str,
        page:     &mut Page,
    ) -> TrainerResult<Outcome> {
        let mut state = self.store.load();
        let start = scenario::begin(&mut state, entry, scenario, &self.config.routes);
        self.store.save(&state)?;
        self.refresh_dashboard(page);
        self.store.set_current_template(&start.scenario)?;

        log::info!(
            "scenario '{}' started via {} -> {}",
            start.scenario,
            entry.as_str(),
            start.destination
        );

        let mut outcome = Outcome::event(TrainingEvent::ScenarioStarted {
            entry,
            scenario:    start.scenario,
            destination: start.destination.clone(),
            attempts:    state.attempts,
        });
        if entry == EntryPoint::EmailLink {
            outcome.alerts.push(EMAIL_LINK_ALERT.into());
        }
        outcome.navigate_to = Some(start.destination);
        self.record(&outcome, self.clock.now())?;
        Ok(outcome)
    }

    /// The link inside the simulated email was clicked.
    pub fn click_email_link(&mut self, page: &mut Page) -> TrainerResult<Outcome> {
        self.start_scenario(EntryPoint::EmailLink, scenario::EMAIL_LINK_SCENARIO, page)
    }

    /// Submit whatever is typed into the form on `page`.
    pub fn submit_credentials(&mut self, page: &mut Page) -> TrainerResult<Outcome> {
        let username = page.value(ids::EMAIL);
        let password = page.value(ids::PASSWORD);
        self.submit_values(page, username, password)
    }

    pub fn submit_values(
        &mut self,
        page:     &mut Page,
        username: String,
        password: String,
    ) -> TrainerResult<Outcome> {
        let now = self.clock.now();
        let mut state = self.store.load();
        let active = self.store.current_template()?;
        let verdict = capture::submit_values(
            &mut state,
            page,
            username,
            password,
            active,
            now,
            self.config.trim_credentials,
            &self.config.routes,
        );
        self.store.save(&state)?;
        self.refresh_dashboard(page);

        let outcome = match verdict {
            Verdict::Avoided => {
                log::info!("blank submission, attack avoided (avoided={})", state.avoided);
                Outcome::event(TrainingEvent::AttackAvoided {
                    reason:  AvoidReason::BlankSubmission,
                    avoided: state.avoided,
                })
            }
            Verdict::Compromised(record) => {
                log::info!(
                    "credentials captured for '{}' (fails={})",
                    record.username,
                    state.fails()
                );
                Outcome::event(TrainingEvent::CredentialsCompromised {
                    scenario: record.scenario,
                    username: record.username,
                    fails:    state.fails(),
                })
            }
        };
        self.record(&outcome, now)?;
        Ok(outcome)
    }

    pub fn ignore_phish(&mut self, page: &mut Page) -> TrainerResult<Outcome> {
        let mut state = self.store.load();
        capture::ignore(&mut state, page);
        self.store.save(&state)?;
        self.refresh_dashboard(page);

        log::info!("phishing attempt ignored (avoided={})", state.avoided);
        let outcome = Outcome::event(TrainingEvent::AttackAvoided {
            reason:  AvoidReason::Ignored,
            avoided: state.avoided,
        });
        self.record(&outcome, self.clock.now())?;
        Ok(outcome)
    }

    pub fn set_dark_mode(&mut self, page: &mut Page, enabled: bool) -> TrainerResult<Outcome> {
        let mut state = self.store.load();
        theme::set_dark_mode(&mut state, page, enabled);
        self.store.save(&state)?;

        let outcome = Outcome::event(TrainingEvent::DarkModeChanged { enabled });
        self.record(&outcome, self.clock.now())?;
        Ok(outcome)
    }

    pub fn reset_statistics(
        &mut self,
        page:    &mut Page,
        confirm: &mut dyn Confirm,
    ) -> TrainerResult<Outcome> {
        let outcome = match self.store.reset(confirm)? {
            Some(state) => {
                dashboard::render(&state, page);
                Outcome {
                    events: vec![TrainingEvent::StatisticsReset],
                    alerts: vec![RESET_DONE_ALERT.into()],
                    ..Outcome::default()
                }
            }
            None => Outcome::event(TrainingEvent::ResetDeclined),
        };
        self.record(&outcome, self.clock.now())?;
        Ok(outcome)
    }

    /// Leave for the welcome page once confirmed; stay put otherwise.
    pub fn logout(&mut self, confirm: &mut dyn Confirm) -> TrainerResult<Outcome> {
        let outcome = if confirm.confirm(LOGOUT_PROMPT) {
            let destination = self.config.routes.welcome.clone();
            log::info!("logged out -> {destination}");
            Outcome {
                events:      vec![TrainingEvent::LoggedOut { destination: destination.clone() }],
                navigate_to: Some(destination),
                ..Outcome::default()
            }
        } else {
            Outcome::event(TrainingEvent::LogoutDeclined)
        };
        self.record(&outcome, self.clock.now())?;
        Ok(outcome)
    }

    /// Copy the typed target address into the simulated email. Blank input
    /// is ignored.
    pub fn set_sim_email(&mut self, page: &mut Page) -> TrainerResult<Outcome> {
        let input = page.value(ids::TARGET_EMAIL_INPUT);
        self.set_sim_email_to(page, &input)
    }

    pub fn set_sim_email_to(&mut self, page: &mut Page, target: &str) -> TrainerResult<Outcome> {
        if target.trim().is_empty() {
            return Ok(Outcome::default());
        }
        page.set_value(ids::TARGET_EMAIL_INPUT, target);
        page.set_text(ids::SIM_EMAIL_TARGET, target);

        let outcome = Outcome {
            events: vec![TrainingEvent::SimEmailTargetChanged { target: target.to_string() }],
            alerts: vec![format!("Simulated email target updated to: {target}")],
            ..Outcome::default()
        };
        self.record(&outcome, self.clock.now())?;
        Ok(outcome)
    }

    /// Activity log for this trainer's session, oldest first.
    pub fn session_events(&self) -> TrainerResult<Vec<TrainingEvent>> {
        self.store
            .events_for_session(&self.session_id)?
            .into_iter()
            .map(|entry| -> TrainerResult<TrainingEvent> {
                Ok(serde_json::from_str(&entry.payload)?)
            })
            .collect()
    }

    /// Every entry of one action shares the action's timestamp.
    fn record(&self, outcome: &Outcome, at: Timestamp) -> TrainerResult<()> {
        for event in &outcome.events {
            let entry = ActivityLogEntry {
                id:          None,
                session_id:  self.session_id.clone(),
                recorded_at: at.to_rfc3339(),
                event_type:  event.kind().to_string(),
                payload:     serde_json::to_string(event)?,
            };
            self.store.append_event(&entry)?;
        }
        Ok(())
    }
}
