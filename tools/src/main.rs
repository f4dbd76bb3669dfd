//! trainer-cli: headless driver for the phishing-awareness trainer.
//!
//! Usage:
//!   trainer-cli --db trainer.db dashboard
//!   trainer-cli --db trainer.db start simulation bank
//!   trainer-cli --db trainer.db submit alice@example.com hunter2
//!   trainer-cli --db trainer.db --yes reset
//!   trainer-cli --db trainer.db --ipc-mode

use anyhow::{bail, Context, Result};
use phishtrain_core::{
    command::TraineeAction,
    confirm::{Confirm, FixedAnswer},
    config::TrainerConfig,
    page::{ids, ListRow, Page, DARK_CLASS},
    store::StateStore,
    trainer::{Outcome, Trainer},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Serialize)]
struct UiState {
    attempts:    u64,
    fails:       u64,
    avoided:     u64,
    dark_mode:   bool,
    page:        Page,
    outcome:     Outcome,
}

/// Asks on stderr, reads y/N from stdin.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let db = flag_value(&args, "--db").unwrap_or("trainer.db");
    let config = match flag_value(&args, "--config") {
        Some(path) => TrainerConfig::from_file(path)?,
        None => TrainerConfig::default(),
    };
    let assume_yes = args.iter().any(|a| a == "--yes");
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let store = StateStore::open(db).with_context(|| format!("opening {db}"))?;
    store.migrate()?;
    let mut trainer = Trainer::new(store, config);
    log::debug!("session {} on {db}", trainer.session_id);

    let mut confirm: Box<dyn Confirm> = if assume_yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(StdinConfirm)
    };

    if ipc_mode {
        return run_ipc_loop(&mut trainer);
    }

    let positional = positional_args(&args);
    let (action, mut page) = parse_action(&positional)?;
    trainer.init_page(&mut page)?;
    let outcome = trainer.apply(action, &mut page, &mut *confirm)?;
    print_outcome(&outcome);

    // Whatever page the action ran on, finish by showing the dashboard.
    let mut dash = Page::dashboard();
    trainer.init_page(&mut dash)?;
    print_dashboard(&dash);
    Ok(())
}

/// One JSON `TraineeAction` per line in, one JSON `UiState` per line out.
/// Confirmations are always declined in this mode unless the action is
/// sent with an explicit `"confirm": true`.
fn run_ipc_loop(trainer: &mut Trainer) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if line.trim() == "quit" {
            break;
        }
        writeln!(stdout, "{}", handle_line(trainer, &line))?;
        stdout.flush()?;
    }
    Ok(())
}

/// Reply for one IPC line: the `UiState` after the action, or
/// `{"error": ...}` when the line cannot be applied.
fn handle_line(trainer: &mut Trainer, line: &str) -> serde_json::Value {
    match apply_line(trainer, line) {
        Ok(ui) => ui,
        Err(e) => {
            log::warn!("ipc line rejected: {e:#}");
            serde_json::json!({ "error": format!("{e:#}") })
        }
    }
}

fn apply_line(trainer: &mut Trainer, line: &str) -> Result<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(line).context("malformed JSON")?;
    let confirmed = value["confirm"].as_bool().unwrap_or(false);
    let action: TraineeAction = serde_json::from_value(value).context("unknown action")?;

    let mut page = page_for(&action);
    trainer.init_page(&mut page)?;
    let outcome = trainer.apply(action, &mut page, &mut FixedAnswer(confirmed))?;
    let state = trainer.state();
    let ui = UiState {
        attempts: state.attempts,
        fails: state.fails(),
        avoided: state.avoided,
        dark_mode: state.dark_mode,
        page,
        outcome,
    };
    Ok(serde_json::to_value(&ui)?)
}

fn parse_action(positional: &[&str]) -> Result<(TraineeAction, Page)> {
    let action = match positional {
        [] | ["dashboard"] => TraineeAction::ShowDashboard,
        ["start", entry, scenario] => TraineeAction::StartScenario {
            entry:    entry.parse()?,
            scenario: scenario.to_string(),
        },
        ["click-link"] => TraineeAction::ClickEmailLink,
        ["submit", username, password] => TraineeAction::SubmitCredentials {
            username: username.to_string(),
            password: password.to_string(),
        },
        ["ignore"] => TraineeAction::IgnorePhish,
        ["dark", "on"] => TraineeAction::SetDarkMode { enabled: true },
        ["dark", "off"] => TraineeAction::SetDarkMode { enabled: false },
        ["set-target", target] => TraineeAction::SetSimEmail { target: target.to_string() },
        ["reset"] => TraineeAction::ResetStatistics,
        ["logout"] => TraineeAction::Logout,
        other => bail!("Unknown command: {}", other.join(" ")),
    };
    let page = page_for(&action);
    Ok((action, page))
}

/// The page each action is normally triggered from.
fn page_for(action: &TraineeAction) -> Page {
    match action {
        TraineeAction::SubmitCredentials { .. } => Page::login_form("", ""),
        TraineeAction::IgnorePhish | TraineeAction::ClickEmailLink => Page::receive(),
        _ => Page::dashboard(),
    }
}

fn print_outcome(outcome: &Outcome) {
    for alert in &outcome.alerts {
        println!("[alert] {alert}");
    }
    if let Some(dest) = &outcome.navigate_to {
        println!("-> navigating to {dest}");
    }
}

fn print_dashboard(page: &Page) {
    let text = |id: &str| page.text(id).unwrap_or("-").to_string();

    println!();
    println!("=== PHISHING TRAINER DASHBOARD ===");
    println!("  as of:     {}", chrono::Local::now().format("%Y-%m-%d %H:%M"));
    println!("  theme:     {}", if page.has_body_class(DARK_CLASS) { "dark" } else { "light" });
    println!("  attempts:  {}", text(ids::ATTEMPTS));
    println!("  fails:     {}", text(ids::FAILS));
    println!("  avoided:   {}", text(ids::AVOIDED));
    println!();
    println!("=== COMPROMISED CREDENTIALS ===");

    let rows = page
        .element(ids::COMPROMISED_LIST)
        .map(|el| el.rows.as_slice())
        .unwrap_or_default();
    for row in rows {
        match row {
            ListRow::Placeholder { text } => println!("  ({text})"),
            ListRow::Header { columns } => {
                println!("  {:<28} {:<20} {}", columns[0], columns[1], columns[2])
            }
            ListRow::Item { username, password, captured_at } => {
                println!("  {username:<28} {password:<20} {captured_at}")
            }
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Everything that is not a flag or a flag's value.
fn positional_args(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        match arg.as_str() {
            "--db" | "--config" => skip_next = true,
            "--yes" | "--ipc-mode" => {}
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishtrain_core::scenario::EntryPoint;

    fn trainer() -> Trainer {
        let _ = env_logger::builder().is_test(true).try_init();
        Trainer::build_test().expect("build test trainer")
    }

    fn send(trainer: &mut Trainer, line: &str) -> serde_json::Value {
        handle_line(trainer, line)
    }

    // ── IPC ─────────────────────────────────────────────────────

    #[test]
    fn ipc_reset_needs_explicit_confirm() {
        let mut trainer = trainer();
        send(&mut trainer, r#"{"action":"submit_credentials","username":"a","password":"b"}"#);

        let declined = send(&mut trainer, r#"{"action":"reset_statistics"}"#);
        assert_eq!(declined["fails"], 1, "reset without confirm must keep stats");
        assert_eq!(declined["outcome"]["events"][0]["type"], "reset_declined");

        let accepted = send(&mut trainer, r#"{"action":"reset_statistics","confirm":true}"#);
        assert_eq!(accepted["fails"], 0);
        assert_eq!(accepted["attempts"], 0);
        assert_eq!(trainer.state().compromised().len(), 0);
    }

    #[test]
    fn ipc_logout_needs_explicit_confirm() {
        let mut trainer = trainer();

        let declined = send(&mut trainer, r#"{"action":"logout"}"#);
        assert!(declined["outcome"]["navigate_to"].is_null());

        let accepted = send(&mut trainer, r#"{"action":"logout","confirm":true}"#);
        assert_eq!(accepted["outcome"]["navigate_to"], "welcome.html");
    }

    #[test]
    fn ipc_submit_reports_counters_and_page() {
        let mut trainer = trainer();

        let ui = send(&mut trainer, r#"{"action":"submit_credentials","username":"a","password":"b"}"#);

        assert_eq!(ui["fails"], 1);
        assert_eq!(ui["avoided"], 0);
        assert_eq!(ui["page"]["name"], "simulation");
        assert_eq!(ui["dark_mode"], false);
    }

    #[test]
    fn ipc_bad_lines_answer_with_error() {
        let mut trainer = trainer();

        let malformed = send(&mut trainer, "{not json");
        assert!(malformed["error"].as_str().unwrap().contains("malformed JSON"));

        let unknown = send(&mut trainer, r#"{"action":"launch_missiles"}"#);
        assert!(unknown["error"].as_str().unwrap().contains("unknown action"));

        assert_eq!(trainer.state().attempts, 0, "rejected lines must not touch state");
    }

    // ── One-shot commands ───────────────────────────────────────

    #[test]
    fn parse_every_command_form() {
        let cases: Vec<(Vec<&str>, TraineeAction)> = vec![
            (vec![], TraineeAction::ShowDashboard),
            (vec!["dashboard"], TraineeAction::ShowDashboard),
            (
                vec!["start", "analysis", "bank"],
                TraineeAction::StartScenario { entry: EntryPoint::Analysis, scenario: "bank".into() },
            ),
            (vec!["click-link"], TraineeAction::ClickEmailLink),
            (
                vec!["submit", "a", "b"],
                TraineeAction::SubmitCredentials { username: "a".into(), password: "b".into() },
            ),
            (vec!["ignore"], TraineeAction::IgnorePhish),
            (vec!["dark", "on"], TraineeAction::SetDarkMode { enabled: true }),
            (vec!["dark", "off"], TraineeAction::SetDarkMode { enabled: false }),
            (
                vec!["set-target", "ceo@corp.test"],
                TraineeAction::SetSimEmail { target: "ceo@corp.test".into() },
            ),
            (vec!["reset"], TraineeAction::ResetStatistics),
            (vec!["logout"], TraineeAction::Logout),
        ];
        for (args, expected) in cases {
            let (action, _) = parse_action(&args).unwrap();
            assert_eq!(action, expected, "args {args:?}");
        }
    }

    #[test]
    fn parse_rejects_unknown_input() {
        let err = parse_action(&["fly"]).unwrap_err();
        assert!(err.to_string().contains("Unknown command: fly"));

        assert!(parse_action(&["dark", "maybe"]).is_err());
        assert!(parse_action(&["start", "nowhere", "bank"]).is_err());
    }

    #[test]
    fn actions_run_on_their_usual_page() {
        let submit = TraineeAction::SubmitCredentials { username: "a".into(), password: "b".into() };
        assert_eq!(page_for(&submit).name, "simulation");
        assert_eq!(page_for(&TraineeAction::IgnorePhish).name, "receive");
        assert_eq!(page_for(&TraineeAction::ClickEmailLink).name, "receive");
        assert_eq!(page_for(&TraineeAction::Logout).name, "dashboard");
    }

    #[test]
    fn flags_and_positionals_are_split() {
        let args: Vec<String> = ["--db", "x.db", "--yes", "submit", "a", "--config", "c.json", "b"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(flag_value(&args, "--db"), Some("x.db"));
        assert_eq!(flag_value(&args, "--config"), Some("c.json"));
        assert_eq!(flag_value(&args, "--missing"), None);
        assert_eq!(positional_args(&args), vec!["submit", "a", "b"]);
    }
}
