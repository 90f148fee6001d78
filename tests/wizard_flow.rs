//! End-to-end tests for the onboarding wizard.
//!
//! The library-level tests walk the state machine directly; the terminal
//! tests feed scripted lines through `TerminalDriver` and inspect what was
//! printed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use onboarding_wizard::config::OutputFormat;
use onboarding_wizard::terminal::{Console, TerminalDriver};
use onboarding_wizard::wizard::{
    EMPTY_RESULTS_MESSAGE, FormStore, Step, StoreEvent, SubStep, Wizard,
};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Console that replays fixed input and records output.
struct ScriptedConsole {
    input: VecDeque<String>,
    output: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConsole {
    fn new(lines: &[&str]) -> (Self, Arc<Mutex<Vec<String>>>) {
        let output = Arc::new(Mutex::new(Vec::new()));
        let console = Self {
            input: lines.iter().map(|l| l.to_string()).collect(),
            output: Arc::clone(&output),
        };
        (console, output)
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    async fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.output.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

fn printed(output: &Arc<Mutex<Vec<String>>>) -> String {
    output.lock().unwrap().join("\n")
}

#[test]
fn full_scenario_with_restart() {
    let mut wizard = Wizard::default();
    assert_eq!(wizard.state().step, Step::First);
    assert_eq!(wizard.sub_step(), SubStep::Name);

    wizard.submit_name("Jane", "Doe").unwrap();
    assert_eq!(wizard.sub_step(), SubStep::Phone);
    assert_eq!(wizard.state().firstname, "Jane");
    assert_eq!(wizard.state().lastname, "Doe");

    wizard.choose_country("US").unwrap();
    wizard.submit_phone("2025550123").unwrap();
    assert_eq!(wizard.state().step, Step::First);
    assert_eq!(wizard.sub_step(), SubStep::Confirmation);

    let summary = wizard.summary().unwrap();
    assert_eq!(summary.full_name(), "Jane Doe");
    assert_eq!(summary.phone_e164, "+12025550123");

    wizard.back_to_start().unwrap();
    let state = wizard.state();
    assert_eq!((state.step, state.sub_step), (Step::First, SubStep::Name));
    assert_eq!(state.firstname, "Jane");
    assert_eq!(state.lastname, "Doe");
    assert_eq!(state.phone_number, "2025550123");
    assert_eq!(state.country.code, "US");
}

#[test]
fn store_broadcasts_each_transition() {
    let store = FormStore::default();
    let mut rx = store.subscribe();
    let mut wizard = Wizard::new(store);

    wizard.submit_name("Jane", "Doe").unwrap();
    wizard.submit_phone("020 7946 0958").unwrap();

    let events: Vec<StoreEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    let transitions: Vec<(SubStep, SubStep)> = events
        .iter()
        .filter_map(|e| match e {
            StoreEvent::SubStepChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            (SubStep::Name, SubStep::Phone),
            (SubStep::Phone, SubStep::Confirmation)
        ]
    );
}

#[tokio::test]
async fn terminal_walks_through_to_confirmation() {
    let (console, output) = ScriptedConsole::new(&[
        "Jane",
        "Doe",
        "/country",
        "united",
        "US",
        "2025550123",
        "/quit",
    ]);
    let driver = TerminalDriver::new(Wizard::default(), console, OutputFormat::Text);

    let summary = timeout(TEST_TIMEOUT, driver.run())
        .await
        .expect("driver hung")
        .unwrap()
        .expect("wizard should complete");

    assert_eq!(summary.country.code, "US");
    assert_eq!(summary.phone_e164, "+12025550123");

    let text = printed(&output);
    assert!(text.contains("Let's validate your number"));
    assert!(text.contains("United Kingdom"));
    assert!(text.contains("Selected"));
    assert!(text.contains("Welcome, Jane Doe!"));
}

#[tokio::test]
async fn terminal_shows_inline_errors_and_retries() {
    let (console, output) = ScriptedConsole::new(&[
        "J0",
        "Doe",
        "Jane",
        "Doe",
        "",
        "/back",
        "",
        "",
        "020 7946 0958",
        "/quit",
    ]);
    let driver = TerminalDriver::new(Wizard::default(), console, OutputFormat::Text);

    let summary = timeout(TEST_TIMEOUT, driver.run())
        .await
        .expect("driver hung")
        .unwrap()
        .expect("wizard should complete");

    // Empty lines after /back kept the stored names.
    assert_eq!(summary.lastname, "Doe");
    assert_eq!(summary.phone_e164, "+442079460958");

    let text = printed(&output);
    assert!(text.contains("! First name is required"));
    assert!(text.contains("! Phone number is required"));
    assert!(text.contains("Last name [Doe]:"));
}

#[tokio::test]
async fn terminal_country_search_without_match() {
    let (console, output) = ScriptedConsole::new(&["Jane", "Doe", "/country", "zz", "/close"]);
    let driver = TerminalDriver::new(Wizard::default(), console, OutputFormat::Text);

    let summary = timeout(TEST_TIMEOUT, driver.run())
        .await
        .expect("driver hung")
        .unwrap();
    assert!(summary.is_none());
    assert!(printed(&output).contains(EMPTY_RESULTS_MESSAGE));
}

#[tokio::test]
async fn terminal_json_summary_and_restart() {
    let (console, output) = ScriptedConsole::new(&[
        "Jane",
        "Doe",
        "020 7946 0958",
        "/restart",
        "",
        "",
        "/quit",
    ]);
    let driver = TerminalDriver::new(Wizard::default(), console, OutputFormat::Json);

    let summary = timeout(TEST_TIMEOUT, driver.run())
        .await
        .expect("driver hung")
        .unwrap()
        .expect("summary from the first completion");
    assert_eq!(summary.firstname, "Jane");

    let text = printed(&output);
    assert!(text.contains("\"phone_e164\": \"+442079460958\""));
    // After restart the name screen offers the stored values again.
    assert!(text.contains("First name [Jane]:"));
}
