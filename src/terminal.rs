//! Terminal front end — renders the wizard screens and feeds typed lines to
//! the `Wizard` as events.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::wizard::{EMPTY_RESULTS_MESSAGE, Field, OnboardingSummary, SubStep, Wizard};

/// Line-oriented input/output used by the terminal driver.
#[async_trait]
pub trait Console: Send {
    /// Next input line without its terminator, or `None` at end of input.
    async fn read_line(&mut self) -> std::io::Result<Option<String>>;

    async fn write_line(&mut self, line: &str) -> std::io::Result<()>;
}

/// Console over the process's stdin and stdout.
pub struct StdConsole {
    lines: Lines<BufReader<Stdin>>,
    stdout: Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            stdout: tokio::io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        self.stdout.write_all(b"> ").await?;
        self.stdout.flush().await?;
        self.lines.next_line().await
    }

    async fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.stdout.write_all(line.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await
    }
}

/// What a typed line means on the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    Back,
    Restart,
    Country,
    Clear,
    Close,
    Text(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "/quit" => Self::Quit,
            "/back" => Self::Back,
            "/restart" => Self::Restart,
            "/country" => Self::Country,
            "/clear" => Self::Clear,
            "/close" => Self::Close,
            _ => Self::Text(line.to_string()),
        }
    }
}

/// Runs the wizard against a console until the user quits or input ends.
pub struct TerminalDriver<C: Console> {
    wizard: Wizard,
    console: C,
    output: OutputFormat,
    last_summary: Option<OnboardingSummary>,
}

impl<C: Console> TerminalDriver<C> {
    pub fn new(wizard: Wizard, console: C, output: OutputFormat) -> Self {
        Self {
            wizard,
            console,
            output,
            last_summary: None,
        }
    }

    /// Drive the screens. Returns the most recent completed summary, if any.
    pub async fn run(mut self) -> Result<Option<OnboardingSummary>> {
        loop {
            let keep_going = match self.wizard.sub_step() {
                SubStep::Name => self.name_screen().await?,
                SubStep::Phone if self.wizard.country_selector().is_some() => {
                    self.selector_screen().await?
                }
                SubStep::Phone => self.phone_screen().await?,
                SubStep::Confirmation => self.confirmation_screen().await?,
            };
            if !keep_going {
                return Ok(self.last_summary);
            }
        }
    }

    async fn name_screen(&mut self) -> Result<bool> {
        self.header().await?;
        self.say("What's your name?").await?;

        let state = self.wizard.state();
        let first_prompt = prompt_with_default("First name", &state.firstname);
        let last_prompt = prompt_with_default("Last name", &state.lastname);
        let (first_default, last_default) = (state.firstname.clone(), state.lastname.clone());

        self.say(&first_prompt).await?;
        let firstname = match self.read_text().await? {
            Some(Command::Text(text)) => or_default(text, &first_default),
            None | Some(Command::Quit) => return Ok(false),
            Some(_) => return self.unknown_command().await,
        };
        self.wizard.clear_field_error(Field::Firstname);

        self.say(&last_prompt).await?;
        let lastname = match self.read_text().await? {
            Some(Command::Text(text)) => or_default(text, &last_default),
            None | Some(Command::Quit) => return Ok(false),
            Some(_) => return self.unknown_command().await,
        };
        self.wizard.clear_field_error(Field::Lastname);

        if self.wizard.submit_name(&firstname, &lastname).is_err() {
            self.report_errors().await?;
        }
        Ok(true)
    }

    async fn phone_screen(&mut self) -> Result<bool> {
        self.header().await?;
        self.say("Let's validate your number").await?;
        let country = &self.wizard.state().country;
        let prompt = format!(
            "Phone number [{} {}] (/country to change, /back to edit your name):",
            country.flag, country.dial_code
        );
        self.say(&prompt).await?;

        match self.read_text().await? {
            None | Some(Command::Quit) => return Ok(false),
            Some(Command::Country) => {
                self.wizard.open_country_selector();
            }
            Some(Command::Back) => {
                self.wizard.back_to_start()?;
            }
            Some(Command::Text(text)) => {
                self.wizard.clear_field_error(Field::PhoneNumber);
                if self.wizard.submit_phone(text.trim()).is_err() {
                    self.report_errors().await?;
                }
            }
            Some(_) => return self.unknown_command().await,
        }
        Ok(true)
    }

    async fn selector_screen(&mut self) -> Result<bool> {
        let lines: Vec<String> = match self.wizard.country_selector() {
            Some(selector) if selector.is_empty_result() => vec![EMPTY_RESULTS_MESSAGE.to_string()],
            Some(selector) => selector
                .results()
                .iter()
                .map(|c| format!("  {}  {}", c.code, c))
                .collect(),
            None => return Ok(true),
        };
        self.say("Select a country (type to search, a code to choose, /clear, /close):")
            .await?;
        for line in &lines {
            self.say(line).await?;
        }

        match self.read_text().await? {
            None | Some(Command::Quit) => return Ok(false),
            Some(Command::Close) => {
                self.wizard.close_country_selector();
            }
            Some(Command::Clear) => {
                if let Some(selector) = self.wizard.country_selector_mut() {
                    selector.clear_search();
                }
            }
            Some(Command::Text(text)) => {
                let text = text.trim().to_string();
                let is_code = self
                    .wizard
                    .country_selector()
                    .and_then(|s| s.select(&text))
                    .is_some();
                if is_code {
                    let country = self.wizard.choose_country(&text)?;
                    self.say(&format!("Selected {country}")).await?;
                } else if let Some(selector) = self.wizard.country_selector_mut() {
                    selector.set_search(text);
                }
            }
            Some(_) => return self.unknown_command().await,
        }
        Ok(true)
    }

    async fn confirmation_screen(&mut self) -> Result<bool> {
        if let Some(summary) = self.wizard.summary() {
            match self.output {
                OutputFormat::Text => {
                    self.say(&format!("Welcome, {}!", summary.full_name())).await?;
                    self.say(&format!(
                        "Your number {} ({}) is verified.",
                        summary.phone_e164, summary.country.name
                    ))
                    .await?;
                }
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&summary)?;
                    self.say(&json).await?;
                }
            }
            self.last_summary = Some(summary);
        }
        self.say("Type /restart to go back to the start, or /quit to exit.")
            .await?;

        loop {
            match self.read_text().await? {
                None | Some(Command::Quit) => return Ok(false),
                Some(Command::Restart) => {
                    self.wizard.back_to_start()?;
                    return Ok(true);
                }
                Some(_) => self.say("Type /restart or /quit.").await?,
            }
        }
    }

    async fn unknown_command(&mut self) -> Result<bool> {
        self.say("Unknown command").await?;
        Ok(true)
    }

    async fn header(&mut self) -> Result<()> {
        let state = self.wizard.state();
        let line = format!("Step {} of 2", state.step.number());
        self.say(&line).await
    }

    async fn report_errors(&mut self) -> Result<()> {
        let lines: Vec<String> = self
            .wizard
            .field_errors()
            .values()
            .map(|message| format!("  ! {message}"))
            .collect();
        for line in &lines {
            self.say(line).await?;
        }
        Ok(())
    }

    async fn read_text(&mut self) -> Result<Option<Command>> {
        Ok(self.console.read_line().await?.map(|line| Command::parse(&line)))
    }

    async fn say(&mut self, line: &str) -> Result<()> {
        self.console.write_line(line).await.map_err(Error::from)
    }
}

fn prompt_with_default(label: &str, current: &str) -> String {
    if current.is_empty() {
        format!("{label}:")
    } else {
        format!("{label} [{current}]:")
    }
}

/// An empty line keeps the value already in the store.
fn or_default(text: String, current: &str) -> String {
    if text.is_empty() && !current.is_empty() {
        current.to_string()
    } else {
        text
    }
}
