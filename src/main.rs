use anyhow::Context;

use onboarding_wizard::config::WizardConfig;
use onboarding_wizard::terminal::{StdConsole, TerminalDriver};
use onboarding_wizard::wizard::{FormStore, Wizard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr and stay quiet by default so they don't interleave
    // with the prompts.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = WizardConfig::from_env().context("invalid onboarding configuration")?;
    tracing::debug!(country = %config.default_country, output = ?config.output, "Loaded config");

    let store = FormStore::with_country(&config.default_country)?;
    let wizard = Wizard::new(store);

    eprintln!("Onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Type /quit at any prompt to exit.\n");

    let driver = TerminalDriver::new(wizard, StdConsole::new(), config.output);
    match driver.run().await? {
        Some(summary) => tracing::info!(name = %summary.full_name(), "Wizard finished"),
        None => tracing::info!("Wizard exited before completion"),
    }

    Ok(())
}
