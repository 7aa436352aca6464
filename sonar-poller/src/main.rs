//! Sonar Poller CLI
//!
//! Polls the analysis service until the current analysis is finished and
//! exits non-zero unless the quality gate is OK.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sonar_client::Credentials;
use sonar_poller::report::DEFAULT_REPORT_PATH;
use sonar_poller::{DotProgress, GateOutcome, PollerSettings, check_quality_gate};

#[derive(Parser)]
#[command(name = "sonar-poller", version)]
#[command(
    about = "Poll the analysis service until the analysis is finished, exit non-0 if the quality gate is not OK or the timeout is reached",
    long_about = None
)]
struct Cli {
    /// Full URL of the service, including any context path, e.g. https://sonarqube.example.com
    #[arg(long, env = "SONAR_POLLER_URL")]
    url: Option<String>,

    /// Project key as shown on the dashboard, e.g. com.example:myapp
    #[arg(long, env = "SONAR_POLLER_PROJECT")]
    project: Option<String>,

    /// Username for authentication, optional
    #[arg(long, env = "SONAR_POLLER_USERNAME")]
    username: Option<String>,

    /// Password or token for authentication, optional
    #[arg(long, env = "SONAR_POLLER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Seconds each polling phase may take before giving up
    #[arg(long, env = "SONAR_POLLER_TIMEOUT", default_value_t = 300, value_name = "SECONDS")]
    timeout: u64,

    /// Report file written by the scanner
    #[arg(long, env = "SONAR_POLLER_REPORT_FILE", default_value = DEFAULT_REPORT_PATH)]
    report_file: PathBuf,

    /// Seconds a single HTTP request may take
    #[arg(
        long,
        env = "SONAR_POLLER_REQUEST_TIMEOUT",
        default_value_t = 30,
        value_name = "SECONDS"
    )]
    request_timeout: u64,

    /// Accept invalid TLS certificates (self-signed or internal instances)
    #[arg(
        long,
        env = "SONAR_POLLER_INSECURE",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    insecure: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries progress and the verdict
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sonar_poller=warn,sonar_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<GateOutcome> {
    let settings = load_settings(cli)?;
    info!(
        server_url = %settings.server_url,
        project_key = %settings.project_key,
        timeout = ?settings.timeout,
        "Loaded configuration"
    );

    let client = settings
        .build_client()
        .context("Failed to initialize HTTP client")?;

    let outcome = check_quality_gate(&settings, &client, &DotProgress).await?;
    Ok(outcome)
}

/// Resolves flags and environment into validated settings
fn load_settings(cli: Cli) -> Result<PollerSettings> {
    let url = match cli.url {
        Some(url) => url,
        None => prompt("Url")?,
    };
    let project = match cli.project {
        Some(project) => project,
        None => prompt("Project")?,
    };

    let mut settings = PollerSettings::new(url, project);
    settings.credentials = Credentials::from_parts(cli.username, cli.password);
    settings.report_path = cli.report_file;
    settings.timeout = Duration::from_secs(cli.timeout);
    settings.request_timeout = Duration::from_secs(cli.request_timeout);
    settings.accept_invalid_certs = cli.insecure;

    settings.validate().context("Invalid configuration")?;
    Ok(settings)
}

/// Asks for a missing required value on an interactive terminal
fn prompt(label: &str) -> Result<String> {
    if !io::stdin().is_terminal() {
        bail!(
            "--{} is required (or set SONAR_POLLER_{})",
            label.to_lowercase(),
            label.to_uppercase()
        );
    }

    let value = dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .with_context(|| format!("Failed to read {}", label.to_lowercase()))?;

    Ok(value.trim().to_string())
}

fn print_outcome(outcome: &GateOutcome) {
    let status = if outcome.passed() {
        outcome.status.as_str().green().bold()
    } else {
        outcome.status.as_str().red().bold()
    };

    println!(
        "Quality Gate is {}, results: {}",
        status,
        outcome.dashboard_url.cyan()
    );
}
