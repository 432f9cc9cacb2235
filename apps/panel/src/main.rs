use std::{
    io::{self, BufRead},
    path::PathBuf,
    thread,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::Dispatcher;
use crossbeam_channel::{bounded, Sender};
use serde::Serialize;
use shared::{domain::MotorState, error::DispatchError};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use config::{load_settings, Settings};
use controller::{
    events::{UiEvent, SUCCESS_NOTIFICATION},
    input::{parse_input, PanelInput},
    reducer::PanelModel,
};
use ui::PanelApp;

#[derive(Parser, Debug)]
#[command(name = "motor-panel", about = "Control panel for an HTTP motor controller")]
struct Cli {
    /// Device address; overrides the config file and environment.
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send one panel command (e.g. `on`, `set 42`, `stop`) and wait for the device.
    Send {
        #[arg(long)]
        json: bool,
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
struct SendReport {
    host: String,
    state: MotorState,
    results: Vec<SendResult>,
}

#[derive(Debug, Serialize)]
struct SendResult {
    path: String,
    #[serde(flatten)]
    outcome: ReportOutcome,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum ReportOutcome {
    Success { status: u16, body: String },
    Failed { error: DispatchError },
}

impl SendReport {
    fn failed(&self) -> bool {
        self.results
            .iter()
            .any(|result| matches!(result.outcome, ReportOutcome::Failed { .. }))
    }
}

fn init_tracing(default_filter: &str) {
    // RUST_LOG wins over the configured filter
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        settings.host = host;
    }
    init_tracing(&settings.log_filter);

    match cli.command {
        Some(Command::Send { json, words }) => send_once(&settings, &words.join(" "), json),
        None => run_panel(settings),
    }
}

fn run_panel(settings: Settings) -> Result<()> {
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let worker = backend_bridge::runtime::launch(cmd_rx, ui_tx.clone());
    spawn_input_reader(ui_tx);

    tracing::info!(host = %settings.host, "starting motor panel");
    let app = PanelApp::new(PanelModel::new(settings.host), cmd_tx, io::stdout());
    app.run(ui_rx).context("failed to write panel output")?;

    worker
        .join()
        .map_err(|_| anyhow!("dispatch worker panicked"))?;
    Ok(())
}

fn spawn_input_reader(ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if ui_tx.send(UiEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    tracing::warn!("failed to read input: {err}");
                    break;
                }
            }
        }
        let _ = ui_tx.send(UiEvent::InputClosed);
    });
}

fn send_once(settings: &Settings, line: &str, json: bool) -> Result<()> {
    let report = send_report(settings, line)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for result in &report.results {
            match &result.outcome {
                ReportOutcome::Success { .. } => {
                    println!("[{}] {SUCCESS_NOTIFICATION}", result.path)
                }
                ReportOutcome::Failed { error } => {
                    println!("[{}] {}", result.path, error.notification())
                }
            }
        }
        println!("{}", report.state);
    }

    if report.failed() {
        bail!("device did not accept '{line}'");
    }
    Ok(())
}

fn send_report(settings: &Settings, line: &str) -> Result<SendReport> {
    let PanelInput::Intents(intents) = parse_input(line).map_err(|err| anyhow!(err))? else {
        bail!("'{line}' is not a motor command");
    };

    let mut model = PanelModel::new(settings.host.clone());
    let commands = model.reduce(&intents);
    if commands.is_empty() {
        bail!("'{line}' sends nothing to the device; use 'set <n>' to send a speed");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;
    let dispatcher = Dispatcher::new().context("failed to build http client")?;
    let target = model.target();

    let mut results = Vec::with_capacity(commands.len());
    for request in commands {
        let outcome = match runtime.block_on(dispatcher.dispatch(&target, &request)) {
            Ok(reply) => ReportOutcome::Success {
                status: reply.status,
                body: reply.body,
            },
            Err(error) => ReportOutcome::Failed { error },
        };
        results.push(SendResult {
            path: request.path,
            outcome,
        });
    }

    Ok(SendReport {
        host: settings.host.clone(),
        state: model.state(),
        results,
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
