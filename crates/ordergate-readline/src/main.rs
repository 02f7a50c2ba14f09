use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Context, Helper};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use ordergate_client::{Action, GatewayController};
use ordergate_core::{ClientConfig, LogRecord, OperationResult, ReadStatusPolicy, ResultOrdering};

mod command;

use command::{Command, COMMANDS, HELP};

#[derive(Parser)]
#[command(name = "ordergate")]
#[command(about = "Interactive client for the order gateway", long_about = None)]
struct Cli {
    /// Gateway origin, e.g. http://127.0.0.1:8080
    #[arg(long)]
    gateway: Option<String>,

    /// Config file (default: <config dir>/ordergate/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report non-2xx responses to reads as failures instead of payload
    #[arg(long)]
    checked_reads: bool,

    /// Drop results that come back after a later-issued one
    #[arg(long)]
    discard_stale: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;
        if let Some(gateway) = &self.gateway {
            config.gateway_url = gateway.clone();
        }
        if self.checked_reads {
            config.read_status = ReadStatusPolicy::StatusChecked;
        }
        if self.discard_stale {
            config.result_ordering = ResultOrdering::LatestIssued;
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper;

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates: Vec<Pair> = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_once(' ') {
            Some((head, rest)) if COMMANDS.contains(&head) => {
                Owned(format!("{} {}", head.bright_cyan(), rest))
            }
            None if COMMANDS.contains(&line) => Owned(line.bright_cyan().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }

        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

fn init_logging() {
    // Default to warn so request logs do not interleave with REPL output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            for line in text.lines() {
                println!("{}", line.bright_blue());
            }
        }
        Err(_) => println!("{}", value.to_string().bright_blue()),
    }
}

fn print_logs(feed: &Value) {
    match LogRecord::parse_feed(feed) {
        Some(records) if !records.is_empty() => {
            for LogRecord { user, action } in records {
                println!("{} {}", format!("[{}]", user).bright_magenta(), action.bright_blue());
            }
        }
        _ => print_json(feed),
    }
}

fn print_result(action: &Action, result: &OperationResult) {
    if result.is_success() {
        println!("{}", result.message.bright_green());
    } else {
        println!("{}", result.message.red());
    }

    match (action, &result.payload) {
        (Action::GetLogs, Some(feed)) => print_logs(feed),
        _ => {
            if let Some(text) = result.render_payload() {
                for line in text.lines() {
                    println!("{}", line.bright_blue());
                }
            }
        }
    }
}

fn print_slots(controller: &GatewayController) {
    let slots = controller.slots();
    let feedback = slots.feedback.latest().unwrap_or_default();
    println!("{} {}", "Feedback:".bold(), feedback);

    println!("{}", "Orders:".bold());
    match slots.orders.latest() {
        Some(orders) => print_json(&orders),
        None => println!("{}", "(nothing fetched yet)".bright_black()),
    }

    println!("{}", "Logs:".bold());
    match slots.logs.latest() {
        Some(logs) => print_logs(&logs),
        None => println!("{}", "(nothing fetched yet)".bright_black()),
    }

    println!("{}", "Identity:".bold());
    match slots.identity.latest() {
        Some(identity) => print_json(&identity),
        None => println!("{}", "(nothing fetched yet)".bright_black()),
    }
}

/// The main entry point for the ordergate REPL.
///
/// Every action is spawned as its own task so the prompt never waits on the
/// gateway. Results are printed by a single handler task in the order they
/// complete.
#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    tracing::info!(gateway = %config.gateway_url, "Starting ordergate");

    let controller = GatewayController::from_config(&config);

    // Completed actions flow back here for display
    let (response_tx, mut response_rx) = mpsc::channel::<(Action, OperationResult)>(32);

    let response_handler = tokio::spawn(async move {
        while let Some((action, result)) = response_rx.recv().await {
            print_result(&action, &result);
        }
    });

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== ordergate ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Gateway: {}. Type 'help' for commands, 'quit' to exit.", config.gateway_url)
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match command::parse(trimmed) {
                    Ok(command) => command,
                    Err(usage) => {
                        println!("{}", usage.yellow());
                        continue;
                    }
                };

                match command {
                    Command::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Command::Help => println!("{}", HELP.bright_black()),
                    Command::Show => print_slots(&controller),
                    Command::Credentials { username, password } => {
                        controller.session().set_credentials(username, password).await;
                        println!("{}", "Credentials set".bright_black());
                    }
                    Command::Run {
                        credentials,
                        action,
                    } => {
                        if let Some((username, password)) = credentials {
                            controller.session().set_credentials(username, password).await;
                        }

                        let handle = controller.dispatch(action.clone()).await;
                        let tx = response_tx.clone();
                        tokio::spawn(async move {
                            match handle.await {
                                Ok(result) => {
                                    let _ = tx.send((action, result)).await;
                                }
                                Err(e) => tracing::error!(error = %e, "Action task failed"),
                            }
                        });
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Requests still in flight are abandoned with the runtime
    drop(response_tx);
    response_handler.abort();

    Ok(())
}
