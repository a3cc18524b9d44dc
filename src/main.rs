use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use voicekeys::config::Config;
use voicekeys::control::ControlCommand;
use voicekeys::engine::{ProcessResult, VoiceCommandEngine};
use voicekeys::keys::{DryRunInjector, KeyInjector, KeyResolver, Resolution, Vocabulary};
use voicekeys::logging;

#[derive(Parser)]
#[command(name = "voicekeys", version, about = "Turn spoken phrases into key presses")]
struct Cli {
    /// Config file (default: ./voicekeys.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one phrase and print its combination
    Resolve {
        /// Phrase words, e.g. `control shift escape`
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Read transcribed phrases from stdin, one per line, and press them
    Listen {
        /// Log combinations instead of pressing them
        #[arg(long)]
        dry_run: bool,
    },
    /// List everything that can be said
    Vocab,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load(),
    };

    match cli.command.unwrap_or(Command::Listen { dry_run: false }) {
        Command::Resolve { words } => Ok(run_resolve(&config, &words.join(" "))),
        Command::Listen { dry_run } => {
            run_listen(&config, dry_run || config.dry_run)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Vocab => {
            let engine = VoiceCommandEngine::new(&config, Box::new(DryRunInjector));
            print!(
                "{}",
                engine.control().help_text(engine.resolver().vocabulary())
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_resolve(config: &Config, phrase: &str) -> ExitCode {
    let resolver = KeyResolver::new(Arc::new(Vocabulary::with_overrides(&config.keys)));
    match resolver.resolve(phrase) {
        Resolution::Empty => {
            println!("unrecognized");
            ExitCode::FAILURE
        }
        resolution => {
            if let Some(combo) = resolution.combo() {
                println!("{}", combo);
            }
            ExitCode::SUCCESS
        }
    }
}

#[cfg(feature = "inject")]
fn make_injector(config: &Config, dry_run: bool) -> anyhow::Result<Box<dyn KeyInjector>> {
    use voicekeys::keys::{ChordTiming, EnigoInjector};

    if dry_run {
        return Ok(Box::new(DryRunInjector));
    }
    let injector = EnigoInjector::new(ChordTiming::from(&config.input))?;
    Ok(Box::new(injector))
}

#[cfg(not(feature = "inject"))]
fn make_injector(_config: &Config, dry_run: bool) -> anyhow::Result<Box<dyn KeyInjector>> {
    if !dry_run {
        tracing::warn!("built without the `inject` feature, falling back to dry run");
    }
    Ok(Box::new(DryRunInjector))
}

fn run_listen(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let mut engine = VoiceCommandEngine::new(config, make_injector(config, dry_run)?);

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))?;

    // Reader thread stands in for the transcriber: one phrase per line
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let help_phrase = engine
        .control()
        .phrase_for(ControlCommand::Help)
        .unwrap_or("help")
        .to_string();
    let resume_phrase = engine
        .control()
        .phrase_for(ControlCommand::Resume)
        .unwrap_or("start")
        .to_string();
    println!("Voice command engine ready. Say '{}' for options.", help_phrase);

    while running.load(Ordering::SeqCst) {
        let line = match line_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(line) => line,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };
        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        println!("\nCommand received: {}", command);
        match engine.process_command(command) {
            Ok(ProcessResult::Executed(combo)) => {
                println!("Executed: {}", combo.replace('+', " + "));
            }
            Ok(ProcessResult::Unrecognized) => println!("Unrecognized command: {}", command),
            Ok(ProcessResult::Ignored) => {
                println!("System paused. Say '{}' to activate.", resume_phrase)
            }
            Ok(ProcessResult::Paused) => {
                println!("Paused - Say '{}' to resume", resume_phrase)
            }
            Ok(ProcessResult::Resumed) => println!("Resuming voice commands..."),
            Ok(ProcessResult::Help(text)) => print!("{}", text),
            Ok(ProcessResult::History(lines)) => {
                for line in lines {
                    println!("  {}", line);
                }
            }
            Ok(ProcessResult::Exit) => break,
            Err(e) => {
                tracing::warn!(command, error = %e, "failed to press keys");
                println!("Failed: {} - {}", command, e);
            }
        }
    }

    println!("Shutting down voice command engine...");
    Ok(())
}
