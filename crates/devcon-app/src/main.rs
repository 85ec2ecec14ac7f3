//! Line-driven developer console.
//!
//! Reads lines from stdin on a reader thread, ticks the console at a fixed
//! rate so delayed sequences make progress, and renders output to stdout
//! with ANSI colours. End of input (Ctrl-D) waits for pending sequences,
//! fires the shutdown hook, and exits.
//!
//! Usage: `devcon-app [config.toml]` (defaults to `devcon.toml`).

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use devcon_terminal::{CommandRegistry, Console, JsonFileStore, LifecycleHook, builtin_commands};
use devcon_types::config::ConsoleConfig;
use devcon_types::output::{ConsoleOutput, Emphasis};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("devcon.toml"), PathBuf::from);
    let config = ConsoleConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    log::info!(
        "Starting developer console (state in {})",
        config.state_file.display()
    );

    let registry = CommandRegistry::build(builtin_commands())?;
    log::info!("Registered {} commands", registry.len());
    let store = JsonFileStore::new(&config.state_file);
    let tick = Duration::from_millis(config.tick_millis.max(1));
    let mut console = Console::new(registry, config, Box::new(store))
        .context("restoring console state")?;

    let mut stdout = std::io::stdout().lock();
    let mut clock = Clock::new();

    console.open();
    console.fire(LifecycleHook::OnStartup);
    render(&mut stdout, &mut console)?;

    let lines = spawn_reader();
    let mut input_open = true;
    loop {
        if input_open {
            match lines.recv_timeout(tick) {
                Ok(line) => submit(&mut console, &line),
                Err(RecvTimeoutError::Timeout) => {},
                Err(RecvTimeoutError::Disconnected) => {
                    log::info!("End of input");
                    input_open = false;
                },
            }
        } else if console.has_pending() {
            thread::sleep(tick);
        } else {
            break;
        }
        clock.tick(&mut console);
        render(&mut stdout, &mut console)?;
    }

    console.fire(LifecycleHook::OnShutdown);
    render(&mut stdout, &mut console)?;
    while console.has_pending() {
        thread::sleep(tick);
        clock.tick(&mut console);
        render(&mut stdout, &mut console)?;
    }
    console.close();
    render(&mut stdout, &mut console)?;

    log::info!("Developer console shut down");
    Ok(())
}

/// Feeds wall-clock time into the console.
struct Clock {
    last: Instant,
}

impl Clock {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn tick(&mut self, console: &mut Console) {
        let now = Instant::now();
        console.tick(now.duration_since(self.last));
        self.last = now;
    }
}

fn spawn_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read input: {e}");
                    break;
                },
            }
        }
    });
    rx
}

/// Type `line` into the prompt and submit it, as a keyboard would.
fn submit(console: &mut Console, line: &str) {
    let prompt = console.prompt_mut();
    for c in line.chars() {
        if !prompt.insert(c) {
            log::debug!("Dropped disallowed character {c:?}");
        }
    }
    console.submit();
}

fn render(out: &mut impl Write, console: &mut Console) -> Result<()> {
    for item in console.drain_output() {
        match item {
            ConsoleOutput::Line { kind, text } => writeln!(out, "{}", style(kind, &text))?,
            ConsoleOutput::Clear => write!(out, "\x1b[2J\x1b[H")?,
            ConsoleOutput::Open => log::debug!("Console opened"),
            ConsoleOutput::Close => log::debug!("Console closed"),
        }
    }
    out.flush()?;
    Ok(())
}

fn style(kind: Emphasis, text: &str) -> String {
    match kind {
        Emphasis::Info => text.to_string(),
        Emphasis::Warning => format!("\x1b[33m{text}\x1b[0m"),
        Emphasis::Error => format!("\x1b[31m* {text}\x1b[0m"),
        Emphasis::Success => format!("\x1b[32m{text}\x1b[0m"),
        Emphasis::Highlight => format!("\x1b[36m{text}\x1b[0m"),
    }
}
