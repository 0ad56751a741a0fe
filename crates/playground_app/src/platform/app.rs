use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use playground_core::{update, AppState, AttemptId, Effect, Msg, PositionId, Severity};
use playground_engine::EngineHandle;
use playground_logging::{pg_debug, pg_info, pg_warn};

use super::config::PlaygroundConfig;
use super::effects::EffectRunner;
use super::input::{parse_line, Command};
use super::persistence::FileCredentialStore;
use super::ui;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Everything the main loop reacts to, from any thread.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Show,
    Help,
    InputError(String),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = PlaygroundConfig::from_build_env().context("invalid build configuration")?;
    playground_logging::initialize(&config.log_file, LevelFilter::Info);
    pg_info!(
        "Starting playground api_root={} state_dir={:?}",
        config.extraction.api_root,
        config.state_dir
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let (engine, engine_events) =
        EngineHandle::new(config.extraction.clone()).context("failed to start extraction engine")?;
    let store = FileCredentialStore::new(config.state_dir.clone());
    let runner = EffectRunner::new(engine, engine_events, Box::new(store), event_tx.clone());

    let mut app = App::new(runner, io::stdout());
    app.print(&ui::layout::help_text())?;
    let saved = app.runner.load_credential();
    app.dispatch(Msg::CredentialLoaded(saved))?;
    app.render()?;

    spawn_input_reader(event_tx.clone());
    // Background tick to throttle rendering.
    thread::spawn(move || {
        while event_tx.send(AppEvent::Msg(Msg::Tick)).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Msg(msg) => app.dispatch(msg)?,
            AppEvent::Show => app.render()?,
            AppEvent::Help => app.print(&ui::layout::help_text())?,
            AppEvent::InputError(text) => app.print(&format!("! {text}"))?,
            AppEvent::Quit => break,
        }
    }

    pg_info!("Playground shutting down");
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    pg_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            let events = match parse_line(&line) {
                Ok(Some(command)) => command_events(command),
                Ok(None) => Vec::new(),
                Err(err) => vec![AppEvent::InputError(err.to_string())],
            };
            for event in events {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        // End of input behaves like `quit`.
        let _ = tx.send(AppEvent::Quit);
    });
}

fn command_events(command: Command) -> Vec<AppEvent> {
    match command {
        Command::Show => vec![AppEvent::Show],
        Command::Help => vec![AppEvent::Help],
        Command::Quit => vec![AppEvent::Quit],
        other => other.into_msgs().into_iter().map(AppEvent::Msg).collect(),
    }
}

/// Position and attempt of a response message the lifecycle will ignore.
fn stale_response(state: &AppState, msg: &Msg) -> Option<(PositionId, AttemptId)> {
    let (position_id, attempt) = match msg {
        Msg::ExtractionSucceeded {
            position_id,
            attempt,
            ..
        }
        | Msg::ExtractionFailed {
            position_id,
            attempt,
            ..
        } => (*position_id, *attempt),
        _ => return None,
    };
    let current = state
        .collection()
        .by_position(position_id)
        .is_some_and(|item| item.lifecycle().is_current(attempt));
    (!current).then_some((position_id, attempt))
}

struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    scroll_to_top: bool,
}

impl<W: Write> App<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
            scroll_to_top: false,
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let is_tick = matches!(msg, Msg::Tick);
        if let Some((position_id, attempt)) = stale_response(&self.state, &msg) {
            pg_debug!(
                "Dropping stale response position_id={} attempt={}",
                position_id,
                attempt
            );
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for effect in self.runner.run(effects) {
            match effect {
                Effect::Notify { severity, message } => {
                    let prefix = match severity {
                        Severity::Info => "-",
                        Severity::Error => "!",
                    };
                    self.print(&format!("{prefix} {message}"))?;
                }
                Effect::ScrollToTop => self.scroll_to_top = true,
                Effect::ExtractRecipe { .. } | Effect::PersistCredential { .. } => {}
            }
        }

        // Coalesce redraws onto the tick.
        if is_tick && self.state.consume_dirty() {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        self.state.consume_dirty();
        if std::mem::take(&mut self.scroll_to_top) {
            write!(self.out, "{}", ui::layout::CLEAR_SCREEN)?;
        }
        let text = ui::render::render(&self.state.view());
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}
