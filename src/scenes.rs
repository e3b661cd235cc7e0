//! # Scene Management System
//!
//! The interactive loop around a [`GameSession`].
//!
//! Three sources feed the loop: terminal key events, a command channel filled by the
//! energy decay timer task, and a render interval. All of them are awaited in one
//! `select!`, so the session is only ever touched from this loop and commands apply
//! strictly one after another.

use crate::generation::utils::clock_seed;
use crate::{
    Command, GameConfig, GameSession, GameStage, InputHandler, LogTone, SmoothlifeError,
    SmoothlifeResult, TerminalDisplay, ViewModel,
};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Capacity of the timer command queue.
const COMMAND_QUEUE_DEPTH: usize = 16;

/// The main scene manager that owns the session and drives it.
pub struct SceneManager {
    config: GameConfig,
    session: GameSession,
    display: TerminalDisplay,
    input_handler: InputHandler,
    should_quit: bool,
}

impl SceneManager {
    /// Creates a scene manager with a fresh session.
    pub fn new(config: GameConfig) -> SmoothlifeResult<Self> {
        let session = GameSession::new(config.clone())?;
        Ok(Self {
            config,
            session,
            display: TerminalDisplay::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies one command to the session.
    ///
    /// Quit stops the loop. "Continue" after the ending starts a new session with a
    /// fresh seed; everything else goes straight to the session.
    ///
    /// A level that cannot be generated is reported in the event log and play goes
    /// on; the session is left as it was before the command.
    pub fn handle_command(&mut self, command: Command) -> SmoothlifeResult<()> {
        if command.is_player_command() {
            debug!("Player command {:?}", command);
        }

        let result = match command {
            Command::Quit => {
                info!("Quit requested");
                self.should_quit = true;
                Ok(())
            }
            Command::AdvanceStage if self.session.stage() == GameStage::Ending => {
                self.start_new_session()
            }
            _ => self.session.execute(command),
        };

        match result {
            Err(SmoothlifeError::GenerationFailed(reason)) => {
                warn!("Could not generate a level: {}", reason);
                self.session
                    .events
                    .post("No fresh piece on the bench. Try again.", LogTone::Bad);
                Ok(())
            }
            other => other,
        }
    }

    /// Handles one terminal event.
    pub fn handle_event(&mut self, event: Event) -> SmoothlifeResult<()> {
        if let Event::Key(key) = event {
            let command = self
                .input_handler
                .handle_key_event(key)
                .and_then(|input| self.input_handler.input_to_command(input, self.session.stage()));
            if let Some(command) = command {
                self.handle_command(command)?;
            }
        }
        Ok(())
    }

    fn start_new_session(&mut self) -> SmoothlifeResult<()> {
        self.config.generation.seed = clock_seed();
        info!("Starting new session with seed {}", self.config.generation.seed);
        self.session = GameSession::new(self.config.clone())?;
        Ok(())
    }

    /// Takes over the terminal and runs until the player quits.
    ///
    /// The terminal is restored even when the loop fails.
    pub async fn run(&mut self) -> SmoothlifeResult<()> {
        enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(out))?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (commands, mut queue) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let timer = spawn_decay_timer(self.config.energy_decay_interval, commands);

        let result = self.run_loop(&mut terminal, &mut queue).await;

        timer.abort();
        if let Err(err) = timer.await {
            if !err.is_cancelled() {
                warn!("Decay timer stopped abnormally: {}", err);
            }
        }

        restore_terminal(&mut terminal)?;
        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Tui,
        queue: &mut mpsc::Receiver<Command>,
    ) -> SmoothlifeResult<()> {
        let mut events = EventStream::new();
        let mut render_timer = interval(Duration::from_millis(1000 / crate::config::TARGET_FPS));

        while !self.should_quit {
            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event)?,
                    Some(Err(err)) => return Err(err.into()),
                    None => self.should_quit = true,
                },

                Some(command) = queue.recv() => self.handle_command(command)?,

                _ = render_timer.tick() => {
                    let view = ViewModel::from_session(&self.session);
                    let display = &self.display;
                    terminal.draw(|frame| display.render(frame, &view))?;
                }

                _ = tokio::signal::ctrl_c() => self.should_quit = true,
            }
        }

        Ok(())
    }
}

/// Spawns the task that sends a decay tick every `period`.
///
/// The task ends on its own once the receiving side is dropped.
pub fn spawn_decay_timer(period: Duration, commands: mpsc::Sender<Command>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            if commands.send(Command::DecayTick).await.is_err() {
                break;
            }
        }
    })
}

fn restore_terminal(terminal: &mut Tui) -> SmoothlifeResult<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
