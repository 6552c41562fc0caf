//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::events::Event as WorkerEvent;
use crate::runtime::Command;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// Application state
#[derive(Debug)]
pub struct App {
    state: DashboardState,

    /// Receives frames and events from the scheduler.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Sends navigation requests to the scheduler.
    command_sender: mpsc::Sender<Command>,

    /// Broadcasts shutdown signal to the scheduler.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        state: DashboardState,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        command_sender: mpsc::Sender<Command>,
        shutdown_sender: broadcast::Sender<()>,
    ) -> Self {
        Self {
            state,
            event_receiver,
            command_sender,
            shutdown_sender,
        }
    }
}

/// What a key press asks the UI loop to do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum KeyAction {
    Send(Command),
    Quit,
    Ignore,
}

fn key_action(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
            KeyAction::Send(Command::NextField)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
            KeyAction::Send(Command::PreviousField)
        }
        KeyCode::Char('r') => KeyAction::Send(Command::RefreshNow),
        _ => KeyAction::Ignore,
    }
}

/// Runs the dashboard UI in a loop until the user quits or the scheduler stops.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        // Queue all incoming events for processing
        loop {
            match app.event_receiver.try_recv() {
                Ok(event) => app.state.add_event(event),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    let _ = app.shutdown_sender.send(());
                    return Ok(());
                }
            }
        }

        app.state.update();
        terminal.draw(|f| render_dashboard(f, &app.state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match key_action(&key) {
                    KeyAction::Quit => {
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                    KeyAction::Send(command) => {
                        // A full queue means the scheduler is behind; drop the press.
                        if let Err(e) = app.command_sender.try_send(command) {
                            log::debug!("Dropped {:?}: {}", command, e);
                        }
                    }
                    KeyAction::Ignore => {}
                }
            }
        }
    }
}
