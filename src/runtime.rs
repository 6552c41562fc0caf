//! Refresh scheduler
//!
//! Drives one [`DashboardController`] from a single task: a label timer, a
//! data timer, navigation commands from the surface, and the completions of
//! every fetch still in flight. Fetches are never cancelled or queued behind
//! each other; the controller's sequence tokens sort out late arrivals.

use crate::config::Config;
use crate::consts::cli_consts::{COMMAND_QUEUE_SIZE, EVENT_QUEUE_SIZE};
use crate::controller::{DashboardController, DashboardSink, DataTicket, RenderFrame};
use crate::events::Event;
use crate::source::DataSource;
use crate::source::error::SourceError;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Requests from the surface to the controller.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    NextField,
    PreviousField,
    RefreshNow,
}

/// Sink collecting frames and events until the scheduler forwards them.
///
/// The controller is synchronous; the scheduler drains this after every step
/// and delivers with `send().await`, so a slow surface delays the scheduler
/// instead of losing frames.
#[derive(Debug, Default)]
pub struct EventSink {
    pending: VecDeque<Event>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_pending(&mut self) -> VecDeque<Event> {
        std::mem::take(&mut self.pending)
    }
}

impl DashboardSink for EventSink {
    fn render(&mut self, frame: &RenderFrame) {
        self.pending.push_back(Event::render(frame.clone()));
    }

    fn report(&mut self, event: Event) {
        self.pending.push_back(event);
    }
}

enum Completion {
    Labels {
        then_refresh: bool,
        result: Result<Value, SourceError>,
    },
    Data {
        ticket: DataTicket,
        result: Result<Value, SourceError>,
    },
}

pub struct Scheduler {
    controller: DashboardController<EventSink>,
    source: Arc<dyn DataSource>,
    events: mpsc::Sender<Event>,
    data_interval: Duration,
    label_interval: Duration,
    in_flight: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl Scheduler {
    pub fn new(
        controller: DashboardController<EventSink>,
        source: Arc<dyn DataSource>,
        events: mpsc::Sender<Event>,
        data_interval: Duration,
        label_interval: Duration,
    ) -> Self {
        Self {
            controller,
            source,
            events,
            data_interval,
            label_interval,
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Run until shutdown or until the command channel closes, then hand the
    /// controller back.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> DashboardController<EventSink> {
        // Startup: one discovery, then one data refresh whatever its outcome.
        self.start_discovery(true);

        let start = Instant::now();
        let mut label_timer = interval_at(start + self.label_interval, self.label_interval);
        let mut data_timer = interval_at(start + self.data_interval, self.data_interval);
        label_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        data_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = label_timer.tick() => self.start_discovery(false),
                _ = data_timer.tick() => self.start_data_refresh(),
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(done) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.complete(done);
                }
            }
            self.flush().await;
        }

        self.controller
    }

    /// Deliver everything the controller produced since the last flush.
    async fn flush(&mut self) {
        for event in self.controller.sink_mut().take_pending() {
            if self.events.send(event).await.is_err() {
                // Surface is gone; nothing left to draw on.
                break;
            }
        }
    }

    fn start_discovery(&mut self, then_refresh: bool) {
        let source = Arc::clone(&self.source);
        self.in_flight.push(
            async move {
                let result = source.fetch_discovery().await;
                Completion::Labels {
                    then_refresh,
                    result,
                }
            }
            .boxed(),
        );
    }

    fn start_data_refresh(&mut self) {
        let Some(ticket) = self.controller.begin_data_refresh() else {
            return;
        };
        let source = Arc::clone(&self.source);
        self.in_flight.push(
            async move {
                let result = source.fetch_readings(&ticket.field).await;
                Completion::Data { ticket, result }
            }
            .boxed(),
        );
    }

    fn handle_command(&mut self, command: Command) {
        let moved = match command {
            Command::NextField => self.controller.advance_field(),
            Command::PreviousField => self.controller.retreat_field(),
            Command::RefreshNow => true,
        };
        if moved {
            self.start_data_refresh();
        }
    }

    fn complete(&mut self, done: Completion) {
        match done {
            Completion::Labels {
                then_refresh,
                result,
            } => {
                self.controller.apply_discovery(result);
                if then_refresh {
                    self.start_data_refresh();
                }
            }
            Completion::Data { ticket, result } => {
                self.controller.apply_data(ticket, result);
            }
        }
    }
}

/// Start the dashboard controller in the background.
///
/// Returns the event stream for the surface, the command sender for
/// navigation, and the scheduler's join handle.
pub fn start_dashboard(
    source: Arc<dyn DataSource>,
    config: &Config,
    shutdown: broadcast::Receiver<()>,
) -> (mpsc::Receiver<Event>, mpsc::Sender<Command>, JoinHandle<()>) {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (command_sender, command_receiver) = mpsc::channel::<Command>(COMMAND_QUEUE_SIZE);

    let controller = DashboardController::new(EventSink::new(), config.alert_threshold_minutes);
    let scheduler = Scheduler::new(
        controller,
        source,
        event_sender,
        config.data_interval(),
        config.label_interval(),
    );

    let handle = tokio::spawn(async move {
        scheduler.run(command_receiver, shutdown).await;
    });
    (event_receiver, command_sender, handle)
}
