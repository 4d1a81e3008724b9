//! The acquisition controller: an actor that owns [`AcquisitionState`].
//!
//! One task receives [`Command`]s, drives the year [`Debouncer`], spawns
//! fetches and province recomputations into a `JoinSet`, and applies their
//! tagged completions. Every observable change is published as an
//! [`AcquisitionSnapshot`] on a `watch` channel.
//!
//! Dropping the [`ControllerHandle`] (or calling
//! [`shutdown`](ControllerHandle::shutdown)) aborts the actor; the debouncer
//! and all in-flight work go with it, so nothing completes against a dead state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::error::{ControllerClosed, FetchError};
use crate::source::HolidaySource;
use crate::state::{
    AcquisitionSnapshot, AcquisitionState, Generation, Outcome, ProvinceChange,
};
use crate::types::Holiday;

/// Input from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw year text, as typed.
    SetYear(String),
    /// A province code from the selector.
    SelectProvince(String),
}

enum Completion {
    Fetched {
        generation: Generation,
        year: String,
        result: Result<Vec<Holiday>, FetchError>,
    },
    Recomputed {
        generation: Generation,
    },
}

pub struct AcquisitionController<S> {
    source: Arc<S>,
    state: AcquisitionState,
    debouncer: Debouncer<String>,
    province_delay: Duration,
    in_flight: JoinSet<Completion>,
    commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<AcquisitionSnapshot>,
    published: u64,
}

impl<S: HolidaySource> AcquisitionController<S> {
    /// Starts the controller on the current tokio runtime and immediately
    /// fetches `config.initial_year`.
    pub fn spawn(source: S, config: &Config) -> ControllerHandle {
        let state = AcquisitionState::new(config.initial_year.clone(), config.initial_province);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());

        let controller = Self {
            source: Arc::new(source),
            published: state.version(),
            state,
            debouncer: Debouncer::new(config.debounce),
            province_delay: config.province_delay,
            in_flight: JoinSet::new(),
            commands: command_rx,
            snapshots: snapshot_tx,
        };
        let task = tokio::spawn(controller.run());

        ControllerHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            task: Some(task),
        }
    }

    async fn run(mut self) {
        let initial = self.state.debounced_year().to_string();
        self.start_fetch(initial);
        self.publish();

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                year = self.debouncer.settled() => self.on_year_settled(year),
                Some(joined) = self.in_flight.join_next() => match joined {
                    Ok(completion) => self.on_completion(completion),
                    Err(e) => tracing::error!("Controller task failed: {}", e),
                },
            }
            self.publish();
        }
        tracing::debug!("Acquisition controller stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetYear(raw) => {
                self.state.set_year_input(raw.clone());
                self.debouncer.push(raw);
            }
            Command::SelectProvince(code) => self.on_province_selected(&code),
        }
    }

    fn on_year_settled(&mut self, year: String) {
        if !self.state.should_fetch(&year) {
            tracing::debug!("Year '{}' already current, not refetching", year);
            return;
        }
        self.start_fetch(year);
    }

    fn start_fetch(&mut self, year: String) {
        let generation = self.state.begin_fetch(year.clone());
        tracing::info!("Fetching holidays for '{}' ({})", year, generation);
        let source = Arc::clone(&self.source);
        self.in_flight.spawn(async move {
            let result = source.fetch_year(&year).await;
            Completion::Fetched {
                generation,
                year,
                result,
            }
        });
    }

    fn on_province_selected(&mut self, code: &str) {
        match self.state.select_province(code) {
            ProvinceChange::Unknown => {
                tracing::debug!("Ignoring unknown province code '{}'", code);
            }
            ProvinceChange::Unchanged | ProvinceChange::Recorded => {}
            ProvinceChange::Recompute(generation) => {
                if self.province_delay.is_zero() {
                    self.state.complete_recompute(generation);
                    return;
                }
                let delay = self.province_delay;
                self.in_flight.spawn(async move {
                    tokio::time::sleep(delay).await;
                    Completion::Recomputed { generation }
                });
            }
        }
    }

    fn on_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Fetched {
                generation,
                year,
                result,
            } => {
                let failed = result.is_err();
                match self.state.complete_fetch(generation, result) {
                    Outcome::Applied if failed => {
                        tracing::info!("Fetch for '{}' failed ({})", year, generation)
                    }
                    Outcome::Applied => tracing::info!(
                        "Loaded {} holidays for '{}', {} visible in {}",
                        self.state.full_year().len(),
                        year,
                        self.state.visible().len(),
                        self.state.province().label
                    ),
                    Outcome::Stale => {
                        tracing::debug!("Discarding stale fetch for '{}' ({})", year, generation)
                    }
                }
            }
            Completion::Recomputed { generation } => {
                if self.state.complete_recompute(generation) == Outcome::Stale {
                    tracing::debug!("Discarding stale recomputation ({})", generation);
                }
            }
        }
    }

    fn publish(&mut self) {
        if self.state.version() != self.published {
            self.published = self.state.version();
            self.snapshots.send_replace(self.state.snapshot());
        }
    }
}

/// The presentation layer's handle on a running controller.
pub struct ControllerHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<AcquisitionSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl ControllerHandle {
    pub fn send(&self, command: Command) -> Result<(), ControllerClosed> {
        self.commands.send(command).map_err(|_| ControllerClosed)
    }

    /// Raw year text; fetched once it stops changing for the debounce period.
    pub fn set_year(&self, year: impl Into<String>) -> Result<(), ControllerClosed> {
        self.send(Command::SetYear(year.into()))
    }

    /// Province code such as `"CA-QC"`. Unknown codes are ignored.
    pub fn select_province(&self, code: impl Into<String>) -> Result<(), ControllerClosed> {
        self.send(Command::SelectProvince(code.into()))
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> AcquisitionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified of every new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<AcquisitionSnapshot> {
        self.snapshots.clone()
    }

    /// Stops the controller and waits for it to finish. Pending debounce
    /// timers and in-flight requests are dropped.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }
}

impl Drop for ControllerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
