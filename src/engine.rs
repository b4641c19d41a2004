//! Threaded driver around [`GridState`].
//!
//! The simulation runs on its own thread and is the only code touching the
//! grid while the loop is running. The presentation side talks to it through
//! two narrow channels: a [`DirectionSlot`] it writes, and a stream of
//! [`GameEvent`]s it reads.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

use crate::game::{GridSnapshot, GridState, StepResult};
use crate::input::{Direction, DirectionSlot};
use crate::pacing::{Pacing, SpeedRamp};

const WORKER_THREAD_NAME: &str = "snake-sim";

/// Whether the stepping cycle is active.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Notifications sent from the simulation thread to the presentation thread.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GameEvent {
    /// Board contents after a step or a reset.
    Frame(GridSnapshot),
    /// Sent after every step.
    Status { length: usize },
    /// Sent after food is eaten, carrying the delay now used between steps.
    SpeedUp { delay: Duration },
    /// Sent once when a step collides; the loop is already stopped.
    GameOver { length: usize },
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("failed to spawn simulation thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("simulation thread panicked; grid state is lost")]
    WorkerPanicked,
}

struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<GridState>,
}

/// Owns pacing and the simulation thread.
pub struct GameLoop {
    grid: Option<GridState>,
    worker: Option<Worker>,
    running: Arc<AtomicBool>,
    direction: Arc<DirectionSlot>,
    events: Sender<GameEvent>,
    pacing: Pacing,
}

impl GameLoop {
    #[must_use]
    pub fn new(grid: GridState, pacing: Pacing, events: Sender<GameEvent>) -> Self {
        let direction = Arc::new(DirectionSlot::new(grid.direction()));
        Self {
            grid: Some(grid),
            worker: None,
            running: Arc::new(AtomicBool::new(false)),
            direction,
            events,
            pacing,
        }
    }

    /// Starts stepping on a dedicated thread with the delay reset to its
    /// initial value. Returns `Ok(false)` when the loop was already running.
    pub fn start(&mut self) -> Result<bool, LoopError> {
        if self.is_running() {
            return Ok(false);
        }

        // A loop that ended on a collision still holds the grid in its thread.
        self.reclaim()?;
        let grid = self.grid.take().ok_or(LoopError::WorkerPanicked)?;

        let (stop_tx, stop_rx) = mpsc::channel();
        let cycle = Cycle {
            running: Arc::clone(&self.running),
            direction: Arc::clone(&self.direction),
            events: self.events.clone(),
            stop: stop_rx,
            ramp: SpeedRamp::new(self.pacing),
        };

        self.running.store(true, Ordering::Release);
        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_owned())
            .spawn(move || cycle.run(grid));

        match spawned {
            Ok(handle) => {
                self.worker = Some(Worker {
                    stop: stop_tx,
                    handle,
                });
                tracing::debug!(initial_delay = ?self.pacing.initial, "game loop started");
                Ok(true)
            }
            Err(error) => {
                self.running.store(false, Ordering::Release);
                Err(LoopError::Spawn(error))
            }
        }
    }

    /// Stops the loop and waits for the simulation thread to exit.
    ///
    /// Once this returns the grid is no longer mutated. Calling it on a
    /// stopped loop is a no-op.
    pub fn stop(&mut self) -> Result<(), LoopError> {
        self.running.store(false, Ordering::Release);
        if let Some(worker) = &self.worker {
            // The worker may already be gone after a collision.
            let _ = worker.stop.send(());
        }
        self.reclaim()
    }

    /// Stops any running game, resets the board, places the first food and
    /// starts a fresh loop.
    pub fn new_game(&mut self) -> Result<(), LoopError> {
        self.stop()?;

        let grid = self.grid.as_mut().ok_or(LoopError::WorkerPanicked)?;
        grid.reset();
        if !grid.place_food() {
            tracing::warn!("no free cell for the first food");
        }
        self.direction.store(grid.direction());

        let length = grid.snake_len();
        let _ = self.events.send(GameEvent::Frame(grid.snapshot()));
        let _ = self.events.send(GameEvent::Status { length });

        self.start()?;
        Ok(())
    }

    /// Records the heading the next step will use.
    pub fn set_direction(&self, direction: Direction) {
        self.direction.store(direction);
    }

    /// Shared handle for writing the heading from another thread.
    #[must_use]
    pub fn direction_slot(&self) -> Arc<DirectionSlot> {
        Arc::clone(&self.direction)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        if self.is_running() {
            LoopState::Running
        } else {
            LoopState::Stopped
        }
    }

    /// Grid access while no simulation thread holds it.
    #[must_use]
    pub fn grid(&self) -> Option<&GridState> {
        self.grid.as_ref()
    }

    fn reclaim(&mut self) -> Result<(), LoopError> {
        let Some(Worker { stop, handle }) = self.worker.take() else {
            return Ok(());
        };
        // Disconnecting the stop channel also wakes a sleeping worker.
        drop(stop);

        let grid = handle.join().map_err(|_| LoopError::WorkerPanicked)?;
        self.grid = Some(grid);
        Ok(())
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// State moved into the simulation thread.
struct Cycle {
    running: Arc<AtomicBool>,
    direction: Arc<DirectionSlot>,
    events: Sender<GameEvent>,
    stop: Receiver<()>,
    ramp: SpeedRamp,
}

impl Cycle {
    fn run(mut self, mut grid: GridState) -> GridState {
        while self.running.load(Ordering::Acquire) {
            let outcome = grid.step(self.direction.load());
            let length = grid.snake_len();

            match outcome {
                StepResult::Collided => {
                    self.running.store(false, Ordering::Release);
                    tracing::info!(length, "snake collided");
                }
                StepResult::AteFood => {
                    if !grid.place_food() {
                        tracing::info!(length, "board is full; no food placed");
                    }
                    let delay = self.ramp.accelerate();
                    tracing::debug!(length, ?delay, "food eaten");
                }
                StepResult::Moved => {}
            }

            if self.publish(&grid, outcome).is_err() {
                tracing::debug!("event receiver dropped; leaving game loop");
                self.running.store(false, Ordering::Release);
                break;
            }

            if outcome == StepResult::Collided {
                break;
            }

            match self.stop.recv_timeout(self.ramp.delay()) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        grid
    }

    fn publish(
        &self,
        grid: &GridState,
        outcome: StepResult,
    ) -> Result<(), mpsc::SendError<GameEvent>> {
        let length = grid.snake_len();
        self.events.send(GameEvent::Frame(grid.snapshot()))?;
        self.events.send(GameEvent::Status { length })?;
        match outcome {
            StepResult::AteFood => self.events.send(GameEvent::SpeedUp {
                delay: self.ramp.delay(),
            })?,
            StepResult::Collided => self.events.send(GameEvent::GameOver { length })?,
            StepResult::Moved => {}
        }
        Ok(())
    }
}
