/// Drives a `LoadCycle` with background fetches.
///
/// Fetch jobs run on a shared `threadpool::ThreadPool` and send their
/// result, tagged with the ticket they were started under, back over an
/// mpsc channel. Only the thread that owns the `ScreenController` touches
/// the `LoadCycle`: it drains the channel in `pump` / `wait_settled`, and
/// `LoadCycle::complete` decides whether each result still applies.
///
/// There is no abort: a superseded fetch runs to completion and its result
/// is discarded when it arrives.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use threadpool::ThreadPool;
use tracing::debug;

use super::{Applied, FetchTicket, LoadCycle};
use crate::model::FetchError;

/// Fetch-and-shape function for one station.
pub type Loader<T> = Arc<dyn Fn(&str) -> Result<T, FetchError> + Send + Sync>;

struct Completion<T> {
    ticket: FetchTicket,
    result: Result<T, FetchError>,
}

pub struct ScreenController<T> {
    name: &'static str,
    cycle: LoadCycle<T>,
    loader: Loader<T>,
    pool: ThreadPool,
    tx: Sender<Completion<T>>,
    rx: Receiver<Completion<T>>,
}

impl<T: Send + 'static> ScreenController<T> {
    /// Creates a controller in the Idle phase. `pool` may be shared with
    /// other screens.
    pub fn new(name: &'static str, default_station: impl Into<String>, pool: ThreadPool, loader: Loader<T>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            name,
            cycle: LoadCycle::new(default_station),
            loader,
            pool,
            tx,
            rx,
        }
    }

    pub fn cycle(&self) -> &LoadCycle<T> {
        &self.cycle
    }

    /// Starts the initial fetch. Returns `false` if the screen was already
    /// loaded or has been unmounted.
    pub fn mount(&mut self) -> bool {
        match self.cycle.begin_load() {
            Some(ticket) => {
                self.dispatch(ticket);
                true
            }
            None => false,
        }
    }

    /// Switches to `station_id` and fetches it.
    pub fn select_station(&mut self, station_id: &str) -> bool {
        match self.cycle.select_station(station_id) {
            Some(ticket) => {
                self.dispatch(ticket);
                true
            }
            None => false,
        }
    }

    /// Re-fetches the current station after an error.
    pub fn retry(&mut self) -> bool {
        match self.cycle.retry() {
            Some(ticket) => {
                self.dispatch(ticket);
                true
            }
            None => false,
        }
    }

    /// Applies every completion that has already arrived, without
    /// blocking. Returns what happened to each, in arrival order.
    pub fn pump(&mut self) -> Vec<Applied> {
        let mut outcomes = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            outcomes.push(self.apply(completion));
        }
        outcomes
    }

    /// Blocks for up to `timeout` for the next completion and applies it.
    pub fn next_completion(&mut self, timeout: Duration) -> Option<Applied> {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => Some(self.apply(completion)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Applies completions until the cycle leaves Loading or `timeout`
    /// passes. Returns `true` if the cycle settled.
    pub fn wait_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.cycle.is_loading() && self.cycle.is_mounted() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            if self.next_completion(deadline - now).is_none() {
                return !self.cycle.is_loading();
            }
        }
        true
    }

    /// Ends the screen. Fetches still running finish on the pool and their
    /// results are dropped.
    pub fn unmount(&mut self) {
        self.cycle.unmount();
        let discarded = self.pump().len();
        debug!(screen = self.name, discarded, "screen unmounted");
    }

    fn dispatch(&self, ticket: FetchTicket) {
        debug!(screen = self.name, station = %ticket.station_id, epoch = ticket.epoch, "fetch started");
        let loader = Arc::clone(&self.loader);
        let tx = self.tx.clone();
        self.pool.execute(move || {
            let result = loader(&ticket.station_id);
            // The receiver is gone once the screen is dropped; nothing to do.
            let _ = tx.send(Completion { ticket, result });
        });
    }

    fn apply(&mut self, completion: Completion<T>) -> Applied {
        let Completion { ticket, result } = completion;
        let outcome = self.cycle.complete(&ticket, result);
        match outcome {
            Applied::Ready | Applied::Error => {
                debug!(screen = self.name, station = %ticket.station_id, ?outcome, "fetch applied")
            }
            Applied::Stale | Applied::Unmounted | Applied::NotLoading => {
                debug!(screen = self.name, station = %ticket.station_id, epoch = ticket.epoch, ?outcome, "fetch discarded")
            }
        }
        outcome
    }
}
