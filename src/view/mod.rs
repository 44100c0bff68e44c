/// Per-screen load state for the station dashboards.
///
/// ## State machine
///
/// ```text
///            begin_load / select_station
///   Idle ───────────────────────────────▶ Loading
///                                          │   ▲
///                      complete(Ok)        │   │ select_station (any phase)
///                 ┌────────────────────────┤   │ retry (Error only)
///                 ▼                        ▼   │
///               Ready ◀──────────────▶ Error ──┘
/// ```
///
/// Every transition into Loading hands out a `FetchTicket` stamped with a
/// fresh epoch. A completion is applied only if its ticket carries the
/// current epoch, so when the user picks A then B, A's late answer is
/// dropped instead of overwriting B. After `unmount` nothing is applied.
///
/// `LoadCycle` is plain data with no I/O; `screen::ScreenController` runs
/// the fetches.

pub mod screen;

use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Idle,
    Loading,
    Ready(T),
    /// Message shown next to the retry action.
    Error(String),
}

/// Identifies one fetch. Hand it back to `LoadCycle::complete` with the
/// result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub station_id: String,
    pub epoch: u64,
}

/// What `complete` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Ready,
    Error,
    /// A newer fetch has been started since this ticket was issued.
    Stale,
    Unmounted,
    /// The cycle is not waiting for anything.
    NotLoading,
}

/// Load state owned by one screen instance.
#[derive(Debug)]
pub struct LoadCycle<T> {
    station_id: String,
    phase: Phase<T>,
    epoch: u64,
    mounted: bool,
}

impl<T> LoadCycle<T> {
    /// A freshly mounted cycle, Idle, with `default_station` selected.
    pub fn new(default_station: impl Into<String>) -> Self {
        Self {
            station_id: default_station.into(),
            phase: Phase::Idle,
            epoch: 0,
            mounted: true,
        }
    }

    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    pub fn phase(&self) -> &Phase<T> {
        &self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Data of the last successful fetch, while Ready.
    pub fn data(&self) -> Option<&T> {
        match &self.phase {
            Phase::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// Message of the last failed fetch, while in Error.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Initial fetch on mount: Idle → Loading for the current station.
    /// Returns `None` in any other phase.
    pub fn begin_load(&mut self) -> Option<FetchTicket> {
        if !self.mounted || !matches!(self.phase, Phase::Idle) {
            return None;
        }
        Some(self.start_fetch())
    }

    /// Switches station: any phase → Loading. Any fetch still in flight for
    /// the previous selection becomes stale.
    pub fn select_station(&mut self, station_id: impl Into<String>) -> Option<FetchTicket> {
        if !self.mounted {
            return None;
        }
        self.station_id = station_id.into();
        Some(self.start_fetch())
    }

    /// Error → Loading for the current station. `None` from other phases.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if !self.mounted || !matches!(self.phase, Phase::Error(_)) {
            return None;
        }
        Some(self.start_fetch())
    }

    /// Applies a fetch result if `ticket` is still current.
    ///
    /// Success moves to Ready and clears any error. Failure moves to Error
    /// and drops previously shown data.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<T, FetchError>) -> Applied {
        if !self.mounted {
            return Applied::Unmounted;
        }
        if ticket.epoch != self.epoch || ticket.station_id != self.station_id {
            return Applied::Stale;
        }
        if !self.is_loading() {
            return Applied::NotLoading;
        }

        match result {
            Ok(data) => {
                self.phase = Phase::Ready(data);
                Applied::Ready
            }
            Err(err) => {
                self.phase = Phase::Error(err.to_string());
                Applied::Error
            }
        }
    }

    /// Ends the cycle. Every later transition is a no-op.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    fn start_fetch(&mut self) -> FetchTicket {
        self.epoch += 1;
        self.phase = Phase::Loading;
        FetchTicket {
            station_id: self.station_id.clone(),
            epoch: self.epoch,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
