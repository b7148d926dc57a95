///! Tracking loop
///!
///! Evaluates a target repeatedly, either a fixed number of rounds or until
///! cancelled. Between rounds it sleeps for the configured interval, then
///! advances the simulated epoch by the wall-clock time that actually passed.
///! The observer frame is loaded on entry and unloaded on every exit path.
///!
///! The token is not reset here: a cancellation already pending when a
///! continuous loop starts stops it after the first round. Callers clear stale
///! requests before they start accepting new ones.

use crate::azel::{AzElSelection, Observation, Target};
use crate::error::{GateError, Result};
use crate::time::Epoch;
use crate::toolkit::Toolkit;
use crate::topo::{ObserverSite, TopoFrame};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Stop after this many rounds; the first round always runs
    Bounded(u32),
    /// Run until the cancellation token fires
    Continuous,
}

impl FromStr for LoopMode {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("CONT") {
            return Ok(LoopMode::Continuous);
        }
        s.parse::<u32>()
            .map(LoopMode::Bounded)
            .map_err(|_| GateError::invalid_number("Count", s))
    }
}

/// Shared flag set from a signal handler and polled by the loop
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Consume a pending cancellation, returning whether there was one
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// One evaluated round handed to the caller
pub struct TrackingTick<'a> {
    pub round: u32,
    pub epoch: Epoch,
    pub observations: &'a [Observation],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingSummary {
    pub rounds: u32,
    pub last_epoch: Epoch,
    pub cancelled: bool,
}

pub struct TrackingLoop<C: Clock = SystemClock> {
    mode: LoopMode,
    interval: Duration,
    cancel: CancellationToken,
    clock: C,
}

impl TrackingLoop<SystemClock> {
    pub fn new(mode: LoopMode, cancel: CancellationToken) -> Self {
        Self::with_clock(mode, cancel, SystemClock)
    }
}

impl<C: Clock> TrackingLoop<C> {
    pub fn with_clock(mode: LoopMode, cancel: CancellationToken, clock: C) -> Self {
        Self {
            mode,
            interval: DEFAULT_INTERVAL,
            cancel,
            clock,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Load the observer frame, track `target` from `start`, then unload.
    ///
    /// A pipeline error or an error from `on_tick` ends the loop at once; the
    /// frame is still unloaded and that error is returned.
    pub fn run<T, F>(
        &self,
        toolkit: &mut T,
        site: &ObserverSite,
        target: Target<'_>,
        start: Epoch,
        select: AzElSelection,
        on_tick: F,
    ) -> Result<TrackingSummary>
    where
        T: Toolkit + ?Sized,
        F: FnMut(&TrackingTick<'_>) -> Result<()>,
    {
        let frame = site.load(toolkit)?;
        let outcome = self.drive(&*toolkit, &frame, target, start, select, on_tick);

        let frame_name = frame.name.clone();
        match (outcome, frame.unload(toolkit)) {
            (Ok(summary), Ok(())) => Ok(summary),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), unload) => {
                if let Err(unload_err) = unload {
                    tracing::warn!(frame = %frame_name, "Failed to unload frame after error: {}", unload_err);
                }
                Err(e)
            }
        }
    }

    fn drive<T, F>(
        &self,
        toolkit: &T,
        frame: &TopoFrame,
        target: Target<'_>,
        start: Epoch,
        select: AzElSelection,
        mut on_tick: F,
    ) -> Result<TrackingSummary>
    where
        T: Toolkit + ?Sized,
        F: FnMut(&TrackingTick<'_>) -> Result<()>,
    {
        let mut epoch = start;
        let mut rounds = 0u32;
        let mut last = self.clock.now();

        loop {
            let observations = target.observe(toolkit, frame, epoch, select)?;
            rounds += 1;
            on_tick(&TrackingTick {
                round: rounds,
                epoch,
                observations: &observations,
            })?;

            let stop = match self.mode {
                LoopMode::Bounded(count) => rounds >= count,
                LoopMode::Continuous => self.cancel.take(),
            };
            if stop {
                tracing::debug!(rounds, mode = ?self.mode, "Tracking loop finished");
                return Ok(TrackingSummary {
                    rounds,
                    last_epoch: epoch,
                    cancelled: self.mode == LoopMode::Continuous,
                });
            }

            self.clock.sleep(self.interval);
            let now = self.clock.now();
            epoch = epoch + now.duration_since(last);
            last = now;
        }
    }
}
