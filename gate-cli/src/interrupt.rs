///! Ctrl+C handling
///!
///! While a tracking loop runs an interrupt only requests cancellation; the
///! loop notices it at its next termination check. At the idle prompt an
///! interrupt ends the process.

use gate_core::tracking::CancellationToken;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    CancelTracking,
    Exit,
}

#[derive(Debug, Clone, Default)]
pub struct InterruptState {
    cancel: CancellationToken,
    tracking: Arc<AtomicBool>,
}

/// Marks a tracking loop as running until dropped
pub struct TrackingGuard(Arc<AtomicBool>);

impl Drop for TrackingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl InterruptState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.load(Ordering::SeqCst)
    }

    /// Drop any stale cancellation, then route interrupts to the loop
    pub fn begin_tracking(&self) -> TrackingGuard {
        self.cancel.take();
        self.tracking.store(true, Ordering::SeqCst);
        TrackingGuard(self.tracking.clone())
    }

    /// React to one interrupt
    pub fn handle(&self) -> InterruptAction {
        if self.is_tracking() {
            self.cancel.cancel();
            InterruptAction::CancelTracking
        } else {
            InterruptAction::Exit
        }
    }
}

/// Listen for Ctrl+C for the rest of the process
pub fn spawn_listener(state: InterruptState) {
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                return;
            }

            match state.handle() {
                InterruptAction::CancelTracking => {
                    tracing::debug!("Interrupt received, stopping tracking loop");
                }
                InterruptAction::Exit => {
                    tracing::info!("Interrupt received at prompt, exiting");
                    std::process::exit(0);
                }
            }
        }
    });
}
