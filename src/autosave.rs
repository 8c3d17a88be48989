//! Autosave: a self-sustaining timed loop that polls the dirty flag and saves silently.

use crate::document::Document;
use crate::file_ops::PersistenceGateway;
use chrono::Local;
use std::time::Duration;
use tracing::{debug, warn};

/// Opaque id for one pending scheduled tick on the host's event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// The host's timer facility. `arm` schedules a single deferred callback on the host event
/// loop (never a background thread) and the host calls
/// [`AutosaveScheduler::on_tick`] when it fires; `cancel` revokes a not-yet-fired one.
pub trait Timer {
    fn arm(&mut self, interval: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// The user's answer to the one-time "choose an autosave location" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Accepted,
    Declined,
}

/// The shell-side collaborator the scheduler reports to.
pub trait AutosaveUi {
    /// A silent save succeeded; show an unobtrusive "Autosaved at HH:MM:SS" notice.
    fn autosave_notice(&mut self, timestamp: &str);

    /// The document is dirty but has no path. A host answering [`PromptChoice::Accepted`]
    /// runs its save-as flow before returning; the scheduler itself never writes without a
    /// known path.
    fn prompt_autosave_location(&mut self) -> PromptChoice;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Armed,
    Stopped,
}

/// The autosave state machine: IDLE → ARMED → (fire) → ARMED … with an absorbing STOPPED.
///
/// Exactly one pending tick may exist at a time. The scheduler owns the only
/// `Option<TimerHandle>` and cancels it before arming a new one, so overlapping or
/// duplicate firings cannot happen no matter how `start` and `on_tick` interleave.
pub struct AutosaveScheduler<T: Timer> {
    timer: T,
    interval: Duration,
    pending: Option<TimerHandle>,
    phase: Phase,
}

impl<T: Timer> AutosaveScheduler<T> {
    /// Create an idle scheduler. Nothing fires until [`Self::start`].
    pub fn new(timer: T, interval: Duration) -> Self {
        Self {
            timer,
            interval,
            pending: None,
            phase: Phase::Idle,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.phase == Phase::Armed
    }

    pub fn is_stopped(&self) -> bool {
        self.phase == Phase::Stopped
    }

    /// Access the host timer (the scheduler owns it for its lifetime).
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Arm the loop. Safe to call while already armed, and the way back from STOPPED:
    /// any pending tick is cancelled first, so this never double-fires.
    pub fn start(&mut self) {
        self.disarm();
        self.pending = Some(self.timer.arm(self.interval));
        self.phase = Phase::Armed;
    }

    /// Cancel any pending tick and stop for good. Only [`Self::start`] re-arms.
    pub fn stop(&mut self) {
        self.disarm();
        self.phase = Phase::Stopped;
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
    }

    /// One firing of the armed tick. The host calls this from the timer callback.
    ///
    /// Branches, per the dirty flag and path:
    /// - clean document: nothing to do;
    /// - dirty with a known path: silent save — success clears the dirty flag and emits
    ///   the notice, failure is logged and swallowed (autosave must never interrupt
    ///   editing; the flag stays set so a later tick retries);
    /// - dirty and pathless: the location prompt, at most once per document.
    ///
    /// Whatever branch ran, the next tick is re-armed: the loop sustains itself until
    /// [`Self::stop`]. A tick dispatched after `stop` is ignored.
    pub fn on_tick(
        &mut self,
        doc: &mut Document,
        gateway: &mut dyn PersistenceGateway,
        ui: &mut dyn AutosaveUi,
    ) {
        if self.phase != Phase::Armed {
            return;
        }
        // The tick that just fired consumed its handle.
        self.pending = None;

        if doc.is_dirty() {
            if let Some(path) = doc.path.clone() {
                match doc.save_to(gateway, &path) {
                    Ok(()) => {
                        ui.autosave_notice(&Local::now().format("%H:%M:%S").to_string());
                    }
                    Err(e) => {
                        warn!(error = %e, "autosave failed; will retry on a later tick");
                    }
                }
            } else if !doc.autosave_prompted {
                doc.autosave_prompted = true;
                match ui.prompt_autosave_location() {
                    PromptChoice::Accepted => debug!("autosave location prompt accepted"),
                    PromptChoice::Declined => {
                        debug!("autosave prompt declined; not asking again for this document");
                    }
                }
            }
        }

        self.pending = Some(self.timer.arm(self.interval));
    }
}
