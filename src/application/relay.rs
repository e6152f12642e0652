//! SinkRelay - Delivers mediation callbacks on the UI context.
//!
//! Every callback is wrapped in a task and handed to the `UiDispatcher`.
//! The relay also enforces that one request reports at most one load
//! outcome, whichever path produced it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::foundation::BridgeError;
use crate::domain::request::RewardItem;
use crate::ports::{LoadedAd, MediationSink, UiDispatcher};

/// Per-request bridge between the core and the mediation sink.
#[derive(Clone)]
pub struct SinkRelay {
    sink: MediationSink,
    ui: Arc<dyn UiDispatcher>,
    outcome_reported: Arc<AtomicBool>,
}

impl SinkRelay {
    pub fn new(sink: MediationSink, ui: Arc<dyn UiDispatcher>) -> Self {
        Self {
            sink,
            ui,
            outcome_reported: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs `task` on the UI context.
    pub fn run_on_ui(&self, task: impl FnOnce() + Send + 'static) {
        self.ui.dispatch(Box::new(task));
    }

    /// Returns true once a load outcome has been dispatched.
    pub fn outcome_reported(&self) -> bool {
        self.outcome_reported.load(Ordering::SeqCst)
    }

    /// Reports a successful load. Ignored if an outcome was already reported.
    pub fn loaded(&self, ad: LoadedAd) -> bool {
        if !self.claim_outcome() {
            tracing::warn!("Load outcome already reported, dropping on_loaded");
            return false;
        }
        let load = self.sink.load.clone();
        self.run_on_ui(move || load.on_loaded(ad));
        true
    }

    /// Reports a failed load with its translated code. Ignored if an
    /// outcome was already reported.
    pub fn failed(&self, error: &BridgeError) -> bool {
        if !self.claim_outcome() {
            tracing::warn!(error = %error, "Load outcome already reported, dropping failure");
            return false;
        }
        let code = error.mediation_code();
        tracing::info!(error = %error, code = %code, "Ad request failed");

        let load = self.sink.load.clone();
        self.run_on_ui(move || load.on_failed_to_load(code));
        true
    }

    pub fn opened(&self) {
        let display = self.sink.display.clone();
        self.run_on_ui(move || display.on_opened());
    }

    pub fn closed(&self) {
        let display = self.sink.display.clone();
        self.run_on_ui(move || display.on_closed());
    }

    pub fn clicked(&self) {
        let click = self.sink.click.clone();
        self.run_on_ui(move || click.on_clicked());
    }

    pub fn left_application(&self) {
        let click = self.sink.click.clone();
        self.run_on_ui(move || click.on_left_application());
    }

    pub fn video_started(&self) {
        if let Some(reward) = self.sink.reward.clone() {
            self.run_on_ui(move || reward.on_video_started());
        }
    }

    pub fn rewarded(&self, item: RewardItem) {
        match self.sink.reward.clone() {
            Some(reward) => self.run_on_ui(move || reward.on_rewarded(item)),
            None => tracing::warn!(amount = item.amount, "Reward earned but sink has no reward role"),
        }
    }

    fn claim_outcome(&self) -> bool {
        self.outcome_reported
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl std::fmt::Debug for SinkRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRelay")
            .field("outcome_reported", &self.outcome_reported())
            .finish_non_exhaustive()
    }
}
