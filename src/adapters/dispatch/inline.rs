//! Dispatcher that runs tasks on the calling thread.
//!
//! For hosts without a dedicated UI thread and for tests.

use crate::ports::{UiDispatcher, UiTask};

#[derive(Debug, Default, Clone, Copy)]
pub struct InlineDispatcher;

impl InlineDispatcher {
    pub fn new() -> Self {
        Self
    }
}

impl UiDispatcher for InlineDispatcher {
    fn dispatch(&self, task: UiTask) {
        task();
    }
}
