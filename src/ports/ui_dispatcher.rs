//! UiDispatcher port - Re-dispatches work onto the host's UI context.
//!
//! Ad network completions arrive on arbitrary threads. Mediation callbacks
//! and surface rendering must run on the UI context, so every such call is
//! wrapped in a task and handed to this port.

/// A unit of work to run on the UI context.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Port for scheduling tasks on the UI context.
///
/// Implementations must run tasks in submission order and must not run a
/// task more than once. A dispatcher whose UI context is gone may drop tasks.
pub trait UiDispatcher: Send + Sync {
    fn dispatch(&self, task: UiTask);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn UiDispatcher) {}
}
