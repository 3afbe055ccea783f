use std::cell::RefCell;

use tracing::trace;

use crate::callback::CallbackList;

/// User-invokable action exposed on a screen without a backing entity
/// (reboot, scene recall, "start vacuum", ...).
#[derive(Debug, Default)]
pub struct MenuCommand {
    name: RefCell<String>,
    on_trigger: CallbackList<()>,
}

impl MenuCommand {
    pub fn new(name: &str) -> Self {
        Self {
            name: RefCell::new(name.to_string()),
            on_trigger: CallbackList::new(),
        }
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set_name(&self, name: &str) {
        *self.name.borrow_mut() = name.to_string();
    }

    /// Invokes every registered callback in registration order. Triggering
    /// with no callbacks registered is a no-op.
    pub fn trigger(&self) {
        trace!(command = %self.name.borrow(), "triggered");
        self.on_trigger.call(());
    }

    pub fn add_on_trigger_callback(&self, mut callback: impl FnMut() + 'static) {
        self.on_trigger.add(move |_| callback());
    }
}
