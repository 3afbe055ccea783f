use std::cell::RefCell;
use std::fmt;

/// Ordered list of callbacks sharing one argument type.
///
/// Callbacks are stored behind a `RefCell` and invoked synchronously on the
/// caller's thread, in registration order. Adding a callback from inside an
/// invocation of the same list is not supported.
pub struct CallbackList<T = ()> {
    callbacks: RefCell<Vec<Box<dyn FnMut(T)>>>,
}

impl<T: Clone> CallbackList<T> {
    pub fn new() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
        }
    }

    pub fn add(&self, callback: impl FnMut(T) + 'static) {
        self.callbacks.borrow_mut().push(Box::new(callback));
    }

    /// Invokes every registered callback with a clone of `value`.
    pub fn call(&self, value: T) {
        for callback in self.callbacks.borrow_mut().iter_mut() {
            callback(value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.borrow().is_empty()
    }
}

impl<T: Clone> Default for CallbackList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CallbackList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackList")
            .field("callbacks", &self.callbacks.borrow().len())
            .finish()
    }
}
