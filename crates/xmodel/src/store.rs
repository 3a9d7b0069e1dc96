//! The single-slot value container owned by a tree root.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};
use xmodel_deep::{insert_at, lookup, remove_at, Freeze, Value};
use xmodel_path::{format_path, Key, ToPath};

use crate::error::ModelError;
use crate::microtask::queue_microtask;

/// Change callback: `(old, new)`. `None` means "no value".
pub type Subscriber = Rc<dyn Fn(Option<&Value>, Option<&Value>)>;

struct StoreState {
    value: Option<Value>,
    subscriber: Option<Subscriber>,
    pending: bool,
}

/// Holds one frozen value and notifies a single subscriber about changes.
///
/// Notifications are debounced on the microtask queue: any number of writes
/// made in one synchronous turn produce one callback carrying the value from
/// before the first write and the value after the last.
///
/// `Store` is a handle; clones share the same slot.
#[derive(Clone)]
pub struct Store {
    inner: Rc<RefCell<StoreState>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Store")
            .field("value", &state.value)
            .field("pending", &state.pending)
            .finish()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreState {
                value: None,
                subscriber: None,
                pending: false,
            })),
        }
    }

    /// Strict check for existence; a stored `Null` counts.
    pub fn has_value(&self) -> bool {
        self.inner.borrow().value.is_some()
    }

    pub fn get_value(&self) -> Option<Value> {
        self.inner.borrow().value.clone()
    }

    pub fn set_value(&self, value: impl Freeze) {
        self.commit(Some(value.freeze()));
    }

    /// Clear the slot entirely (see [`has_value`](Self::has_value)).
    pub fn remove_value(&self) {
        self.commit(None);
    }

    pub fn has(&self, path: impl ToPath) -> Result<bool, ModelError> {
        Ok(self.has_at(&path.to_path()?))
    }

    pub fn get(&self, path: impl ToPath) -> Result<Option<Value>, ModelError> {
        Ok(self.get_at(&path.to_path()?))
    }

    /// Set a value at `path`, creating missing branches. The empty path sets
    /// the whole value.
    pub fn set(&self, path: impl ToPath, value: impl Freeze) -> Result<(), ModelError> {
        self.set_at(&path.to_path()?, value);
        Ok(())
    }

    /// Remove whatever sits at `path`. The empty path clears the slot.
    pub fn remove(&self, path: impl ToPath) -> Result<(), ModelError> {
        self.delete_at(&path.to_path()?);
        Ok(())
    }

    /// [`has`](Self::has) for keys that are already resolved.
    pub fn has_at(&self, keys: &[Key]) -> bool {
        let state = self.inner.borrow();
        state
            .value
            .as_ref()
            .is_some_and(|value| lookup(value, keys).is_some())
    }

    /// [`get`](Self::get) for keys that are already resolved.
    pub fn get_at(&self, keys: &[Key]) -> Option<Value> {
        let state = self.inner.borrow();
        state.value.as_ref().and_then(|value| lookup(value, keys)).cloned()
    }

    /// [`set`](Self::set) for keys that are already resolved.
    pub fn set_at(&self, keys: &[Key], value: impl Freeze) {
        let value = value.freeze();
        let next = {
            let state = self.inner.borrow();
            insert_at(state.value.as_ref(), keys, value)
        };
        self.commit(Some(next));
    }

    /// [`remove`](Self::remove) for keys that are already resolved.
    pub fn delete_at(&self, keys: &[Key]) {
        if keys.is_empty() {
            self.remove_value();
            return;
        }
        let next = {
            let state = self.inner.borrow();
            state.value.as_ref().and_then(|value| remove_at(value, keys))
        };
        if let Some(next) = next {
            self.commit(Some(next));
        } else {
            trace!(path = %format_path(keys), "nothing to remove");
        }
    }

    /// Replace the subscriber and call it right away with `(None, current)`.
    pub fn subscribe(&self, callback: impl Fn(Option<&Value>, Option<&Value>) + 'static) {
        let callback: Subscriber = Rc::new(callback);
        let current = {
            let mut state = self.inner.borrow_mut();
            state.subscriber = Some(Rc::clone(&callback));
            state.value.clone()
        };
        callback(None, current.as_ref());
    }

    /// Whether a notification is queued and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.inner.borrow().pending
    }

    /// Schedule a notification unless one is already on its way.
    ///
    /// The old value is captured now; the new value is read when the
    /// microtask runs.
    pub fn invalidate(&self) {
        let old = {
            let mut state = self.inner.borrow_mut();
            if state.pending {
                return;
            }
            state.pending = true;
            state.value.clone()
        };
        let inner = Rc::clone(&self.inner);
        queue_microtask(move || {
            let (subscriber, new) = {
                let mut state = inner.borrow_mut();
                state.pending = false;
                (state.subscriber.clone(), state.value.clone())
            };
            if let Some(subscriber) = subscriber {
                debug!("store notifying subscriber");
                subscriber(old.as_ref(), new.as_ref());
            }
        });
    }

    fn commit(&self, next: Option<Value>) {
        let unchanged = {
            let state = self.inner.borrow();
            match (&state.value, &next) {
                (Some(old), Some(new)) => old.same(new),
                (None, None) => true,
                _ => false,
            }
        };
        if unchanged {
            trace!("store write skipped, value unchanged");
            return;
        }
        self.invalidate();
        trace!(present = next.is_some(), "store write");
        self.inner.borrow_mut().value = next;
    }
}
