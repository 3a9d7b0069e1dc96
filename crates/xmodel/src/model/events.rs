//! Synthetic events dispatched through a model tree.
//!
//! A narrow subset of DOM event dispatch: listeners run at the target and
//! then at each ancestor while the event bubbles, honoring
//! `stop_propagation` and `stop_immediate_propagation`. There is no capture
//! phase and no listener options.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::Model;
use crate::error::ModelError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventInit {
    pub bubbles: bool,
    pub composed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Created,
    Dispatching,
    Settled,
}

/// A synthetic event. Construct a new one for every dispatch.
pub struct Event {
    event_type: String,
    bubbles: bool,
    composed: bool,
    target: Option<Model>,
    current_target: Option<Model>,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
    phase: EventPhase,
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("type", &self.event_type)
            .field("bubbles", &self.bubbles)
            .field("composed", &self.composed)
            .field("phase", &self.phase)
            .field("propagation_stopped", &self.propagation_stopped)
            .finish()
    }
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self::with_init(event_type, EventInit::default())
    }

    pub fn with_init(event_type: impl Into<String>, init: EventInit) -> Self {
        Self {
            event_type: event_type.into(),
            bubbles: init.bubbles,
            composed: init.composed,
            target: None,
            current_target: None,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
            phase: EventPhase::Created,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn composed(&self) -> bool {
        self.composed
    }

    /// The node the event was dispatched on.
    pub fn target(&self) -> Option<&Model> {
        self.target.as_ref()
    }

    /// The node whose listeners are running right now.
    pub fn current_target(&self) -> Option<&Model> {
        self.current_target.as_ref()
    }

    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Keep the event from reaching further ancestors. Listeners at the
    /// current node still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Like [`stop_propagation`](Self::stop_propagation), and also skip the
    /// remaining listeners at the current node.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }

    /// Not tracked; dispatch only records the target and current target.
    pub fn composed_path(&self) -> Result<Vec<Model>, ModelError> {
        Err(ModelError::NotSupported(
            "The composedPath method is not yet supported.",
        ))
    }
}

/// An event listener. Listeners are compared by identity, so keep the handle
/// around to remove it later.
///
/// A node owns its listeners, so a callback that captures a [`Model`] handle
/// to its own tree keeps that tree alive. Reach the node through
/// [`Event::current_target`] or [`Event::target`] instead:
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use xmodel::{Event, Listener, Model};
///
/// let model = Model::new();
/// let saw_root = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&saw_root);
/// let listener = Listener::new(move |event: &mut Event| {
///     flag.set(event.current_target().is_some_and(|current| current.is_root()));
/// });
/// model.add_event_listener("ping", &listener);
/// model.dispatch_event(&mut Event::new("ping")).unwrap();
/// assert!(saw_root.get());
/// ```
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&mut Event)>);

impl Listener {
    pub fn new(callback: impl Fn(&mut Event) + 'static) -> Self {
        Listener(Rc::new(callback))
    }

    pub fn ptr_eq(&self, other: &Listener) -> bool {
        Rc::as_ptr(&self.0).cast::<()>() == Rc::as_ptr(&other.0).cast::<()>()
    }

    fn call(&self, event: &mut Event) {
        (self.0)(event)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0))
    }
}

/// Options accepted by the DOM for listener registration. None of them are
/// supported; only the default value is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    pub passive: bool,
    pub once: bool,
}

const OPTIONS_UNSUPPORTED: &str = "Expected exactly two arguments.";

impl Model {
    /// Register `listener` for `event_type`. Adding the same listener twice
    /// has no effect.
    pub fn add_event_listener(&self, event_type: &str, listener: &Listener) {
        let mut state = self.0.state.borrow_mut();
        let listeners = state.listeners.entry(event_type.to_string()).or_default();
        if !listeners.iter().any(|known| known.ptr_eq(listener)) {
            listeners.push(listener.clone());
        }
    }

    /// Unregister `listener`. Removing an unknown listener is a no-op.
    pub fn remove_event_listener(&self, event_type: &str, listener: &Listener) {
        let mut state = self.0.state.borrow_mut();
        if let Some(listeners) = state.listeners.get_mut(event_type) {
            listeners.retain(|known| !known.ptr_eq(listener));
            if listeners.is_empty() {
                state.listeners.shift_remove(event_type);
            }
        }
    }

    pub fn add_event_listener_with_options(
        &self,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), ModelError> {
        if options != ListenerOptions::default() {
            return Err(ModelError::InvalidArgument(OPTIONS_UNSUPPORTED));
        }
        self.add_event_listener(event_type, listener);
        Ok(())
    }

    pub fn remove_event_listener_with_options(
        &self,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), ModelError> {
        if options != ListenerOptions::default() {
            return Err(ModelError::InvalidArgument(OPTIONS_UNSUPPORTED));
        }
        self.remove_event_listener(event_type, listener);
        Ok(())
    }

    /// Dispatch `event` with this node as its target.
    ///
    /// Listeners registered at each node are snapshotted before they run, so
    /// listeners may add or remove listeners and dispatch other events. A
    /// listener added during the dispatch waits for the next one; a listener
    /// removed during the dispatch does not run.
    pub fn dispatch_event(&self, event: &mut Event) -> Result<(), ModelError> {
        if event.phase != EventPhase::Created {
            return Err(ModelError::InvalidArgument(
                "event has already been dispatched",
            ));
        }
        event.phase = EventPhase::Dispatching;
        event.target = Some(self.clone());

        let mut node = Some(self.clone());
        while let Some(current) = node {
            event.current_target = Some(current.clone());
            let listeners: Vec<Listener> = current
                .0
                .state
                .borrow()
                .listeners
                .get(event.event_type())
                .cloned()
                .unwrap_or_default();
            trace!(
                event_type = event.event_type(),
                listeners = listeners.len(),
                "dispatching at node"
            );
            for listener in &listeners {
                if !current.has_listener(event.event_type(), listener) {
                    continue;
                }
                listener.call(event);
                if event.immediate_propagation_stopped {
                    break;
                }
            }
            node = if event.bubbles && event.composed && !event.propagation_stopped {
                current.parent()
            } else {
                None
            };
        }

        event.current_target = None;
        event.phase = EventPhase::Settled;
        Ok(())
    }

    fn has_listener(&self, event_type: &str, listener: &Listener) -> bool {
        self.0
            .state
            .borrow()
            .listeners
            .get(event_type)
            .is_some_and(|listeners| listeners.iter().any(|known| known.ptr_eq(listener)))
    }
}
