//! xmodel - immutable, path-addressable state trees.
//!
//! A [`Model`] tree shares a single frozen value held by the root's
//! [`Store`]. Each node reads and writes the slice of that value found at its
//! own path, the root's subscriber hears about changes once per microtask,
//! and nodes exchange synthetic [`Event`]s that bubble toward the root.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use serde_json::json;
//! use xmodel::{perform_microtask_checkpoint, Event, EventInit, Listener, Model, Value};
//!
//! let root = Model::new();
//! let todo = Model::new();
//! root.attach_child("todo", &todo).unwrap();
//!
//! let changes = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&changes);
//! root.subscribe(move |_old, _new| seen.set(seen.get() + 1)).unwrap();
//!
//! todo.set("title", json!("write docs")).unwrap();
//! todo.set("done", json!(false)).unwrap();
//! assert_eq!(root.get("todo.title").unwrap(), Some(Value::from("write docs")));
//!
//! // One notification on subscribe, one for the whole burst of writes.
//! perform_microtask_checkpoint();
//! assert_eq!(changes.get(), 2);
//!
//! let heard = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&heard);
//! root.add_event_listener("saved", &Listener::new(move |_| flag.set(true)));
//! let init = EventInit { bubbles: true, composed: true };
//! todo.dispatch_event(&mut Event::with_init("saved", init)).unwrap();
//! assert!(heard.get());
//! ```

pub mod error;
pub mod microtask;
pub mod model;
pub mod store;

pub use error::ModelError;
pub use microtask::{pending_microtasks, perform_microtask_checkpoint, queue_microtask};
pub use model::{Event, EventInit, EventPhase, Listener, ListenerOptions, Model, ModelInit};
pub use store::{Store, Subscriber};

pub use xmodel_deep::{Freeze, Map, Value};
pub use xmodel_path::{Key, Path, PathError, ToPath};
