//! Tree of models sharing one root store.
//!
//! Every node sees the slice of the root value found at its own path. Only a
//! root owns a [`Store`]; children read and write through it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::warn;
use xmodel_deep::{Freeze, Value};
use xmodel_path::{Key, Path};

use crate::error::ModelError;
use crate::store::Store;

mod data;
mod events;
mod tree;

pub use events::{Event, EventInit, EventPhase, Listener, ListenerOptions};

const SEEDING_DEPRECATED: &str =
    "Initializing value on construction is deprecated. Set value after construction.";

/// Construction input for [`Model::from_init`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelInit {
    /// Seed value for the new root. Prefer setting a value after
    /// construction.
    pub value: Option<serde_json::Value>,
}

pub(crate) struct NodeState {
    pub(crate) key: Option<String>,
    pub(crate) parent: Weak<ModelNode>,
    pub(crate) root: Weak<ModelNode>,
    pub(crate) path: Path,
    pub(crate) children: IndexMap<String, Model>,
    pub(crate) listeners: IndexMap<String, Vec<Listener>>,
}

pub(crate) struct ModelNode {
    pub(crate) state: RefCell<NodeState>,
    /// Present on a root once it has been used; dropped when the node is
    /// attached under another one.
    pub(crate) store: RefCell<Option<Store>>,
}

/// Handle to a node in a model tree.
///
/// Clones refer to the same node; compare with [`Model::ptr_eq`] or `==`.
/// A parent keeps its children alive, a child only refers back weakly, so a
/// tree lives as long as a handle to its root does.
#[derive(Clone)]
pub struct Model(pub(crate) Rc<ModelNode>);

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Model) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Model {}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("key", &self.key())
            .field("path", &self.path())
            .field("children", &self.children())
            .finish()
    }
}

impl Model {
    pub fn new() -> Self {
        Model(Rc::new_cyclic(|weak| ModelNode {
            state: RefCell::new(NodeState {
                key: None,
                parent: Weak::new(),
                root: weak.clone(),
                path: Path::root(),
                children: IndexMap::new(),
                listeners: IndexMap::new(),
            }),
            store: RefCell::new(None),
        }))
    }

    /// Create a root already holding `value`.
    #[deprecated(note = "construct with `Model::new` and call `set_value`")]
    pub fn with_value(value: impl Freeze) -> Self {
        warn!("{SEEDING_DEPRECATED}");
        let model = Model::new();
        model.set_value(value);
        model
    }

    pub fn from_init(init: ModelInit) -> Self {
        let model = Model::new();
        if let Some(value) = init.value {
            warn!("{SEEDING_DEPRECATED}");
            model.set_value(value);
        }
        model
    }

    /// Key under the parent; `None` on a root.
    pub fn key(&self) -> Option<String> {
        let state = self.0.state.borrow();
        state.parent.upgrade().and(state.key.clone())
    }

    pub fn parent(&self) -> Option<Model> {
        self.0.state.borrow().parent.upgrade().map(Model)
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// The root of this node's tree (the node itself on a root).
    pub fn root(&self) -> Model {
        self.anchor().0
    }

    /// Keys from the root down to this node.
    pub fn path(&self) -> Path {
        self.anchor().1
    }

    pub fn ptr_eq(&self, other: &Model) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Subscribe to changes of the tree's value. Children observe through
    /// their root.
    pub fn subscribe(
        &self,
        callback: impl Fn(Option<&Value>, Option<&Value>) + 'static,
    ) -> Result<(), ModelError> {
        if !self.is_root() {
            return Err(ModelError::NotRoot);
        }
        self.store().subscribe(callback);
        Ok(())
    }

    /// Root node and this node's path under it.
    ///
    /// Uses the cached root when it is alive; otherwise the tree above was
    /// dropped and the topmost live ancestor acts as root.
    pub(crate) fn anchor(&self) -> (Model, Path) {
        {
            let state = self.0.state.borrow();
            if let Some(root) = state.root.upgrade() {
                return (Model(root), state.path.clone());
            }
        }
        let mut keys: Vec<Key> = Vec::new();
        let mut node = self.clone();
        while let Some(parent) = node.parent() {
            if let Some(key) = node.0.state.borrow().key.clone() {
                keys.push(Key::Field(key));
            }
            node = parent;
        }
        keys.reverse();
        (node, Path::from(keys))
    }

    /// The store backing this node's tree.
    pub(crate) fn store(&self) -> Store {
        let root = self.root();
        let mut slot = root.0.store.borrow_mut();
        slot.get_or_insert_with(Store::new).clone()
    }
}
