use std::rc::{Rc, Weak};

use tracing::{debug, warn};
use xmodel_path::{Key, Path};

use super::{Model, ModelNode};
use crate::error::ModelError;

/// Child keys are named fields; an index is rejected.
fn child_key(key: impl Into<Key>) -> Result<String, ModelError> {
    match key.into() {
        Key::Field(field) => Ok(field),
        Key::Index(_) => Err(ModelError::InvalidKey),
    }
}

/// Point `node` and everything below it at `root`, starting from `path`.
fn relink(node: &Model, root: &Weak<ModelNode>, path: Path) {
    let children: Vec<(String, Model)> = {
        let mut state = node.0.state.borrow_mut();
        state.root = root.clone();
        state.path = path.clone();
        state
            .children
            .iter()
            .map(|(key, child)| (key.clone(), child.clone()))
            .collect()
    };
    for (key, child) in children {
        relink(&child, root, path.child(key));
    }
}

/// Turn an unlinked node into the root of its own tree, with an empty store.
fn orphan(node: &Model) {
    {
        let mut state = node.0.state.borrow_mut();
        state.key = None;
        state.parent = Weak::new();
    }
    node.0.store.borrow_mut().take();
    relink(node, &Rc::downgrade(&node.0), Path::root());
}

impl Model {
    pub fn has_child(&self, key: impl Into<Key>) -> Result<bool, ModelError> {
        let key = child_key(key)?;
        Ok(self.0.state.borrow().children.contains_key(&key))
    }

    pub fn get_child(&self, key: impl Into<Key>) -> Result<Option<Model>, ModelError> {
        let key = child_key(key)?;
        Ok(self.0.state.borrow().children.get(&key).cloned())
    }

    /// Direct children in the order they were attached.
    pub fn children(&self) -> Vec<(String, Model)> {
        self.0
            .state
            .borrow()
            .children
            .iter()
            .map(|(key, child)| (key.clone(), child.clone()))
            .collect()
    }

    /// Mount `child` at `key`.
    ///
    /// The child leaves its current parent and any other node mounted at
    /// `key` is detached first. Whatever value the child held as a root is
    /// not carried over; from now on it reads the slice of this tree at its
    /// new path.
    pub fn attach_child(&self, key: impl Into<Key>, child: &Model) -> Result<(), ModelError> {
        let key = child_key(key)?;
        let mut node = Some(self.clone());
        while let Some(current) = node {
            if current.ptr_eq(child) {
                return Err(ModelError::InvalidChild(
                    "a model cannot be attached below itself",
                ));
            }
            node = current.parent();
        }

        if child.parent().is_some_and(|parent| parent.ptr_eq(self))
            && child.0.state.borrow().key.as_deref() == Some(key.as_str())
        {
            return Ok(());
        }

        child.detach();
        self.detach_child(key.as_str())?;

        {
            let mut state = child.0.state.borrow_mut();
            state.key = Some(key.clone());
            state.parent = Rc::downgrade(&self.0);
        }
        child.0.store.borrow_mut().take();
        self.0
            .state
            .borrow_mut()
            .children
            .insert(key.clone(), child.clone());

        let (root, path) = self.anchor();
        let path = path.child(key.as_str());
        debug!(%path, "attached child");
        relink(child, &Rc::downgrade(&root.0), path);
        Ok(())
    }

    /// Unmount the child at `key`, if any. The child becomes a root with an
    /// empty store; its data stays behind in this tree.
    pub fn detach_child(&self, key: impl Into<Key>) -> Result<(), ModelError> {
        let key = child_key(key)?;
        let removed = self.0.state.borrow_mut().children.shift_remove(&key);
        if let Some(child) = removed {
            debug!(key = %key, "detached child");
            orphan(&child);
        }
        Ok(())
    }

    /// Mount this node into `parent` at `key`.
    pub fn attach(&self, key: impl Into<Key>, parent: &Model) -> Result<(), ModelError> {
        parent.attach_child(key, self)
    }

    /// Unmount this node from its parent, making it a new root.
    pub fn detach(&self) {
        let (parent, key) = {
            let state = self.0.state.borrow();
            (state.parent.upgrade(), state.key.clone())
        };
        let (Some(parent), Some(key)) = (parent, key) else {
            return;
        };
        parent.state.borrow_mut().children.shift_remove(&key);
        debug!(key = %key, "detached from parent");
        orphan(self);
    }

    #[deprecated(note = "use `attach_child`")]
    pub fn set_child(&self, key: impl Into<Key>, child: &Model) -> Result<(), ModelError> {
        warn!("The \"setChild\" method is deprecated. Use \"attachChild\".");
        self.attach_child(key, child)
    }

    #[deprecated(note = "use `detach_child`")]
    pub fn delete_child(&self, key: impl Into<Key>) -> Result<(), ModelError> {
        warn!("The \"deleteChild\" method is deprecated. Use \"detachChild\".");
        self.detach_child(key)
    }
}
