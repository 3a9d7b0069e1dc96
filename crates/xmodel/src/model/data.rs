use tracing::{trace, warn};
use xmodel_deep::{Freeze, Value};
use xmodel_path::{Path, ToPath};

use super::Model;
use crate::error::ModelError;

impl Model {
    /// Absolute path of `path` taken relative to this node.
    pub fn resolve(&self, path: impl ToPath) -> Result<Path, ModelError> {
        let relative = path.to_path()?;
        Ok(self.path().join(&relative))
    }

    /// Strict check for existence of this node's own value.
    pub fn has_value(&self) -> bool {
        let (root, path) = self.anchor();
        root.store().has_at(&path)
    }

    pub fn get_value(&self) -> Option<Value> {
        let (root, path) = self.anchor();
        root.store().get_at(&path)
    }

    pub fn set_value(&self, value: impl Freeze) {
        let (root, path) = self.anchor();
        root.store().set_at(&path, value);
    }

    pub fn delete_value(&self) {
        let (root, path) = self.anchor();
        root.store().delete_at(&path);
    }

    pub fn has(&self, path: impl ToPath) -> Result<bool, ModelError> {
        let path = self.resolve(path)?;
        Ok(self.store().has_at(&path))
    }

    pub fn get(&self, path: impl ToPath) -> Result<Option<Value>, ModelError> {
        let path = self.resolve(path)?;
        Ok(self.store().get_at(&path))
    }

    /// Set a value below this node, creating missing branches.
    pub fn set(&self, path: impl ToPath, value: impl Freeze) -> Result<(), ModelError> {
        let path = self.resolve(path)?;
        trace!(%path, "model set");
        self.store().set_at(&path, value);
        Ok(())
    }

    /// Delete a value below this node. Deleting something absent is a no-op.
    pub fn delete(&self, path: impl ToPath) -> Result<(), ModelError> {
        let path = self.resolve(path)?;
        trace!(%path, "model delete");
        self.store().delete_at(&path);
        Ok(())
    }

    #[deprecated(note = "use `delete`")]
    pub fn remove(&self, path: impl ToPath) -> Result<(), ModelError> {
        warn!("Use \"delete\" or \"deleteValue\" (versus \"remove\").");
        self.delete(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microtask::perform_microtask_checkpoint;
    use serde_json::json;
    use xmodel_path::Key;

    #[test]
    fn test_value_on_root_and_child() {
        let model = Model::new();
        assert!(!model.has_value());
        assert_eq!(model.get_value(), None);
        model.set_value(Value::Null);
        assert!(model.has_value());
        model.delete_value();
        assert!(!model.has_value());

        let child = Model::new();
        model.attach_child("child", &child).unwrap();
        assert!(!child.has_value());
        child.set_value(json!("something"));
        assert!(child.has_value());
        assert_eq!(child.get_value(), Some(Value::from("something")));
        assert_eq!(model.get_value(), Some(Value::from(json!({"child": "something"}))));
        child.delete_value();
        assert!(!child.has_value());
        assert_eq!(model.get_value(), Some(Value::from(json!({}))));
        perform_microtask_checkpoint();
    }

    #[test]
    fn test_relative_paths() {
        for path in [vec![Key::from("foo")], vec![Key::Index(999), Key::from("b.a.r"), Key::from("baz")]] {
            let model = Model::new();
            assert!(!model.has(&path).unwrap());
            model.set(&path, json!("something")).unwrap();
            assert!(model.has(&path).unwrap());
            model.delete(&path).unwrap();
            assert!(!model.has(&path).unwrap());

            let child = Model::new();
            model.attach_child("child", &child).unwrap();
            assert!(!child.has(&path).unwrap());
            child.set(&path, json!("something")).unwrap();
            assert!(child.has(&path).unwrap());
            assert_eq!(child.get(&path).unwrap(), Some(Value::from("something")));
            child.delete(&path).unwrap();
            assert!(!child.has(&path).unwrap());
        }
        perform_microtask_checkpoint();
    }

    #[test]
    fn test_dotted_paths() {
        let model = Model::new();
        model.set("a.0.b.c", json!("ABC")).unwrap();
        assert_eq!(model.get_value(), Some(Value::from(json!({"a": [{"b": {"c": "ABC"}}]}))));
        assert_eq!(model.get("a.0.b.c").unwrap(), Some(Value::from("ABC")));
        model.delete("a.0.b.c").unwrap();
        assert!(!model.has("a.0.b.c").unwrap());
        perform_microtask_checkpoint();
    }

    #[test]
    fn test_resolve() {
        let a = Model::new();
        let b = Model::new();
        let c = Model::new();
        a.attach_child("b", &b).unwrap();
        b.attach_child("c", &c).unwrap();
        assert_eq!(a.resolve("foo").unwrap(), vec![Key::from("foo")]);
        assert_eq!(
            c.resolve("foo.0").unwrap(),
            vec![Key::from("b"), Key::from("c"), Key::from("foo"), Key::Index(0)]
        );
        assert!(c.resolve(None::<&str>).is_err());
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let model = Model::new();
        assert!(matches!(model.has(None::<&str>), Err(ModelError::InvalidPath(_))));
        assert!(model.get(None::<&str>).is_err());
        assert!(model.set(None::<&str>, json!(1)).is_err());
        assert!(model.delete(None::<&str>).is_err());
        assert!(!model.has_value());
    }

    #[test]
    fn test_set_huge_index() {
        let model = Model::new();
        model.set("users.9223372036854775807", json!("alice")).unwrap();
        assert_eq!(
            model.get("users.9223372036854775807").unwrap(),
            Some(Value::from("alice"))
        );
        assert_eq!(
            model.get_value(),
            Some(Value::from(json!({"users": {"9223372036854775807": "alice"}})))
        );
        model.delete("users.9223372036854775807").unwrap();
        assert_eq!(model.get_value(), Some(Value::from(json!({"users": {}}))));
        perform_microtask_checkpoint();
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_remove() {
        let model = Model::new();
        model.set("a", json!(1)).unwrap();
        model.remove("a").unwrap();
        assert!(!model.has("a").unwrap());
        perform_microtask_checkpoint();
    }
}
