use std::collections::{BTreeMap, HashMap};

use crate::bust::ImageRef;

/// Host variable store consulted by indirect adds.
pub trait VariableStore {
    fn image_ref(&self, key: &str) -> Option<ImageRef>;
}

impl VariableStore for BTreeMap<String, String> {
    fn image_ref(&self, key: &str) -> Option<ImageRef> {
        self.get(key)
            .filter(|value| !value.is_empty())
            .map(|value| ImageRef::new(value.as_str()))
    }
}

impl VariableStore for HashMap<String, String> {
    fn image_ref(&self, key: &str) -> Option<ImageRef> {
        self.get(key)
            .filter(|value| !value.is_empty())
            .map(|value| ImageRef::new(value.as_str()))
    }
}

/// Store with no variables at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl VariableStore for NoVariables {
    fn image_ref(&self, _key: &str) -> Option<ImageRef> {
        None
    }
}
