//! Parent aggregators and the registry that owns them.
//!
//! A region does not own the object whose entities it positions. It stores a
//! [`ParentId`] into a [`ParentRegistry`] instead; once the parent is removed
//! from the registry, every lookup through a stale id fails with
//! [`Error::ParentUnavailable`].
use std::fmt;

use slotmap::{Key, SlotMap};

use crate::error::{Error, Result};

/// Object that needs positions for its entities (e.g. a network's nodes).
pub trait Population: Send + Sync {
    fn required_entity_count(&self) -> usize;
}

impl Population for usize {
    fn required_entity_count(&self) -> usize {
        *self
    }
}

slotmap::new_key_type! {
    /// Versioned handle of a parent in a [`ParentRegistry`].
    pub struct ParentId;
}

impl fmt::Display for ParentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:?}", self.data())
    }
}

/// Arena of parents addressed by [`ParentId`].
#[derive(Default)]
pub struct ParentRegistry {
    parents: SlotMap<ParentId, Box<dyn Population>>,
}

impl ParentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live parents.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Registers a parent and returns its handle.
    pub fn register<P>(&mut self, parent: P) -> ParentId
    where
        P: Population + 'static,
    {
        self.parents.insert(Box::new(parent))
    }

    /// Removes a parent. Ids handed out for it become stale.
    pub fn unregister(&mut self, id: ParentId) -> Option<Box<dyn Population>> {
        self.parents.remove(id)
    }

    /// Whether `id` still refers to a live parent.
    pub fn contains(&self, id: ParentId) -> bool {
        self.parents.contains_key(id)
    }

    /// Resolves `id`, failing when the parent was removed.
    pub fn get(&self, id: ParentId) -> Result<&dyn Population> {
        self.parents
            .get(id)
            .map(|parent| parent.as_ref())
            .ok_or_else(|| Error::ParentUnavailable(id.to_string()))
    }

    /// Number of entities the parent behind `id` needs positions for.
    pub fn required_entity_count(&self, id: ParentId) -> Result<usize> {
        Ok(self.get(id)?.required_entity_count())
    }
}
