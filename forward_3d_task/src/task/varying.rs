/// Varyings - typed, named slots threaded between jobs.
///
/// A `Varying<T>` is a copyable handle; the value itself lives in the
/// graph's `VaryingStore`. The slot type is fixed when the slot is declared.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use crate::error::{Error, Result};
use crate::engine_bail_config;

/// Graph identifiers, one per TaskBuilder
static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Untyped identity of a varying slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VaryingId {
    pub(crate) graph: u64,
    pub(crate) index: usize,
}

/// Typed handle to a varying slot
pub struct Varying<T> {
    id: VaryingId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Varying<T> {
    pub(crate) fn new(id: VaryingId) -> Self {
        Self { id, _marker: PhantomData }
    }

    pub fn id(&self) -> VaryingId {
        self.id
    }
}

impl<T> Clone for Varying<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Varying<T> {}

impl<T> PartialEq for Varying<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> fmt::Debug for Varying<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Varying<{}>({}:{})", std::any::type_name::<T>(), self.id.graph, self.id.index)
    }
}

/// Who fills a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Producer {
    /// Bound from outside before each run
    Input,
    /// Set once at build time, kept across frames
    Constant,
    /// Output of the job at this node index
    Job(usize),
    /// Declared with no producer yet
    Reserved,
}

struct Slot {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    producer: Producer,
    value: Option<Box<dyn Any + Send + Sync>>,
}

/// Storage for all varyings of one graph
pub struct VaryingStore {
    graph: u64,
    slots: Vec<Slot>,
}

impl VaryingStore {
    pub(crate) fn new() -> Self {
        Self {
            graph: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
        }
    }

    pub(crate) fn graph_id(&self) -> u64 {
        self.graph
    }

    /// Declare a new slot
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the name is already taken.
    pub(crate) fn declare<T: Any + Send + Sync>(
        &mut self,
        name: &str,
        producer: Producer,
    ) -> Result<Varying<T>> {
        if self.slots.iter().any(|slot| slot.name == name) {
            engine_bail_config!("forward3d::TaskBuilder",
                "Varying '{}' is already declared", name);
        }

        self.slots.push(Slot {
            name: name.to_string(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            producer,
            value: None,
        });
        Ok(Varying::new(VaryingId { graph: self.graph, index: self.slots.len() - 1 }))
    }

    /// Find a slot by name, checking its declared type
    pub(crate) fn lookup<T: Any>(&self, name: &str) -> Result<Varying<T>> {
        let Some(index) = self.slots.iter().position(|slot| slot.name == name) else {
            engine_bail_config!("forward3d::TaskBuilder",
                "Unknown varying '{}'", name);
        };

        let slot = &self.slots[index];
        if slot.type_id != TypeId::of::<T>() {
            engine_bail_config!("forward3d::TaskBuilder",
                "Varying '{}' holds {}, requested as {}",
                name, slot.type_name, std::any::type_name::<T>());
        }

        Ok(Varying::new(VaryingId { graph: self.graph, index }))
    }

    pub(crate) fn producer(&self, id: VaryingId) -> Option<Producer> {
        self.slot(id).map(|slot| slot.producer)
    }

    /// Name of a slot, if the id belongs to this store
    pub fn name(&self, id: VaryingId) -> Option<&str> {
        self.slot(id).map(|slot| slot.name.as_str())
    }

    /// Whether the slot currently holds a value
    pub fn has_value(&self, id: VaryingId) -> bool {
        self.slot(id).is_some_and(|slot| slot.value.is_some())
    }

    /// Read the current value of a varying
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` if the slot is foreign or holds no value
    /// this frame (an input that was never bound).
    pub fn get<T: Clone + Any>(&self, varying: Varying<T>) -> Result<T> {
        let Some(slot) = self.slot(varying.id) else {
            return Err(Error::InvalidResource(format!("{:?} does not belong to this graph", varying)));
        };

        slot.value
            .as_ref()
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
            .ok_or_else(|| Error::InvalidResource(format!("Varying '{}' has no value", slot.name)))
    }

    pub(crate) fn set<T: Any + Send + Sync>(&mut self, varying: Varying<T>, value: T) {
        if let Some(slot) = self.slot_mut(varying.id) {
            slot.value = Some(Box::new(value));
        }
    }

    /// Drop every per-frame value; constants survive
    pub(crate) fn clear_frame_values(&mut self) {
        for slot in &mut self.slots {
            if slot.producer != Producer::Constant {
                slot.value = None;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, id: VaryingId) -> Option<&Slot> {
        if id.graph != self.graph {
            return None;
        }
        self.slots.get(id.index)
    }

    fn slot_mut(&mut self, id: VaryingId) -> Option<&mut Slot> {
        if id.graph != self.graph {
            return None;
        }
        self.slots.get_mut(id.index)
    }
}

#[cfg(test)]
#[path = "varying_tests.rs"]
mod tests;
