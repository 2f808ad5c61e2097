/// Task graph - the built, runnable sequence of jobs.

use std::any::Any;
use crate::error::Result;
use crate::{engine_bail_config, engine_trace};
use super::context::RenderContext;
use super::job::Node;
use super::varying::{Producer, Varying, VaryingStore};

/// Fixed sequence of jobs, run once per frame
///
/// Jobs run strictly in insertion order on the calling thread. At the end of
/// every run (successful or not) all frame values are dropped, so state that
/// must survive a frame is owned by the jobs themselves.
pub struct TaskGraph {
    store: VaryingStore,
    nodes: Vec<Node>,
}

impl TaskGraph {
    pub(crate) fn new(store: VaryingStore, nodes: Vec<Node>) -> Self {
        Self { store, nodes }
    }

    /// Bind a graph input for the next run
    ///
    /// # Errors
    ///
    /// `Error::Configuration` if the varying is not an input of this graph.
    pub fn set_input<T: Send + Sync + Any>(&mut self, varying: Varying<T>, value: T) -> Result<()> {
        if self.store.producer(varying.id()) != Some(Producer::Input) {
            engine_bail_config!("forward3d::TaskGraph",
                "{:?} is not an input of this graph", varying);
        }
        self.store.set(varying, value);
        Ok(())
    }

    /// Run every job once, in order
    ///
    /// The first failing job aborts the frame and its error is returned.
    pub fn run(&mut self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let mut result = Ok(());
        for node in &mut self.nodes {
            engine_trace!("forward3d::TaskGraph", "Running job '{}'", node.name);
            if let Err(err) = node.job.run(ctx, &mut self.store) {
                result = Err(err);
                break;
            }
        }

        self.store.clear_frame_values();
        result
    }

    /// Job names in execution order
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.name.as_str()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Resolve a varying by name (same rules as `TaskBuilder::named_varying`)
    pub fn named_varying<T: Any>(&self, name: &str) -> Result<Varying<T>> {
        self.store.lookup(name)
    }

    pub fn varyings(&self) -> &VaryingStore {
        &self.store
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
