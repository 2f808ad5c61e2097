/// Task builder - declares varyings and appends jobs in execution order.

use std::any::Any;
use crate::error::Result;
use crate::{engine_bail_config, engine_debug};
use super::graph::TaskGraph;
use super::job::{Job, JobInput, JobNode, Node};
use super::varying::{Producer, Varying, VaryingStore};

/// Builds a `TaskGraph`
///
/// All wiring errors (dangling input, foreign varying, unknown name,
/// wrong type) surface here as `Error::Configuration`, before any frame runs.
pub struct TaskBuilder {
    store: VaryingStore,
    nodes: Vec<Node>,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self {
            store: VaryingStore::new(),
            nodes: Vec::new(),
        }
    }

    /// Declare a graph input, bound with `TaskGraph::set_input` before each run
    pub fn input<T: Clone + Send + Sync + Any>(&mut self, name: &str) -> Result<Varying<T>> {
        self.store.declare(name, Producer::Input)
    }

    /// Declare a constant varying, set once and kept across frames
    pub fn constant<T: Clone + Send + Sync + Any>(&mut self, name: &str, value: T) -> Result<Varying<T>> {
        let varying = self.store.declare(name, Producer::Constant)?;
        self.store.set(varying, value);
        Ok(varying)
    }

    /// Declare a slot with no producer
    ///
    /// Feeding it to a job is rejected until something produces it.
    pub fn reserve<T: Clone + Send + Sync + Any>(&mut self, name: &str) -> Result<Varying<T>> {
        self.store.declare(name, Producer::Reserved)
    }

    /// Resolve a declared varying by name
    ///
    /// # Errors
    ///
    /// `Error::Configuration` if the name is unknown or the slot holds another type.
    pub fn named_varying<T: Any>(&self, name: &str) -> Result<Varying<T>> {
        self.store.lookup(name)
    }

    /// Append a job; its output varying is named after the job
    ///
    /// # Errors
    ///
    /// `Error::Configuration` if the name is taken, or if an input varying
    /// belongs to another builder or has no producer.
    pub fn add_job<J: Job>(&mut self, name: &str, job: J, input: J::Input) -> Result<Varying<J::Output>> {
        let mut ids = Vec::new();
        input.varying_ids(&mut ids);

        for id in ids {
            if id.graph != self.store.graph_id() {
                engine_bail_config!("forward3d::TaskBuilder",
                    "Job '{}' reads a varying from another task builder", name);
            }
            match self.store.producer(id) {
                Some(Producer::Reserved) | None => {
                    let varying_name = self.store.name(id).unwrap_or("?").to_string();
                    engine_bail_config!("forward3d::TaskBuilder",
                        "Job '{}' reads varying '{}' which no earlier job produces", name, varying_name);
                }
                Some(_) => {}
            }
        }

        let index = self.nodes.len();
        let output = self.store.declare(name, Producer::Job(index))?;
        self.nodes.push(Node {
            name: name.to_string(),
            job: Box::new(JobNode { job, input, output }),
        });

        engine_debug!("forward3d::TaskBuilder", "Added job #{} '{}'", index, name);
        Ok(output)
    }

    /// Number of jobs added so far
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Finish building
    pub fn build(self) -> TaskGraph {
        TaskGraph::new(self.store, self.nodes)
    }
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
