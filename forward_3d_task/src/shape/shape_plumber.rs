/// Shape plumber - registry of shape pipelines keyed by ShapeKey.
///
/// Populated once while the task graph is built, then shared immutably
/// (`Arc<ShapePlumber>`) by every draw job.

use std::sync::{Arc, Mutex};
use rustc_hash::{FxHashMap, FxHashSet};
use crate::error::Result;
use crate::engine_warn;
use crate::gpu::{Batch, Pipeline, Program, State};
use crate::item::RenderItem;
use crate::task::RenderArgs;
use super::shape_key::{ShapeFilter, ShapeKey};

/// Called once per pipeline group, right after the pipeline is bound
pub type BatchSetter = Arc<dyn Fn(&ShapePipeline, &mut Batch, &RenderArgs) + Send + Sync>;

/// Called once per item, right before its draw call
pub type ItemSetter = Arc<dyn Fn(&ShapePipeline, &mut Batch, &RenderArgs, &RenderItem) + Send + Sync>;

/// GPU pipeline plus the callbacks run around it
pub struct ShapePipeline {
    pub pipeline: Arc<dyn Pipeline>,
    pub program: Arc<dyn Program>,
    pub state: State,
    pub batch_setter: Option<BatchSetter>,
    pub item_setter: Option<ItemSetter>,
}

impl ShapePipeline {
    pub fn new(pipeline: Arc<dyn Pipeline>, program: Arc<dyn Program>, state: State) -> Self {
        Self {
            pipeline,
            program,
            state,
            batch_setter: None,
            item_setter: None,
        }
    }

    pub fn with_setters(mut self, batch_setter: BatchSetter, item_setter: ItemSetter) -> Self {
        self.batch_setter = Some(batch_setter);
        self.item_setter = Some(item_setter);
        self
    }
}

/// Pipeline registry
#[derive(Default)]
pub struct ShapePlumber {
    pipelines: FxHashMap<ShapeKey, Arc<ShapePipeline>>,
    /// Keys already reported missing (warned once each)
    missing: Mutex<FxHashSet<ShapeKey>>,
}

impl ShapePlumber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pipeline for one key, replacing any previous one
    pub fn add_pipeline(&mut self, key: ShapeKey, pipeline: ShapePipeline) {
        self.pipelines.insert(key, Arc::new(pipeline));
    }

    /// Register one pipeline per key matched by `filter`
    ///
    /// `create` is called for every expanded key; the first error aborts.
    pub fn add_pipeline_filtered<F>(&mut self, filter: ShapeFilter, mut create: F) -> Result<()>
    where
        F: FnMut(ShapeKey) -> Result<ShapePipeline>,
    {
        for key in filter.keys() {
            let pipeline = create(key)?;
            self.add_pipeline(key, pipeline);
        }
        Ok(())
    }

    pub fn pipeline(&self, key: ShapeKey) -> Option<&Arc<ShapePipeline>> {
        self.pipelines.get(&key)
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Bind the pipeline registered for `key` and run its batch setter
    ///
    /// Returns None (and warns the first time) when no pipeline matches.
    pub fn pick_pipeline(
        &self,
        batch: &mut Batch,
        args: &RenderArgs,
        key: ShapeKey,
    ) -> Option<Arc<ShapePipeline>> {
        let Some(shape_pipeline) = self.pipelines.get(&key) else {
            let mut missing = self.missing.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if missing.insert(key) {
                engine_warn!("forward3d::ShapePlumber",
                    "No pipeline registered for shape key {:?}", key);
            }
            return None;
        };

        batch.set_pipeline(&shape_pipeline.pipeline);
        if let Some(setter) = &shape_pipeline.batch_setter {
            setter(shape_pipeline, batch, args);
        }
        Some(shape_pipeline.clone())
    }
}

#[cfg(test)]
#[path = "shape_plumber_tests.rs"]
mod tests;
