/// Job trait and input wiring
///
/// A job is a unit of per-frame work. Its input is a (possibly nested) tuple
/// of varyings; its output is stored into the varying `add_job` returns.

use std::any::Any;
use crate::error::Result;
use super::context::RenderContext;
use super::varying::{Varying, VaryingId, VaryingStore};

/// Set of varyings a job reads
///
/// Implemented for `()`, `Varying<T>` and pairs of inputs.
pub trait JobInput: Copy + Send + Sync + 'static {
    /// Values handed to the job
    type Value: Send;

    /// Read the current frame's values
    fn fetch(&self, store: &VaryingStore) -> Result<Self::Value>;

    /// Collect the varying ids this input depends on
    fn varying_ids(&self, out: &mut Vec<VaryingId>);
}

impl JobInput for () {
    type Value = ();

    fn fetch(&self, _store: &VaryingStore) -> Result<()> {
        Ok(())
    }

    fn varying_ids(&self, _out: &mut Vec<VaryingId>) {}
}

impl<T: Clone + Send + Sync + Any> JobInput for Varying<T> {
    type Value = T;

    fn fetch(&self, store: &VaryingStore) -> Result<T> {
        store.get(*self)
    }

    fn varying_ids(&self, out: &mut Vec<VaryingId>) {
        out.push(self.id());
    }
}

impl<A: JobInput, B: JobInput> JobInput for (A, B) {
    type Value = (A::Value, B::Value);

    fn fetch(&self, store: &VaryingStore) -> Result<Self::Value> {
        Ok((self.0.fetch(store)?, self.1.fetch(store)?))
    }

    fn varying_ids(&self, out: &mut Vec<VaryingId>) {
        self.0.varying_ids(out);
        self.1.varying_ids(out);
    }
}

/// A render job
///
/// Constructed once at graph build, run once per frame. Any state kept in
/// `self` (cached framebuffer, lazy pipeline) lives as long as the graph.
pub trait Job: Send + 'static {
    type Input: JobInput;
    type Output: Clone + Send + Sync + 'static;

    fn run(
        &mut self,
        ctx: &mut RenderContext<'_>,
        input: <Self::Input as JobInput>::Value,
    ) -> Result<Self::Output>;
}

/// Type-erased job node stored by the graph
pub(crate) trait ErasedJob: Send {
    fn run(&mut self, ctx: &mut RenderContext<'_>, store: &mut VaryingStore) -> Result<()>;
}

pub(crate) struct JobNode<J: Job> {
    pub(crate) job: J,
    pub(crate) input: J::Input,
    pub(crate) output: Varying<J::Output>,
}

impl<J: Job> ErasedJob for JobNode<J> {
    fn run(&mut self, ctx: &mut RenderContext<'_>, store: &mut VaryingStore) -> Result<()> {
        let input = self.input.fetch(store)?;
        let output = self.job.run(ctx, input)?;
        store.set(self.output, output);
        Ok(())
    }
}

/// Named node of the graph
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) job: Box<dyn ErasedJob>,
}
