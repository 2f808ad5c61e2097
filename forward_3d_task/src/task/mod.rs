/// Task module - typed data-flow graph of render jobs
///
/// Jobs are added once to a `TaskBuilder`, which wires their inputs and
/// outputs through typed varyings. The resulting `TaskGraph` runs every job
/// once per frame, strictly in insertion order.

pub mod varying;
pub mod job;
pub mod context;
pub mod builder;
pub mod graph;

pub use varying::{Varying, VaryingId, VaryingStore};
pub use job::{Job, JobInput};
pub use context::{RenderContext, RenderArgs, RenderMode};
pub use builder::TaskBuilder;
pub use graph::TaskGraph;
