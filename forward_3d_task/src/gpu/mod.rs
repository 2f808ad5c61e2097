/// GPU module - the batch/device interfaces the task graph records into
///
/// Backends (and the test mock) implement `GpuContext` and the resource traits.
/// The task graph never talks to a device API directly: every side effect goes
/// through a recorded `Batch` submitted to the context.

pub mod texture;
pub mod framebuffer;
pub mod shader;
pub mod pipeline;
pub mod batch;
pub mod context;

pub use texture::*;
pub use framebuffer::*;
pub use shader::*;
pub use pipeline::*;
pub use batch::*;
pub use context::*;

// Mock GPU context for tests (no GPU required)
#[cfg(test)]
pub mod mock_context;
