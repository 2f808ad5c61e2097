/*!
# Forward 3D Task

Forward-shading render task graph.

This crate assembles a forward frame as a fixed, typed data-flow graph of
render jobs. Jobs exchange named values ("varyings") and record their GPU
work into batches submitted to a backend through the `GpuContext` trait.
Culling, materials, lighting, fade, HUD and the GPU backend itself are
external collaborators passed in when the task is built.

## Architecture

- **TaskBuilder / TaskGraph**: job wiring checked at build time, sequential per-frame execution
- **Job**: a unit of per-frame work with typed input and output varyings
- **GpuContext**: resource creation and batch submission, implemented by backends
- **ShapePlumber**: shape pipeline registry keyed by `ShapeKey`
- **RenderForwardTask**: the forward jobs, from framebuffer preparation to the final blit
*/

// Internal modules
mod error;
pub mod log;
pub mod gpu;
pub mod camera;
pub mod item;
pub mod task;
pub mod shape;
pub mod forward;

// Main forward3d namespace module
pub mod forward3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Task graph
    pub use crate::task::{
        Job, JobInput, RenderArgs, RenderContext, RenderMode, TaskBuilder, TaskGraph, Varying,
    };

    // Forward task
    pub use crate::forward::{ForwardInputs, ForwardTaskConfig, ForwardTaskDeps, RenderForwardTask};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger};
    }

    // GPU interfaces
    pub mod gpu {
        pub use crate::gpu::*;
    }

    // Camera / view frustum
    pub mod camera {
        pub use crate::camera::*;
    }

    // Render items and buckets
    pub mod item {
        pub use crate::item::*;
    }

    // Shape pipelines
    pub mod shape {
        pub use crate::shape::*;
    }

    // Forward jobs
    pub mod forward {
        pub use crate::forward::*;
    }
}

// Re-export math library at crate root
pub use glam;
