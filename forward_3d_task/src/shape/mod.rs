/// Shape module - pipeline keys, the shape pipeline registry and the
/// render-state-sorted dispatch of shape items.

mod shape_key;
mod shape_plumber;
mod sort;
mod forward_pipelines;

pub use shape_key::{ShapeKey, ShapeFilter};
pub use shape_plumber::{ShapePipeline, ShapePlumber, BatchSetter, ItemSetter};
pub use sort::render_state_sort_shapes;
pub use forward_pipelines::{init_forward_pipelines, PipelineInitFn};
