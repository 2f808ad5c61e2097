/// Shape draw pass

use std::sync::Arc;
use glam::Mat4;
use crate::error::Result;
use crate::gpu::do_in_batch;
use crate::item::ItemBucket;
use crate::shape::{render_state_sort_shapes, ShapePlumber};
use crate::task::{Job, RenderContext, Varying};

/// Draws a bucket of shapes through the shape plumber, in one batch
pub struct Draw {
    name: String,
}

impl Draw {
    /// `name` is used as the batch name
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Job for Draw {
    type Input = (Varying<Arc<ItemBucket>>, Varying<Arc<ShapePlumber>>);
    type Output = ();

    fn run(
        &mut self,
        ctx: &mut RenderContext<'_>,
        (bucket, plumber): (Arc<ItemBucket>, Arc<ShapePlumber>),
    ) -> Result<()> {
        let args = ctx.args;
        let view = ctx.view;
        let items = ctx.items;

        do_in_batch(ctx.gpu, &self.name, |batch| {
            batch.set_projection_transform(view.eval_projection_matrix());
            batch.set_view_transform(view.eval_view_transform());
            batch.set_model_transform(Mat4::IDENTITY);

            render_state_sort_shapes(args, items, &plumber, &bucket, batch);
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "draw_tests.rs"]
mod tests;
