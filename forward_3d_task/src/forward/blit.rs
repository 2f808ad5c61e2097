/// Final blit to the display framebuffer

use std::sync::Arc;
use crate::error::Result;
use crate::engine_warn;
use crate::gpu::{do_in_batch, BlitRect, Framebuffer};
use crate::task::{Job, RenderContext, RenderMode, Varying};

/// Copies the working framebuffer into `RenderArgs::blit_framebuffer`
///
/// Always the last job of the forward task.
pub struct Blit;

impl Blit {
    /// Destination rectangle for the given source rectangle
    pub fn destination_rect(source: BlitRect, mode: RenderMode) -> BlitRect {
        match mode {
            RenderMode::Default => source,
            RenderMode::Mirror => BlitRect {
                x0: source.x1,
                y0: source.y0,
                x1: source.x0,
                y1: source.y1,
            },
        }
    }
}

impl Job for Blit {
    type Input = Varying<Arc<dyn Framebuffer>>;
    type Output = ();

    fn run(&mut self, ctx: &mut RenderContext<'_>, framebuffer: Arc<dyn Framebuffer>) -> Result<()> {
        let args = ctx.args;
        let Some(display) = &args.blit_framebuffer else {
            engine_warn!("forward3d::Blit", "No blit framebuffer, nothing presented");
            return Ok(());
        };

        let source = args.viewport.to_rect();
        let destination = Self::destination_rect(source, args.render_mode);

        do_in_batch(ctx.gpu, "Blit", |batch| {
            batch.set_framebuffer(display);
            batch.blit(&framebuffer, source, display, destination);
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "blit_tests.rs"]
mod tests;
