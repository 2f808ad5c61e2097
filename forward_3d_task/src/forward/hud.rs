/// HUD compositing

use std::sync::Arc;
use crate::error::Result;
use crate::gpu::{do_in_batch, Batch};
use crate::task::{Job, RenderArgs, RenderContext};

/// Records the HUD composite into a batch; provided by the display side
pub type HudOperator = Arc<dyn Fn(&mut Batch, &RenderArgs) + Send + Sync>;

pub struct CompositeHUD {
    operator: Option<HudOperator>,
}

impl CompositeHUD {
    pub fn new(operator: Option<HudOperator>) -> Self {
        Self { operator }
    }
}

impl Job for CompositeHUD {
    type Input = ();
    type Output = ();

    fn run(&mut self, ctx: &mut RenderContext<'_>, _input: ()) -> Result<()> {
        let Some(operator) = &self.operator else {
            return Ok(());
        };

        let args = ctx.args;
        do_in_batch(ctx.gpu, "HUD", |batch| {
            batch.enable_stereo(false);
            operator(batch, args);
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "hud_tests.rs"]
mod tests;
