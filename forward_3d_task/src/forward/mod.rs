/// Forward module - the forward-shading task and all of its jobs
///
/// `RenderForwardTask::build` wires the jobs below, in a fixed order, into a
/// `TaskBuilder`. Each job lives in its own file.

mod config;
mod lighting_model;
mod zone;
mod prepare_framebuffer;
mod stencil;
mod draw;
mod background;
mod debug_bounds;
mod hud;
mod blit;
mod fade;
mod render_forward_task;

pub use config::{ForwardTaskConfig, FramebufferConfig};
pub use lighting_model::{LightingModel, MakeLightingModel};
pub use zone::ZoneRenderer;
pub use prepare_framebuffer::PrepareFramebuffer;
pub use stencil::{
    PrepareStencil, StencilConfigFn, mark_background,
    STENCIL_BACKGROUND, STENCIL_MASK, STENCIL_SHAPE,
};
pub use draw::Draw;
pub use background::{BackgroundStage, DrawBackgroundStage, NoBackground};
pub use debug_bounds::DrawBounds;
pub use hud::{CompositeHUD, HudOperator};
pub use blit::Blit;
pub use fade::{FadeEffect, NoFadeEffect};
pub use render_forward_task::{ForwardInputs, ForwardTaskDeps, RenderForwardTask, SHAPE_PLUMBER};

// Frame harness shared by the job tests
#[cfg(test)]
mod test_frame;
