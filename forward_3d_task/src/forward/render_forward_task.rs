/// Forward rendering task
///
/// Wires the forward jobs into a task builder in their fixed order:
///
/// | # | Job | Input | Output |
/// |---|-----|-------|--------|
/// | 1 | (shape plumber constant, fade jobs) | - | plumber |
/// | 2 | LightingModel | - | `Arc<LightingModel>` |
/// | 3 | ZoneRenderer | metas | zones |
/// | 4 | PrepareFramebuffer | - | framebuffer |
/// | 5 | PrepareStencil | framebuffer | - |
/// | 6 | DrawOpaques | opaques, plumber | - |
/// | 7 | DrawBackgroundDeferred | lighting model | - |
/// | 8 | DrawTransparents | transparents, plumber | - |
/// | 9 | DrawMetaBounds, DrawBounds, DrawTransparentBounds, DrawZones | bucket | - |
/// | 10 | HUD | - | - |
/// | 11 | Blit | framebuffer | - |

use std::sync::Arc;
use crate::error::Result;
use crate::engine_info;
use crate::gpu::GpuContext;
use crate::item::{BucketCategory, FetchedItems, ItemBucket};
use crate::shape::{init_forward_pipelines, PipelineInitFn, ShapePlumber};
use crate::task::{TaskBuilder, TaskGraph, Varying};
use super::background::{BackgroundStage, DrawBackgroundStage, NoBackground};
use super::blit::Blit;
use super::config::ForwardTaskConfig;
use super::debug_bounds::DrawBounds;
use super::draw::Draw;
use super::fade::{FadeEffect, NoFadeEffect};
use super::hud::{CompositeHUD, HudOperator};
use super::lighting_model::MakeLightingModel;
use super::prepare_framebuffer::PrepareFramebuffer;
use super::stencil::{mark_background, PrepareStencil, StencilConfigFn};
use super::zone::ZoneRenderer;

/// Name of the constant varying holding the shape plumber
pub const SHAPE_PLUMBER: &str = "shape_plumber";

/// The per-category bucket inputs of the forward task
///
/// Every category is declared, including the ones the forward task does
/// not consume (lights, overlays, background).
pub struct ForwardInputs {
    buckets: Vec<Varying<Arc<ItemBucket>>>,
}

impl ForwardInputs {
    /// Declare one input per bucket category, named after the category
    pub fn declare(builder: &mut TaskBuilder) -> Result<Self> {
        let mut buckets = Vec::with_capacity(BucketCategory::COUNT);
        for category in BucketCategory::ALL {
            buckets.push(builder.input(category.varying_name())?);
        }
        Ok(Self { buckets })
    }

    pub fn bucket(&self, category: BucketCategory) -> Varying<Arc<ItemBucket>> {
        self.buckets[category.index()]
    }

    /// Bind this frame's buckets
    pub fn bind(&self, graph: &mut TaskGraph, fetched: &FetchedItems) -> Result<()> {
        for category in BucketCategory::ALL {
            graph.set_input(self.bucket(category), fetched.bucket(category).clone())?;
        }
        Ok(())
    }
}

/// Collaborators and configuration of the forward task
pub struct ForwardTaskDeps<'a> {
    /// Device used to create the shape pipelines at build time
    pub gpu: &'a mut dyn GpuContext,
    pub fade: Arc<dyn FadeEffect>,
    pub init_pipelines: PipelineInitFn,
    pub background: Arc<dyn BackgroundStage>,
    pub hud: Option<HudOperator>,
    pub stencil_config: StencilConfigFn,
    pub config: ForwardTaskConfig,
}

impl<'a> ForwardTaskDeps<'a> {
    /// Default collaborators: no fade, no background, no HUD
    pub fn new(gpu: &'a mut dyn GpuContext) -> Self {
        Self {
            gpu,
            fade: Arc::new(NoFadeEffect),
            init_pipelines: init_forward_pipelines,
            background: Arc::new(NoBackground),
            hud: None,
            stencil_config: mark_background,
            config: ForwardTaskConfig::default(),
        }
    }

    pub fn with_fade(mut self, fade: Arc<dyn FadeEffect>) -> Self {
        self.fade = fade;
        self
    }

    pub fn with_init_pipelines(mut self, init_pipelines: PipelineInitFn) -> Self {
        self.init_pipelines = init_pipelines;
        self
    }

    pub fn with_background(mut self, background: Arc<dyn BackgroundStage>) -> Self {
        self.background = background;
        self
    }

    pub fn with_hud(mut self, hud: HudOperator) -> Self {
        self.hud = Some(hud);
        self
    }

    pub fn with_stencil_config(mut self, stencil_config: StencilConfigFn) -> Self {
        self.stencil_config = stencil_config;
        self
    }

    pub fn with_config(mut self, config: ForwardTaskConfig) -> Self {
        self.config = config;
        self
    }
}

pub struct RenderForwardTask;

impl RenderForwardTask {
    /// Add the forward jobs to `builder`
    ///
    /// The bucket inputs must already be declared (see `ForwardInputs`);
    /// they are resolved by name.
    ///
    /// # Errors
    ///
    /// `Error::Configuration` for a missing or mistyped bucket input.
    /// Pipeline creation errors from the registry initializer propagate.
    pub fn build(builder: &mut TaskBuilder, deps: ForwardTaskDeps<'_>) -> Result<()> {
        let opaques = builder.named_varying::<Arc<ItemBucket>>(BucketCategory::OpaqueShape.varying_name())?;
        let transparents = builder.named_varying::<Arc<ItemBucket>>(BucketCategory::TransparentShape.varying_name())?;
        let metas = builder.named_varying::<Arc<ItemBucket>>(BucketCategory::Meta.varying_name())?;

        let mut plumber = ShapePlumber::new();
        (deps.init_pipelines)(&mut plumber, deps.gpu, deps.fade.batch_setter(), deps.fade.item_setter())?;
        let plumber = builder.constant(SHAPE_PLUMBER, Arc::new(plumber))?;

        deps.fade.build(builder, opaques)?;

        let config = deps.config;
        let lighting = builder.add_job("LightingModel", MakeLightingModel::new(config.lighting), ())?;
        let zones = builder.add_job("ZoneRenderer", ZoneRenderer, metas)?;

        let framebuffer = builder.add_job("PrepareFramebuffer", PrepareFramebuffer::new(config.framebuffer), ())?;
        builder.add_job("PrepareStencil", PrepareStencil::new(deps.stencil_config), framebuffer)?;

        builder.add_job("DrawOpaques", Draw::new("DrawOpaques"), (opaques, plumber))?;
        builder.add_job("DrawBackgroundDeferred", DrawBackgroundStage::new(deps.background), lighting)?;
        builder.add_job("DrawTransparents", Draw::new("DrawTransparents"), (transparents, plumber))?;

        let bounds = config.draw_debug_bounds;
        for (name, input) in [
            ("DrawMetaBounds", metas),
            ("DrawBounds", opaques),
            ("DrawTransparentBounds", transparents),
            ("DrawZones", zones),
        ] {
            builder.add_job(name, DrawBounds::new(name, bounds), input)?;
        }

        builder.add_job("HUD", CompositeHUD::new(deps.hud), ())?;
        builder.add_job("Blit", Blit, framebuffer)?;

        engine_info!("forward3d::RenderForwardTask",
            "Forward task built ({} jobs)", builder.node_count());
        Ok(())
    }

    /// Declare the bucket inputs and build the forward task into a new graph
    pub fn build_graph(deps: ForwardTaskDeps<'_>) -> Result<(TaskGraph, ForwardInputs)> {
        let mut builder = TaskBuilder::new();
        let inputs = ForwardInputs::declare(&mut builder)?;
        Self::build(&mut builder, deps)?;
        Ok((builder.build(), inputs))
    }
}

#[cfg(test)]
#[path = "render_forward_task_tests.rs"]
mod tests;
