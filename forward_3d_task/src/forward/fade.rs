/// Fade effect hooks
///
/// The fade subsystem is external. The forward task only asks it for the
/// setters attached to fade pipelines, and lets it add its own jobs.

use std::sync::Arc;
use crate::error::Result;
use crate::gpu::Batch;
use crate::item::{ItemBucket, RenderItem};
use crate::shape::{BatchSetter, ItemSetter, ShapePipeline};
use crate::task::{RenderArgs, TaskBuilder, Varying};

pub trait FadeEffect: Send + Sync {
    /// Run once per fade pipeline group
    fn batch_setter(&self) -> BatchSetter;

    /// Run once per fading item, uploads its fade uniforms
    fn item_setter(&self) -> ItemSetter;

    /// Add the fade jobs that work on the opaque bucket
    fn build(&self, builder: &mut TaskBuilder, opaques: Varying<Arc<ItemBucket>>) -> Result<()>;
}

/// Fade effect that does nothing
pub struct NoFadeEffect;

impl FadeEffect for NoFadeEffect {
    fn batch_setter(&self) -> BatchSetter {
        Arc::new(|_: &ShapePipeline, _: &mut Batch, _: &RenderArgs| {})
    }

    fn item_setter(&self) -> ItemSetter {
        Arc::new(|_: &ShapePipeline, _: &mut Batch, _: &RenderArgs, _: &RenderItem| {})
    }

    fn build(&self, _builder: &mut TaskBuilder, _opaques: Varying<Arc<ItemBucket>>) -> Result<()> {
        Ok(())
    }
}
