/// Render-state sorted dispatch of shape items

use crate::engine_debug;
use crate::gpu::Batch;
use crate::item::{ItemBucket, ItemId, ItemStore, RenderItem};
use crate::task::RenderArgs;
use super::shape_key::ShapeKey;
use super::shape_plumber::ShapePlumber;

/// Record the draws of `bucket` grouped by shape key
///
/// Items are stable-sorted by key, so each pipeline is bound once per
/// group and items keep their bucket order inside a group. Stale handles,
/// invalid keys and keys with no registered pipeline are skipped.
/// Own-pipeline items are drawn last, in bucket order.
pub fn render_state_sort_shapes(
    args: &RenderArgs,
    items: &ItemStore,
    plumber: &ShapePlumber,
    bucket: &ItemBucket,
    batch: &mut Batch,
) {
    let mut sorted: Vec<(ShapeKey, ItemId)> = Vec::with_capacity(bucket.len());
    let mut own_pipeline: Vec<&RenderItem> = Vec::new();

    for &id in bucket.items() {
        let Some(item) = items.get(id) else {
            continue;
        };
        let key = item.shape_key;
        if !key.is_valid() {
            engine_debug!("forward3d::Draw", "Skipping item {:?} with invalid shape key", id);
            continue;
        }
        if key.has_own_pipeline() {
            own_pipeline.push(item);
        } else {
            sorted.push((key, id));
        }
    }

    sorted.sort_by_key(|(key, _)| key.bits());

    for group in sorted.chunk_by(|a, b| a.0 == b.0) {
        let key = group[0].0;
        let Some(shape_pipeline) = plumber.pick_pipeline(batch, args, key) else {
            continue;
        };

        for (_, id) in group {
            let Some(item) = items.get(*id) else {
                continue;
            };
            batch.set_model_transform(item.transform);
            if let Some(setter) = &shape_pipeline.item_setter {
                setter(&shape_pipeline, batch, args, item);
            }
            item.draw.record(batch);
        }
    }

    for item in own_pipeline {
        let Some(pipeline) = &item.own_pipeline else {
            continue;
        };
        batch.set_pipeline(pipeline);
        batch.set_model_transform(item.transform);
        item.draw.record(batch);
    }
}

#[cfg(test)]
#[path = "sort_tests.rs"]
mod tests;
