/// Render items and the external item store.
///
/// The task graph never copies item payloads: buckets and jobs only carry
/// `ItemId` handles and read the payload from the `ItemStore` while drawing.

use std::sync::Arc;
use bitflags::bitflags;
use glam::Mat4;
use slotmap::{new_key_type, SlotMap};
use crate::gpu::{Batch, Pipeline, PrimitiveTopology};
use crate::shape::ShapeKey;
use super::bounds::AABB;

new_key_type! {
    /// Stable handle of a RenderItem within an ItemStore.
    ///
    /// A handle becomes invalid only when its own item is removed.
    pub struct ItemId;
}

bitflags! {
    /// Item capabilities, set by the item's owner
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u32 {
        /// Drawable shape
        const SHAPE      = 1 << 0;
        /// Meta item (groups or configures other items)
        const META       = 1 << 1;
        /// Zone: a meta item carrying lighting/background settings
        const ZONE       = 1 << 2;
        const LIGHT      = 1 << 3;
        const BACKGROUND = 1 << 4;
        /// Drawn in the overlay layer
        const LAYERED    = 1 << 5;
    }
}

/// How an item's geometry is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// Non-indexed draw
    Vertices {
        topology: PrimitiveTopology,
        vertex_count: u32,
        first_vertex: u32,
    },
    /// Indexed draw
    Indexed {
        topology: PrimitiveTopology,
        index_count: u32,
        first_index: u32,
        base_vertex: i32,
    },
}

impl DrawCall {
    /// Record this draw into a batch
    pub fn record(&self, batch: &mut Batch) {
        match *self {
            DrawCall::Vertices { topology, vertex_count, first_vertex } => {
                batch.draw(topology, vertex_count, first_vertex);
            }
            DrawCall::Indexed { topology, index_count, first_index, base_vertex } => {
                batch.draw_indexed(topology, index_count, first_index, base_vertex);
            }
        }
    }
}

/// Drawable entity payload, owned by the external item store
#[derive(Clone)]
pub struct RenderItem {
    /// World transform
    pub transform: Mat4,
    /// Local-space bounding box
    pub bound: AABB,
    /// Material/pipeline key selecting the shape pipeline
    pub shape_key: ShapeKey,
    pub flags: ItemFlags,
    pub draw: DrawCall,
    /// Pipeline used when `shape_key` has `OWN_PIPELINE`
    pub own_pipeline: Option<Arc<dyn Pipeline>>,
}

impl RenderItem {
    /// Shape item drawn through the shape plumber
    pub fn shape(transform: Mat4, bound: AABB, shape_key: ShapeKey, draw: DrawCall) -> Self {
        Self {
            transform,
            bound,
            shape_key,
            flags: ItemFlags::SHAPE,
            draw,
            own_pipeline: None,
        }
    }

    /// Meta item (no geometry of its own)
    pub fn meta(transform: Mat4, bound: AABB, flags: ItemFlags) -> Self {
        Self {
            transform,
            bound,
            shape_key: ShapeKey::INVALID,
            flags: flags | ItemFlags::META,
            draw: DrawCall::Vertices {
                topology: PrimitiveTopology::TriangleList,
                vertex_count: 0,
                first_vertex: 0,
            },
            own_pipeline: None,
        }
    }

    /// Shape item that brings its own pipeline instead of using the plumber
    pub fn with_own_pipeline(mut self, pipeline: Arc<dyn Pipeline>) -> Self {
        self.shape_key |= ShapeKey::OWN_PIPELINE;
        self.own_pipeline = Some(pipeline);
        self
    }

    pub fn is_zone(&self) -> bool {
        self.flags.contains(ItemFlags::ZONE)
    }
}

/// External item store
///
/// Filled by the scene/culling side; read-only while the graph runs.
#[derive(Default)]
pub struct ItemStore {
    items: SlotMap<ItemId, RenderItem>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: RenderItem) -> ItemId {
        self.items.insert(item)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<RenderItem> {
        self.items.remove(id)
    }

    pub fn get(&self, id: ItemId) -> Option<&RenderItem> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
