/// Item buckets and the structured per-category input bundle.

use std::sync::Arc;
use super::render_item::ItemId;

/// Bucket categories produced by the culling/sorting stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketCategory {
    OpaqueShape,
    TransparentShape,
    Meta,
    Zone,
    Background,
    Light,
    OverlayOpaqueShape,
    OverlayTransparentShape,
}

impl BucketCategory {
    pub const COUNT: usize = 8;

    /// All categories, in slot order
    pub const ALL: [BucketCategory; Self::COUNT] = [
        BucketCategory::OpaqueShape,
        BucketCategory::TransparentShape,
        BucketCategory::Meta,
        BucketCategory::Zone,
        BucketCategory::Background,
        BucketCategory::Light,
        BucketCategory::OverlayOpaqueShape,
        BucketCategory::OverlayTransparentShape,
    ];

    /// Slot index within FetchedItems
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Name of the graph input varying carrying this category
    pub fn varying_name(&self) -> &'static str {
        match self {
            BucketCategory::OpaqueShape => "opaques",
            BucketCategory::TransparentShape => "transparents",
            BucketCategory::Meta => "metas",
            BucketCategory::Zone => "zones",
            BucketCategory::Background => "background",
            BucketCategory::Light => "lights",
            BucketCategory::OverlayOpaqueShape => "overlay_opaques",
            BucketCategory::OverlayTransparentShape => "overlay_transparents",
        }
    }
}

/// Ordered collection of item handles of one category
///
/// Produced once per frame and shared read-only (`Arc<ItemBucket>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBucket {
    category: BucketCategory,
    items: Vec<ItemId>,
}

impl ItemBucket {
    pub fn new(category: BucketCategory, items: Vec<ItemId>) -> Self {
        Self { category, items }
    }

    pub fn empty(category: BucketCategory) -> Self {
        Self::new(category, Vec::new())
    }

    pub fn category(&self) -> BucketCategory {
        self.category
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Structured input bundle: one bucket per category
///
/// Categories the producer did not fill are empty buckets.
#[derive(Debug, Clone)]
pub struct FetchedItems {
    buckets: [Arc<ItemBucket>; BucketCategory::COUNT],
}

impl FetchedItems {
    pub fn new() -> Self {
        Self {
            buckets: BucketCategory::ALL.map(|category| Arc::new(ItemBucket::empty(category))),
        }
    }

    /// Replace the bucket of `bucket.category()`
    pub fn with_bucket(mut self, bucket: ItemBucket) -> Self {
        let index = bucket.category().index();
        self.buckets[index] = Arc::new(bucket);
        self
    }

    pub fn bucket(&self, category: BucketCategory) -> &Arc<ItemBucket> {
        &self.buckets[category.index()]
    }
}

impl Default for FetchedItems {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "bucket_tests.rs"]
mod tests;
