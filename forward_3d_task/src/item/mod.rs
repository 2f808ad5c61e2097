//! Render item module
//!
//! Lightweight handles into the external item store, and the per-category
//! buckets the culling/sorting stage produces for each frame.

mod bounds;
mod render_item;
mod bucket;

pub use bounds::AABB;
pub use render_item::{RenderItem, ItemId, ItemFlags, ItemStore, DrawCall};
pub use bucket::{BucketCategory, ItemBucket, FetchedItems};
