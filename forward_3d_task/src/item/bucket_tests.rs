use glam::Mat4;
use super::*;
use crate::item::{AABB, ItemStore, ItemFlags, RenderItem, DrawCall};
use crate::gpu::PrimitiveTopology;
use crate::shape::ShapeKey;

fn insert_shape(store: &mut ItemStore) -> ItemId {
    store.insert(RenderItem::shape(
        Mat4::IDENTITY,
        AABB::unit(),
        ShapeKey::MATERIAL,
        DrawCall::Vertices { topology: PrimitiveTopology::TriangleList, vertex_count: 3, first_vertex: 0 },
    ))
}

// ============================================================================
// Tests: BucketCategory
// ============================================================================

#[test]
fn test_category_indices_match_slot_order() {
    for (i, category) in BucketCategory::ALL.iter().enumerate() {
        assert_eq!(category.index(), i);
    }
}

#[test]
fn test_category_varying_names_are_unique() {
    let mut names: Vec<&str> = BucketCategory::ALL.iter().map(|c| c.varying_name()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), BucketCategory::COUNT);
}

// ============================================================================
// Tests: ItemBucket
// ============================================================================

#[test]
fn test_bucket_preserves_order() {
    let mut store = ItemStore::new();
    let a = insert_shape(&mut store);
    let b = insert_shape(&mut store);
    let bucket = ItemBucket::new(BucketCategory::OpaqueShape, vec![b, a]);

    assert_eq!(bucket.category(), BucketCategory::OpaqueShape);
    assert_eq!(bucket.items(), &[b, a]);
    assert_eq!(bucket.len(), 2);
}

#[test]
fn test_empty_bucket() {
    let bucket = ItemBucket::empty(BucketCategory::Light);
    assert!(bucket.is_empty());
    assert_eq!(bucket.category(), BucketCategory::Light);
}

// ============================================================================
// Tests: FetchedItems
// ============================================================================

#[test]
fn test_fetched_items_default_empty() {
    let fetched = FetchedItems::new();
    for category in BucketCategory::ALL {
        assert!(fetched.bucket(category).is_empty());
        assert_eq!(fetched.bucket(category).category(), category);
    }
}

#[test]
fn test_fetched_items_with_bucket() {
    let mut store = ItemStore::new();
    let a = insert_shape(&mut store);
    let fetched = FetchedItems::new()
        .with_bucket(ItemBucket::new(BucketCategory::TransparentShape, vec![a]));

    assert_eq!(fetched.bucket(BucketCategory::TransparentShape).items(), &[a]);
    assert!(fetched.bucket(BucketCategory::OpaqueShape).is_empty());
}

// ============================================================================
// Tests: ItemStore
// ============================================================================

#[test]
fn test_item_store_stale_handle() {
    let mut store = ItemStore::new();
    let a = insert_shape(&mut store);
    assert_eq!(store.len(), 1);

    store.remove(a);
    assert!(store.get(a).is_none());
    assert!(store.is_empty());
}

#[test]
fn test_meta_item_flags() {
    let item = RenderItem::meta(Mat4::IDENTITY, AABB::unit(), ItemFlags::ZONE);
    assert!(item.is_zone());
    assert!(item.flags.contains(ItemFlags::META));
    assert!(item.shape_key.contains(ShapeKey::INVALID));
}
