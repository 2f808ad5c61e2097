/// Zone filtering

use std::sync::Arc;
use crate::error::Result;
use crate::item::{BucketCategory, ItemBucket};
use crate::task::{Job, RenderContext, Varying};

/// Filters the meta bucket down to zone items
///
/// Output is a new Zone bucket; bucket order is preserved and stale
/// handles are dropped.
pub struct ZoneRenderer;

impl Job for ZoneRenderer {
    type Input = Varying<Arc<ItemBucket>>;
    type Output = Arc<ItemBucket>;

    fn run(&mut self, ctx: &mut RenderContext<'_>, metas: Arc<ItemBucket>) -> Result<Arc<ItemBucket>> {
        let zones = metas
            .items()
            .iter()
            .copied()
            .filter(|id| ctx.items.get(*id).is_some_and(|item| item.is_zone()))
            .collect();

        Ok(Arc::new(ItemBucket::new(BucketCategory::Zone, zones)))
    }
}

#[cfg(test)]
#[path = "zone_tests.rs"]
mod tests;
