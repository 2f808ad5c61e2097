/// Shape keys: the material/pipeline signature of a shape item

use bitflags::bitflags;

bitflags! {
    /// Pipeline signature of a shape item
    ///
    /// Items with equal keys share a shape pipeline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ShapeKey: u32 {
        const MATERIAL     = 1 << 0;
        const UNLIT        = 1 << 1;
        const TRANSLUCENT  = 1 << 2;
        const TANGENTS     = 1 << 3;
        const SKINNED      = 1 << 4;
        const NO_CULL_FACE = 1 << 5;
        const WIREFRAME    = 1 << 6;
        const FADE         = 1 << 7;
        /// Item draws with its own pipeline, bypassing the plumber
        const OWN_PIPELINE = 1 << 8;
        /// Never drawn
        const INVALID      = 1 << 31;
    }
}

impl ShapeKey {
    /// Bits a filter may leave free and have expanded
    pub const EXPANDABLE: ShapeKey = ShapeKey::all()
        .difference(ShapeKey::OWN_PIPELINE)
        .difference(ShapeKey::INVALID);

    pub fn is_valid(&self) -> bool {
        !self.contains(ShapeKey::INVALID)
    }

    pub fn has_own_pipeline(&self) -> bool {
        self.contains(ShapeKey::OWN_PIPELINE)
    }
}

/// Set of shape keys: every key whose `mask` bits equal `flags`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeFilter {
    flags: ShapeKey,
    mask: ShapeKey,
}

impl ShapeFilter {
    /// Filter fixing the `mask` bits to the values in `flags`
    pub fn new(flags: ShapeKey, mask: ShapeKey) -> Self {
        Self { flags: flags & mask, mask }
    }

    /// Filter matching exactly one key
    pub fn exact(key: ShapeKey) -> Self {
        Self::new(key, ShapeKey::all())
    }

    /// Leave `bits` free (matching either value)
    pub fn with_free(self, bits: ShapeKey) -> Self {
        Self::new(self.flags, self.mask.difference(bits))
    }

    pub fn flags(&self) -> ShapeKey {
        self.flags
    }

    pub fn mask(&self) -> ShapeKey {
        self.mask
    }

    pub fn matches(&self, key: ShapeKey) -> bool {
        key & self.mask == self.flags
    }

    /// Every key matched by this filter, over the expandable free bits
    ///
    /// Keys come out in ascending bit order.
    pub fn keys(&self) -> Vec<ShapeKey> {
        let free: Vec<ShapeKey> = ShapeKey::EXPANDABLE
            .difference(self.mask)
            .iter()
            .collect();

        let mut keys = Vec::with_capacity(1 << free.len());
        for combination in 0u32..(1 << free.len()) {
            let mut key = self.flags;
            for (bit, flag) in free.iter().enumerate() {
                if combination & (1 << bit) != 0 {
                    key |= *flag;
                }
            }
            keys.push(key);
        }
        keys.sort();
        keys
    }
}

#[cfg(test)]
#[path = "shape_key_tests.rs"]
mod tests;
