//! Per-item size sources.

use reflow_geometry::Size;
use rustc_hash::FxHashMap;

use crate::ItemKey;

/// Source of measured item sizes. A `None` means the item has not been
/// measured yet; calculators propagate that as "layout not ready".
pub trait SizeLookup {
    fn size_of(&self, key: &ItemKey) -> Option<Size>;
}

impl SizeLookup for FxHashMap<ItemKey, Size> {
    fn size_of(&self, key: &ItemKey) -> Option<Size> {
        self.get(key).copied()
    }
}

/// Every item shares one measured size. Used by hosts whose cells are
/// uniform and by tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformSize(pub Size);

impl SizeLookup for UniformSize {
    fn size_of(&self, _key: &ItemKey) -> Option<Size> {
        Some(self.0)
    }
}
