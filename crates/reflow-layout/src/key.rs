//! Stable item identity.

use std::fmt;
use std::rc::Rc;

/// Opaque stable identifier for one item, independent of its current
/// order index. Cheap to clone; the engine is single-threaded by
/// design, so the backing storage is an `Rc<str>`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(Rc<str>);

impl ItemKey {
    pub fn new(key: impl Into<Rc<str>>) -> Self {
        Self(key.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemKey {
    fn from(key: &str) -> Self {
        Self(Rc::from(key))
    }
}

impl From<String> for ItemKey {
    fn from(key: String) -> Self {
        Self(Rc::from(key))
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemKey({})", self.0)
    }
}
