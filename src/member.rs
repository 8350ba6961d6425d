use crate::identifiable::Identifiable;
use crate::typed_value::TypedValue;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Identity of a `DataSet`, independent of its identifier.
///
/// A handle is allocated for every new collection. Clones share it until
/// one of them is changed, at which point the changed copy gets a fresh
/// handle. Two sets with equal handles are the same collection for the
/// self-reference check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetHandle(u64);

impl SetHandle {
    pub(crate) fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

/// Anything a `DataSet` keyed by `K` can hold: a `DataPoint` or another
/// `DataSet` whose own identifier type is `K`.
pub trait Member<K>: Identifiable<K> + TypedValue
where
    K: Ord + Clone + Debug,
{
    /// True for nested collections
    fn is_collection(&self) -> bool {
        false
    }

    /// Number of plain values at or below this member
    fn leaf_count(&self) -> usize {
        1
    }
}
