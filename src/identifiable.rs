use std::fmt::Debug;

/// Something that owns an identifier of type `K`.
///
/// Identifiers are opaque to the collections that hold them: they are only
/// compared for equality and ordering. Uniqueness is checked by `DataSet` on
/// insertion, never here.
pub trait Identifiable<K>
where
    K: Ord + Clone + Debug,
{
    /// Returns the current identifier
    fn id(&self) -> &K;

    /// Replaces the identifier in place
    fn reassign(&mut self, id: K);
}
