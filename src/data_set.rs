use crate::data_point::DataPoint;
use crate::error::DataError;
use crate::identifiable::Identifiable;
use crate::member::{Member, SetHandle};
use crate::typed_value::{try_get_as, TypeTag, TypedValue};
use std::any::Any;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::rc::Rc;
use tracing::debug;

/// A collection of identified values of unrelated types.
///
/// `K` is the identifier of the collection itself, used when it is nested
/// inside another collection. `C` is the identifier type of its direct
/// members. A member is either a [`DataPoint`] or another `DataSet<C, _>`,
/// so differently keyed collections can be stacked inside each other.
///
/// Members are stored behind `Rc` and are never handed out mutably, which
/// makes a stored member immutable for as long as it lives in the set.
///
/// A clone counts as the same collection until either copy is changed
/// (`insert*`, `add*`, `reassign`, `clear`); from then on the changed copy
/// is a collection of its own. Because nested sets are stored as copies,
/// nesting always builds a finite tree.
///
/// Counting values with [`total_len`](DataSet::total_len) and dropping a set
/// both recurse once per nesting level, so trees nested many thousands of
/// levels deep can exhaust the stack.
///
/// # Examples
///
/// ```
/// use dataset::DataSet;
///
/// let mut inner = DataSet::<String, i32>::new("inner".to_string());
/// inner.add("Secret Sauce".to_string(), 569);
///
/// let mut outer = DataSet::<String, String>::default();
/// outer.add(42, "IntValue".to_string());
/// outer.add_collection(inner);
///
/// assert_eq!(outer.len(), 2);
/// assert_eq!(outer.get_as::<i32>(&"IntValue".to_string()), Some(&42));
///
/// let nested = outer
///     .get_collection::<i32>(&"inner".to_string())
///     .expect("nested collection");
/// assert_eq!(nested.get_as::<String>(&569).map(String::as_str), Some("Secret Sauce"));
/// ```
pub struct DataSet<K = String, C = String>
where
    C: Ord + Clone + Debug,
{
    id: K,
    identity: Rc<SetHandle>,
    members: BTreeMap<C, Rc<dyn Member<C>>>,
}

impl<K, C> DataSet<K, C>
where
    K: Ord + Clone + Debug + 'static,
    C: Ord + Clone + Debug + 'static,
{
    /// Creates an empty collection identified by `id`
    pub fn new(id: K) -> Self {
        Self {
            id,
            identity: Rc::new(SetHandle::next()),
            members: BTreeMap::new(),
        }
    }

    /// Identity of this collection, shared with clones neither side has
    /// changed since
    pub fn handle(&self) -> SetHandle {
        *self.identity
    }

    /// Returns true if a direct member is identified by `key`
    pub fn contains(&self, key: &C) -> bool {
        self.members.contains_key(key)
    }

    /// Wraps `value` in a [`DataPoint`] identified by `key` and stores it.
    ///
    /// A `DataSet` passed here is stored as an opaque value: it is not
    /// checked for self-reference, it reports `is_collection() == false`,
    /// and it is only reachable through [`get_as`](DataSet::get_as), not
    /// [`get_collection`](DataSet::get_collection). Use
    /// [`insert_collection`](DataSet::insert_collection) to nest a set.
    ///
    /// # Errors
    ///
    /// Returns `DataError::DuplicateIdentifier` if `key` is already taken.
    /// The collection is left unchanged.
    pub fn insert<T>(&mut self, value: T, key: C) -> Result<(), DataError>
    where
        T: Clone + 'static,
    {
        self.insert_point(DataPoint::new(value, key))
    }

    /// Stores a pre-built [`DataPoint`] under its own identifier.
    ///
    /// # Errors
    ///
    /// Returns `DataError::DuplicateIdentifier` if the identifier is already taken.
    pub fn insert_point<T>(&mut self, point: DataPoint<T, C>) -> Result<(), DataError>
    where
        T: Clone + 'static,
    {
        self.ensure_vacant(point.id())?;
        let key = point.id().clone();
        self.diverge();
        debug!(key = ?key, value_type = point.type_tag().name(), "value added");
        self.members.insert(key, Rc::new(point));
        Ok(())
    }

    /// Nests another collection under its own identifier.
    ///
    /// The collection is moved into shared storage; pass a clone to keep
    /// working with the original. Later changes to the original do not
    /// reach the stored copy.
    ///
    /// # Errors
    ///
    /// - Returns `DataError::SelfReference` if `set` is this collection or an unchanged clone of it
    /// - Returns `DataError::DuplicateIdentifier` if its identifier is already taken
    pub fn insert_collection<S>(&mut self, set: DataSet<C, S>) -> Result<(), DataError>
    where
        S: Ord + Clone + Debug + 'static,
    {
        if set.handle() == self.handle() {
            debug!(key = ?set.id, "rejected self-reference");
            return Err(DataError::SelfReference);
        }
        self.ensure_vacant(&set.id)?;

        let key = set.id.clone();
        self.diverge();
        debug!(key = ?key, members = set.len(), "collection added");
        self.members.insert(key, Rc::new(set));
        Ok(())
    }

    /// Nests a collection with a different identifier type under `key`.
    ///
    /// # Errors
    ///
    /// Same as [`insert_collection`](DataSet::insert_collection).
    pub fn insert_collection_as<J, S>(&mut self, set: DataSet<J, S>, key: C) -> Result<(), DataError>
    where
        J: Ord + Clone + Debug + 'static,
        S: Ord + Clone + Debug + 'static,
    {
        self.insert_collection(set.rekey(key))
    }

    /// Like [`insert`](DataSet::insert), reporting rejection as `false`
    pub fn add<T>(&mut self, value: T, key: C) -> bool
    where
        T: Clone + 'static,
    {
        self.insert(value, key).is_ok()
    }

    /// Like [`insert_point`](DataSet::insert_point), reporting rejection as `false`
    pub fn add_point<T>(&mut self, point: DataPoint<T, C>) -> bool
    where
        T: Clone + 'static,
    {
        self.insert_point(point).is_ok()
    }

    /// Like [`insert_collection`](DataSet::insert_collection), reporting rejection as `false`
    pub fn add_collection<S>(&mut self, set: DataSet<C, S>) -> bool
    where
        S: Ord + Clone + Debug + 'static,
    {
        self.insert_collection(set).is_ok()
    }

    /// Like [`insert_collection_as`](DataSet::insert_collection_as), reporting rejection as `false`
    pub fn add_collection_as<J, S>(&mut self, set: DataSet<J, S>, key: C) -> bool
    where
        J: Ord + Clone + Debug + 'static,
        S: Ord + Clone + Debug + 'static,
    {
        self.insert_collection_as(set, key).is_ok()
    }

    /// Converts into a collection identified by `id`, possibly of another
    /// identifier type. Members and identity are kept, so a rekeyed clone
    /// of a set still counts as that set.
    pub fn rekey<J>(self, id: J) -> DataSet<J, C>
    where
        J: Ord + Clone + Debug + 'static,
    {
        DataSet {
            id,
            identity: self.identity,
            members: self.members,
        }
    }

    /// Number of direct members. A nested collection counts once.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of plain values in this collection and all nested ones
    pub fn total_len(&self) -> usize {
        self.members.values().map(|member| member.leaf_count()).sum()
    }

    /// Identifiers of all direct members, in ascending order
    pub fn ids(&self) -> Vec<C> {
        self.members.keys().cloned().collect()
    }

    /// Borrows the member identified by `key`
    pub fn get(&self, key: &C) -> Option<&dyn Member<C>> {
        self.members.get(key).map(|member| &**member)
    }

    /// Returns a shared handle to the member identified by `key`.
    ///
    /// The member stays alive through this handle even after the
    /// collection is cleared or dropped.
    pub fn get_shared(&self, key: &C) -> Option<Rc<dyn Member<C>>> {
        self.members.get(key).cloned()
    }

    /// Tag of the type stored under `key`
    pub fn type_tag_of(&self, key: &C) -> Option<TypeTag> {
        self.get(key).map(|member| member.type_tag())
    }

    /// Borrows the value under `key` if it is a `T`.
    ///
    /// Returns `None` both for a missing key and for a type mismatch; use
    /// [`get_value`](DataSet::get_value) to tell them apart.
    pub fn get_as<T: 'static>(&self, key: &C) -> Option<&T> {
        try_get_as::<T, dyn Member<C>>(self.get(key))
    }

    /// Borrows the collection nested under `key` with
    /// [`insert_collection`](DataSet::insert_collection)
    pub fn get_collection<S>(&self, key: &C) -> Option<&DataSet<C, S>>
    where
        S: Ord + Clone + Debug + 'static,
    {
        let member = self.get(key).filter(|member| member.is_collection());
        try_get_as::<DataSet<C, S>, dyn Member<C>>(member)
    }

    /// Returns a clone of the value stored under `key`.
    ///
    /// # Errors
    ///
    /// - Returns `DataError::KeyNotFound` if no member has this identifier
    /// - Returns `DataError::TypeMismatch` if the member does not hold a `T`
    pub fn get_value<T>(&self, key: &C) -> Result<T, DataError>
    where
        T: Clone + 'static,
    {
        let member = self
            .get(key)
            .ok_or_else(|| DataError::KeyNotFound(format!("{:?}", key)))?;

        try_get_as::<T, dyn Member<C>>(Some(member))
            .cloned()
            .ok_or_else(|| DataError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                found: member.type_tag().name(),
            })
    }

    /// Returns the value under `key`, or NaN if it is missing or not a `T`.
    ///
    /// Only floating point types can be read this way. Prefer
    /// [`get_value`](DataSet::get_value), which can distinguish a missing
    /// key from a stored NaN.
    pub fn get_value_or_nan<T>(&self, key: &C) -> T
    where
        T: NanSentinel + Clone + 'static,
    {
        self.get_value(key).unwrap_or_else(|_| T::nan())
    }

    /// Iterates over direct members in ascending identifier order
    pub fn iter(&self) -> Iter<'_, C> {
        Iter {
            inner: self.members.iter(),
        }
    }

    /// Removes every member
    pub fn clear(&mut self) {
        let released = self.members.len();
        self.diverge();
        self.members.clear();
        debug!(id = ?self.id, released, "collection cleared");
    }

    fn ensure_vacant(&self, key: &C) -> Result<(), DataError> {
        if self.contains(key) {
            debug!(key = ?key, "rejected duplicate identifier");
            return Err(DataError::DuplicateIdentifier(format!("{:?}", key)));
        }
        Ok(())
    }
}

impl<K, C> DataSet<K, C>
where
    C: Ord + Clone + Debug,
{
    // Called before every change; a set whose identity is shared with a
    // clone or a stored snapshot becomes a new collection.
    fn diverge(&mut self) {
        if Rc::strong_count(&self.identity) > 1 {
            self.identity = Rc::new(SetHandle::next());
        }
    }
}

impl<K, C> Clone for DataSet<K, C>
where
    K: Clone,
    C: Ord + Clone + Debug,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            identity: Rc::clone(&self.identity),
            members: self.members.clone(),
        }
    }
}

impl<K, C> Default for DataSet<K, C>
where
    K: Default + Ord + Clone + Debug + 'static,
    C: Ord + Clone + Debug + 'static,
{
    fn default() -> Self {
        Self::new(K::default())
    }
}

impl<K, C> Identifiable<K> for DataSet<K, C>
where
    K: Ord + Clone + Debug,
    C: Ord + Clone + Debug,
{
    fn id(&self) -> &K {
        &self.id
    }

    fn reassign(&mut self, id: K) {
        self.diverge();
        self.id = id;
    }
}

impl<K, C> TypedValue for DataSet<K, C>
where
    K: 'static,
    C: Ord + Clone + Debug + 'static,
{
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }

    fn erased(&self) -> &dyn Any {
        self
    }

    fn erased_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<K, C> Member<K> for DataSet<K, C>
where
    K: Ord + Clone + Debug + 'static,
    C: Ord + Clone + Debug + 'static,
{
    fn is_collection(&self) -> bool {
        true
    }

    fn leaf_count(&self) -> usize {
        self.total_len()
    }
}

impl<K, C> Debug for DataSet<K, C>
where
    K: Debug,
    C: Ord + Clone + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<_> = self
            .members
            .iter()
            .map(|(key, member)| (key, member.type_tag()))
            .collect();
        f.debug_struct("DataSet")
            .field("id", &self.id)
            .field("handle", &*self.identity)
            .field("members", &members)
            .finish()
    }
}

/// Iterator over the members of a [`DataSet`]
pub struct Iter<'a, C>
where
    C: Ord + Clone + Debug,
{
    inner: btree_map::Iter<'a, C, Rc<dyn Member<C>>>,
}

impl<'a, C> Iterator for Iter<'a, C>
where
    C: Ord + Clone + Debug,
{
    type Item = (&'a C, &'a dyn Member<C>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, member)| (key, &**member))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, C> IntoIterator for &'a DataSet<K, C>
where
    K: Ord + Clone + Debug + 'static,
    C: Ord + Clone + Debug + 'static,
{
    type Item = (&'a C, &'a dyn Member<C>);
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Types with a "not a number" value, readable through
/// [`DataSet::get_value_or_nan`]
pub trait NanSentinel {
    fn nan() -> Self;
}

impl NanSentinel for f32 {
    fn nan() -> Self {
        f32::NAN
    }
}

impl NanSentinel for f64 {
    fn nan() -> Self {
        f64::NAN
    }
}
