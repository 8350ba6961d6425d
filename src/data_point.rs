use crate::identifiable::Identifiable;
use crate::member::Member;
use crate::typed_value::{TypeTag, TypedValue};
use std::any::Any;
use std::fmt::{self, Debug};
use std::ops::Deref;

/// A single value paired with an identifier.
///
/// The value is fixed at construction; only the identifier can be
/// reassigned afterwards. A `DataPoint` also works as a plain `&T` through
/// `Deref`.
///
/// # Examples
///
/// ```
/// use dataset::{DataPoint, Identifiable};
///
/// let mut point = DataPoint::new(vec![1, 2, 3], "numbers".to_string());
/// assert_eq!(point.get(), &vec![1, 2, 3]);
/// assert_eq!(point.len(), 3);
///
/// point.reassign("digits".to_string());
/// assert_eq!(point.id(), "digits");
/// ```
#[derive(Clone, PartialEq)]
pub struct DataPoint<T, K = String> {
    id: K,
    value: T,
}

impl<T, K> DataPoint<T, K>
where
    T: Clone + 'static,
    K: Ord + Clone + Debug + 'static,
{
    /// Wraps `value` under the identifier `id`
    pub fn new(value: T, id: K) -> Self {
        Self { id, value }
    }

    /// Borrows the stored value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Returns an owned duplicate of the stored value
    pub fn copy(&self) -> T {
        self.value.clone()
    }

    /// Unwraps the stored value, dropping the identifier
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, K> Deref for DataPoint<T, K> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T, K> AsRef<T> for DataPoint<T, K> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T, K> Identifiable<K> for DataPoint<T, K>
where
    K: Ord + Clone + Debug,
{
    fn id(&self) -> &K {
        &self.id
    }

    fn reassign(&mut self, id: K) {
        self.id = id;
    }
}

impl<T, K> TypedValue for DataPoint<T, K>
where
    T: 'static,
{
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }

    fn erased(&self) -> &dyn Any {
        &self.value
    }

    fn erased_mut(&mut self) -> &mut dyn Any {
        &mut self.value
    }
}

impl<T, K> Member<K> for DataPoint<T, K>
where
    T: 'static,
    K: Ord + Clone + Debug,
{
}

impl<T: Debug, K: Debug> Debug for DataPoint<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataPoint")
            .field("id", &self.id)
            .field("value", &self.value)
            .finish()
    }
}
