use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A run-time token identifying a concrete stored type.
///
/// Tags are only ever compared for equality. The type name is carried along
/// for diagnostics and does not take part in comparisons.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Returns the tag for `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Check if this tag identifies type `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// The compiler-provided name of the tagged type
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

/// Type-erased access to a stored value.
///
/// Every member of a `DataSet` implements this, which is what lets a single
/// collection hold values of unrelated types. Getting a concrete type back
/// goes through [`try_get_as`], which checks the tag before downcasting.
pub trait TypedValue {
    /// Tag of the concrete type behind [`erased`](TypedValue::erased)
    fn type_tag(&self) -> TypeTag;

    /// Read-only untyped access to the storage
    fn erased(&self) -> &dyn Any;

    /// Mutable untyped access to the storage
    fn erased_mut(&mut self) -> &mut dyn Any;
}

/// Recover a typed reference from erased storage.
///
/// Returns `Some` only if a wrapper is present and its tag matches `T`.
/// Never panics and never converts between types.
///
/// # Examples
///
/// ```
/// use dataset::{try_get_as, DataPoint};
///
/// let point = DataPoint::new(42i32, "answer".to_string());
///
/// assert_eq!(try_get_as::<i32, _>(Some(&point)), Some(&42));
/// assert_eq!(try_get_as::<String, _>(Some(&point)), None);
/// assert_eq!(try_get_as::<i32, DataPoint<i32>>(None), None);
/// ```
pub fn try_get_as<T, W>(wrapper: Option<&W>) -> Option<&T>
where
    T: 'static,
    W: TypedValue + ?Sized,
{
    let wrapper = wrapper?;
    if !wrapper.type_tag().is::<T>() {
        return None;
    }
    wrapper.erased().downcast_ref::<T>()
}

/// Mutable counterpart of [`try_get_as`]
pub fn try_get_as_mut<T, W>(wrapper: Option<&mut W>) -> Option<&mut T>
where
    T: 'static,
    W: TypedValue + ?Sized,
{
    let wrapper = wrapper?;
    if !wrapper.type_tag().is::<T>() {
        return None;
    }
    wrapper.erased_mut().downcast_mut::<T>()
}
