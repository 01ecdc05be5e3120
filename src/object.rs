use core::{any::Any, fmt};
use std::sync::Arc;

/// Capability of a cached instance to clear its mutable state between
/// logical request cycles without being reconstructed.
pub trait Resettable: Send + Sync {
    fn reset(&self);
}

/// Stable identity token of a shared instance, derived from its allocation
/// address. Only meaningful while the instance is alive and cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(usize);

/// A type-erased shared service instance.
///
/// The reset capability is captured once, when the object is created, and
/// travels with every clone of the handle. Cloning is cheap.
#[derive(Clone)]
pub struct ServiceObject {
    object: Arc<dyn Any + Send + Sync>,
    resettable: Option<Arc<dyn Resettable + Send + Sync>>,
}

impl ServiceObject {
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            object: Arc::new(value),
            resettable: None,
        }
    }

    /// Wraps a value that supports [`Resettable`], keeping a second handle to
    /// the same allocation for [`crate::Registry::reset_all`].
    #[must_use]
    pub fn resettable<T: Resettable + Any + Send + Sync>(value: T) -> Self {
        let value = Arc::new(value);
        Self {
            resettable: Some(value.clone() as Arc<dyn Resettable + Send + Sync>),
            object: value,
        }
    }

    #[inline]
    #[must_use]
    pub fn instance_id(&self) -> InstanceId {
        InstanceId(Arc::as_ptr(&self.object) as *const () as usize)
    }

    #[must_use]
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.object.clone().downcast::<T>().ok()
    }

    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.object.is::<T>()
    }

    /// Identity equality: both handles point at the same allocation.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }

    #[inline]
    #[must_use]
    pub(crate) fn reset_handle(&self) -> Option<&Arc<dyn Resettable + Send + Sync>> {
        self.resettable.as_ref()
    }
}

impl fmt::Debug for ServiceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceObject")
            .field("instance_id", &self.instance_id())
            .field("resettable", &self.resettable.is_some())
            .finish()
    }
}
