use core::fmt;
use std::sync::Arc;

use crate::{errors::ProvideErrorKind, object::ServiceObject, resolver::ProvideContext};

/// Lifecycle policy of a registered service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed at most once, cached in the registry and reused.
    Scoped,
    /// Constructed fresh on every resolution, never cached.
    Ephemeral,
}

pub type FactoryFn = Arc<dyn Fn(&mut ProvideContext<'_>) -> Result<ServiceObject, ProvideErrorKind> + Send + Sync>;

/// The concrete side of a registration.
#[derive(Clone)]
pub enum Target {
    /// A constructible type name, resolved through the introspector.
    Type(String),
    /// An opaque factory. It receives the resolution context so its own
    /// lookups extend the in-progress dependency chain.
    Factory(FactoryFn),
}

impl Target {
    #[inline]
    #[must_use]
    pub fn of(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }

    #[must_use]
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&mut ProvideContext<'_>) -> Result<ServiceObject, ProvideErrorKind> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(factory))
    }

    #[inline]
    #[must_use]
    pub(crate) fn type_name(&self) -> Option<&str> {
        match self {
            Self::Type(name) => Some(name),
            Self::Factory(_) => None,
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => f.debug_tuple("Type").field(name).finish(),
            Self::Factory(_) => f.write_str("Factory"),
        }
    }
}

/// Snapshot of one registered service, as returned by
/// [`crate::Registry::get`].
#[derive(Debug, Clone)]
pub struct ServiceDefinition {
    pub(crate) abstraction: String,
    pub(crate) target: Target,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) instance: Option<ServiceObject>,
}

impl ServiceDefinition {
    /// Canonical identifier, with any alias already resolved.
    #[inline]
    #[must_use]
    pub fn abstraction(&self) -> &str {
        &self.abstraction
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    #[inline]
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[inline]
    #[must_use]
    pub fn instance(&self) -> Option<&ServiceObject> {
        self.instance.as_ref()
    }
}
