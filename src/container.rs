use std::sync::Arc;

use crate::{
    definition::{Lifecycle, Target},
    errors::RegistryErrorKind,
    object::ServiceObject,
    registry::Registry,
};

/// Thin registration façade over [`Registry`]: picks the lifecycle constant,
/// nothing else.
#[derive(Clone)]
pub struct ServiceContainer {
    registry: Arc<Registry>,
}

impl ServiceContainer {
    #[inline]
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Registers a service constructed at most once and reused.
    ///
    /// # Errors
    /// See [`Registry::add`].
    pub fn add_scoped(&self, abstraction: &str, concrete: Option<Target>) -> Result<(), RegistryErrorKind> {
        self.registry.add(abstraction, concrete, Lifecycle::Scoped)
    }

    /// Registers a service constructed fresh on every resolution.
    ///
    /// # Errors
    /// See [`Registry::add`].
    pub fn add_ephemeral(&self, abstraction: &str, concrete: Option<Target>) -> Result<(), RegistryErrorKind> {
        self.registry.add(abstraction, concrete, Lifecycle::Ephemeral)
    }

    pub fn set_object(&self, identifier: &str, instance: ServiceObject) -> Option<ServiceObject> {
        self.registry.set_object(identifier, instance)
    }

    pub fn reset_all(&self) {
        self.registry.reset_all();
    }
}
