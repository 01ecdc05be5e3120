use parking_lot::Mutex;
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, warn};

use crate::{
    definition::{Lifecycle, ServiceDefinition, Target},
    errors::RegistryErrorKind,
    introspect::Introspect,
    object::{InstanceId, Resettable, ServiceObject},
};

struct DefinitionEntry {
    target: Target,
    lifecycle: Lifecycle,
    instance: Option<ServiceObject>,
}

#[derive(Default)]
struct RegistryInner {
    definitions: BTreeMap<String, DefinitionEntry>,
    aliases: BTreeMap<String, String>,
    resettable: BTreeMap<InstanceId, Arc<dyn Resettable + Send + Sync>>,
}

impl RegistryInner {
    fn exists(&self, identifier: &str) -> bool {
        self.definitions.contains_key(identifier) || self.aliases.contains_key(identifier)
    }

    /// Alias resolution precedes direct lookup.
    fn canonical(&self, identifier: &str) -> String {
        self.aliases.get(identifier).cloned().unwrap_or_else(|| identifier.to_owned())
    }
}

/// Process-wide service registry: definitions, the alias table and cached
/// instances.
///
/// Mutation is guarded by a single lock so one registry can be shared across
/// the requests of a persistent worker; the reset-after-request protocol
/// still assumes one logical worker per reset cycle.
pub struct Registry {
    introspector: Arc<dyn Introspect>,
    inner: Mutex<RegistryInner>,
}

impl Registry {
    #[must_use]
    pub fn new(introspector: Arc<dyn Introspect>) -> Self {
        Self {
            introspector,
            inner: Mutex::new(RegistryInner::default()),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn introspector(&self) -> &Arc<dyn Introspect> {
        &self.introspector
    }

    /// Registers a definition under `abstraction`.
    ///
    /// With `concrete` omitted the abstraction must itself name a
    /// constructible target. A concrete type name differing from the
    /// abstraction is recorded as an alias for it.
    ///
    /// # Errors
    /// - [`RegistryErrorKind::DuplicateService`] if `abstraction`, or the
    ///   concrete name that would become its alias, is already registered
    ///   (directly or as an alias).
    /// - [`RegistryErrorKind::MissingConcreteType`] if `concrete` is omitted
    ///   and the introspector knows `abstraction` as non-constructible.
    pub fn add(&self, abstraction: &str, concrete: Option<Target>, lifecycle: Lifecycle) -> Result<(), RegistryErrorKind> {
        let mut inner = self.inner.lock();

        if inner.exists(abstraction) {
            let err = RegistryErrorKind::DuplicateService(abstraction.to_owned());
            warn!("{}", err);
            return Err(err);
        }

        let target = match concrete {
            Some(target) => target,
            None => {
                if self.introspector.describe(abstraction).is_some_and(|spec| !spec.is_constructible()) {
                    let err = RegistryErrorKind::MissingConcreteType(abstraction.to_owned());
                    warn!("{}", err);
                    return Err(err);
                }
                Target::of(abstraction)
            }
        };

        if let Some(concrete_name) = target.type_name() {
            if concrete_name != abstraction {
                if inner.exists(concrete_name) {
                    let err = RegistryErrorKind::DuplicateService(concrete_name.to_owned());
                    warn!("{}", err);
                    return Err(err);
                }
                inner.aliases.insert(concrete_name.to_owned(), abstraction.to_owned());
            }
        }

        inner.definitions.insert(
            abstraction.to_owned(),
            DefinitionEntry {
                target,
                lifecycle,
                instance: None,
            },
        );
        debug!(service = abstraction, "Registered");

        Ok(())
    }

    /// True if `identifier` is a registered abstraction or a known alias.
    #[must_use]
    pub fn exists(&self, identifier: &str) -> bool {
        self.inner.lock().exists(identifier)
    }

    /// Snapshot of the definition for `identifier`, resolved through the
    /// alias table. A lookup miss is an empty result, not an error.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<ServiceDefinition> {
        let inner = self.inner.lock();
        let key = inner.canonical(identifier);
        let entry = inner.definitions.get(&key)?;

        Some(ServiceDefinition {
            abstraction: key.clone(),
            target: entry.target.clone(),
            lifecycle: entry.lifecycle,
            instance: entry.instance.clone(),
        })
    }

    /// Deletes the definition `identifier` resolves to, evicting its cached
    /// instance from the resettable set and purging every alias pointing at
    /// it. Returns whether a definition was removed.
    pub fn remove(&self, identifier: &str) -> bool {
        let mut inner = self.inner.lock();
        let key = inner.canonical(identifier);

        let Some(entry) = inner.definitions.remove(&key) else {
            return false;
        };
        if let Some(instance) = &entry.instance {
            inner.resettable.remove(&instance.instance_id());
        }
        inner.aliases.retain(|_, canonical| *canonical != key);
        debug!(service = %key, "Removed");

        true
    }

    /// Replaces the cached instance of the definition `identifier` resolves
    /// to, swapping resettable-set membership from the previous instance to
    /// the new one. Returns the previous instance; a lookup miss is a logged
    /// no-op.
    pub fn set_object(&self, identifier: &str, instance: ServiceObject) -> Option<ServiceObject> {
        let mut inner = self.inner.lock();
        let key = inner.canonical(identifier);

        let previous = match inner.definitions.get_mut(&key) {
            Some(entry) => entry.instance.replace(instance.clone()),
            None => {
                warn!(service = identifier, "Set object for unregistered service ignored");
                return None;
            }
        };

        if let Some(previous) = &previous {
            inner.resettable.remove(&previous.instance_id());
        }
        if let Some(handle) = instance.reset_handle() {
            inner.resettable.insert(instance.instance_id(), handle.clone());
        }
        debug!(service = %key, "Cached instance replaced");

        previous
    }

    /// Invokes `reset()` on every tracked cached instance, in unspecified
    /// order. Handles are cloned out of the lock first so user code never
    /// runs under it.
    pub fn reset_all(&self) {
        let handles: Vec<Arc<dyn Resettable + Send + Sync>> = self.inner.lock().resettable.values().cloned().collect();
        debug!(count = handles.len(), "Resetting cached instances");

        for handle in handles {
            handle.reset();
        }
    }

    /// Number of distinct registered definitions. Aliases do not count.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.lock().definitions.len()
    }

    /// Number of cached instances currently tracked for [`Self::reset_all`].
    #[must_use]
    pub fn resettable_count(&self) -> usize {
        self.inner.lock().resettable.len()
    }
}
