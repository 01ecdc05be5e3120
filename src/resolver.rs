use std::sync::Arc;
use tracing::{debug, debug_span, error, warn};

use crate::{
    definition::{Lifecycle, ServiceDefinition, Target},
    errors::ProvideErrorKind,
    introspect::{Argument, ParamSpec, ParamType, Value},
    object::ServiceObject,
    registry::Registry,
};

/// Resolution engine: turns a registered identifier into a fully wired
/// instance, recursively constructing its dependency graph.
#[derive(Clone)]
pub struct Resolver {
    registry: Arc<Registry>,
}

impl Resolver {
    #[inline]
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Resolves `identifier` (an abstraction or one of its aliases) into an
    /// instance, honoring the definition's lifecycle.
    ///
    /// # Errors
    /// Any [`ProvideErrorKind`]; resolution either fully builds the
    /// dependency graph or fails without caching anything.
    pub fn get_service(&self, identifier: &str) -> Result<ServiceObject, ProvideErrorKind> {
        let mut context = ProvideContext {
            registry: &self.registry,
            path: Vec::new(),
        };
        context.get_service(identifier)
    }
}

/// State of one top-level resolution: the registry handle and the chain of
/// definitions currently being constructed. Factories receive the context so
/// their own lookups extend the same chain.
pub struct ProvideContext<'a> {
    registry: &'a Registry,
    path: Vec<String>,
}

impl ProvideContext<'_> {
    /// Recursive entry point, also callable from factories.
    ///
    /// # Errors
    /// See [`Resolver::get_service`].
    pub fn get_service(&mut self, identifier: &str) -> Result<ServiceObject, ProvideErrorKind> {
        let span = debug_span!("provide", service = identifier);
        let _guard = span.enter();

        let Some(definition) = self.registry.get(identifier) else {
            let err = ProvideErrorKind::ServiceNotRegistered(identifier.to_owned());
            warn!("{}", err);
            return Err(err);
        };

        self.init_service(&definition)
    }

    fn init_service(&mut self, definition: &ServiceDefinition) -> Result<ServiceObject, ProvideErrorKind> {
        if definition.lifecycle() == Lifecycle::Scoped {
            if let Some(instance) = definition.instance() {
                debug!("Found cached");
                return Ok(instance.clone());
            }
        }

        let key = definition.abstraction();
        if self.path.iter().any(|entry| entry == key) {
            let mut path = self.path.clone();
            path.push(key.to_owned());
            let err = ProvideErrorKind::CyclicDependency { path };
            error!("{}", err);
            return Err(err);
        }

        self.path.push(key.to_owned());
        let result = self.construct(definition);
        self.path.pop();
        let instance = result?;

        // Write-back on the canonical key, so the instance is found again
        // through any alias. Only reached after successful construction.
        if definition.lifecycle() == Lifecycle::Scoped {
            self.registry.set_object(definition.abstraction(), instance.clone());
            debug!("Cached");
        }

        Ok(instance)
    }

    fn construct(&mut self, definition: &ServiceDefinition) -> Result<ServiceObject, ProvideErrorKind> {
        let type_name = match definition.target() {
            Target::Factory(factory) => {
                debug!("Delegating to factory");
                return factory.as_ref()(self);
            }
            Target::Type(name) => name.clone(),
        };

        let Some(spec) = self.registry.introspector().describe(&type_name) else {
            let err = ProvideErrorKind::UnknownType(type_name);
            error!("{}", err);
            return Err(err);
        };

        let Some(construct) = spec.construct_fn() else {
            // Registering an abstraction as its own target is the common
            // misconfiguration and gets its own message.
            let err = if type_name == definition.abstraction() {
                ProvideErrorKind::NoImplementation(type_name)
            } else {
                ProvideErrorKind::NotInstantiable(type_name)
            };
            error!("{}", err);
            return Err(err);
        };

        let mut args = Vec::with_capacity(spec.params.len());
        for param in &spec.params {
            args.push(self.resolve_param(param, &type_name)?);
        }

        match construct.as_ref()(&args) {
            Ok(instance) => {
                debug!("Constructed");
                Ok(instance)
            }
            Err(err) => {
                error!("{}", err);
                Err(err.into())
            }
        }
    }

    fn resolve_param(&mut self, param: &ParamSpec, type_name: &str) -> Result<Argument, ProvideErrorKind> {
        if let Some(dependency) = param.ty.first_named() {
            if self.registry.exists(dependency) {
                let dependency = dependency.to_owned();
                return Ok(Argument::Service(self.get_service(&dependency)?));
            }
            if let Some(default) = &param.default {
                debug!(parameter = param.name.as_str(), "Using default for unregistered dependency");
                return Ok(Argument::Value(default.clone()));
            }
            // Unregistered and no fallback: resolve anyway so the lookup
            // miss surfaces as the error.
            let dependency = dependency.to_owned();
            return Ok(Argument::Service(self.get_service(&dependency)?));
        }

        if let Some(default) = &param.default {
            return Ok(Argument::Value(default.clone()));
        }
        if param.nullable || matches!(param.ty, ParamType::Untyped) {
            return Ok(Argument::Value(Value::Null));
        }

        let err = ProvideErrorKind::UnresolvableParameter {
            parameter: param.name.clone(),
            type_name: type_name.to_owned(),
        };
        error!("{}", err);
        Err(err)
    }
}
