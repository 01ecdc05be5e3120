use super::InstantiateErrorKind;

/// The one error kind callers catch for "this service could not be
/// produced"; variants distinguish the specific cause.
#[derive(thiserror::Error, Debug)]
pub enum ProvideErrorKind {
    #[error("Service {0} not found in registry")]
    ServiceNotRegistered(String),
    #[error("Service {0} was registered without a concrete implementation and is not instantiable itself")]
    NoImplementation(String),
    #[error("Type {0} cannot be instantiated")]
    NotInstantiable(String),
    #[error("Type {0} is unknown to the introspector")]
    UnknownType(String),
    #[error("Parameter \"{parameter}\" of type {type_name} cannot be resolved")]
    UnresolvableParameter { parameter: String, type_name: String },
    #[error("Cyclic dependency: {}", path.join(" -> "))]
    CyclicDependency { path: Vec<String> },
    #[error(transparent)]
    Instantiate(#[from] InstantiateErrorKind),
}
