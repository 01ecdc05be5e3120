pub(crate) mod container;
pub(crate) mod definition;
pub(crate) mod errors;
pub(crate) mod introspect;
pub(crate) mod object;
pub(crate) mod registry;
pub(crate) mod resolver;

pub use container::ServiceContainer;
pub use definition::{FactoryFn, Lifecycle, ServiceDefinition, Target};
pub use errors::{InstantiateErrorKind, ProvideErrorKind, RegistryErrorKind};
pub use introspect::{Argument, Introspect, ParamSpec, ParamType, PrimitiveKind, TypeCatalog, TypeSpec, Value};
pub use object::{InstanceId, Resettable, ServiceObject};
pub use registry::Registry;
pub use resolver::{ProvideContext, Resolver};
