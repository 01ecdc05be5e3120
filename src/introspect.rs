use core::{any::Any, fmt};
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    errors::InstantiateErrorKind,
    object::{Resettable, ServiceObject},
};

/// Built-in (non service-like) parameter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Bool,
    Int,
    Float,
    Str,
}

/// A constructor parameter's declared type.
#[derive(Debug, Clone)]
pub enum ParamType {
    Untyped,
    Primitive(PrimitiveKind),
    Named(String),
    Union(Vec<ParamType>),
}

impl ParamType {
    /// First non-primitive member, in declaration order.
    ///
    /// This tie-break for unions is deliberate and must stay deterministic.
    #[must_use]
    pub(crate) fn first_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Union(members) => members.iter().find_map(Self::first_named),
            Self::Untyped | Self::Primitive(_) => None,
        }
    }
}

/// A plain default or injected value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A resolved constructor argument, passed in declaration order.
#[derive(Debug, Clone)]
pub enum Argument {
    Service(ServiceObject),
    Value(Value),
}

impl Argument {
    #[must_use]
    pub fn service<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Self::Service(object) => object.downcast(),
            Self::Value(_) => None,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Service(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    /// # Errors
    /// Returns [`InstantiateErrorKind::ArgumentMismatch`] if the argument at
    /// `index` is not a service instance of type `T`.
    pub fn expect_service<T: Any + Send + Sync>(&self, type_name: &str, index: usize) -> Result<Arc<T>, InstantiateErrorKind> {
        self.service().ok_or_else(|| InstantiateErrorKind::ArgumentMismatch {
            type_name: type_name.to_owned(),
            index,
        })
    }

    /// # Errors
    /// Returns [`InstantiateErrorKind::ArgumentMismatch`] if the argument at
    /// `index` is a service instance instead of a plain value.
    pub fn expect_value(&self, type_name: &str, index: usize) -> Result<&Value, InstantiateErrorKind> {
        self.value().ok_or_else(|| InstantiateErrorKind::ArgumentMismatch {
            type_name: type_name.to_owned(),
            index,
        })
    }
}

/// One constructor parameter: declared type, optional default, nullability.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub(crate) name: String,
    pub(crate) ty: ParamType,
    pub(crate) default: Option<Value>,
    pub(crate) nullable: bool,
}

impl ParamSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            nullable: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

pub(crate) type ConstructFn = Arc<dyn Fn(&[Argument]) -> Result<ServiceObject, InstantiateErrorKind> + Send + Sync>;

/// Constructor metadata for one type name.
///
/// A spec without a construct function describes an abstract or
/// interface-like name: known to the introspector, never instantiable.
#[derive(Clone)]
pub struct TypeSpec {
    pub(crate) name: String,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) construct: Option<ConstructFn>,
}

impl TypeSpec {
    /// An abstract or interface-like name.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            construct: None,
        }
    }

    /// A constructible type. `build` receives the resolved arguments in the
    /// order of `params`; an empty `params` list constructs with no
    /// arguments.
    #[must_use]
    pub fn concrete<T, F>(name: impl Into<String>, params: Vec<ParamSpec>, build: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&[Argument]) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params,
            construct: Some(Arc::new(move |args| Ok(ServiceObject::new(build(args)?)))),
        }
    }

    /// Like [`Self::concrete`], but captures the reset capability of `T` in
    /// every constructed object.
    #[must_use]
    pub fn concrete_resettable<T, F>(name: impl Into<String>, params: Vec<ParamSpec>, build: F) -> Self
    where
        T: Resettable + Any + Send + Sync,
        F: Fn(&[Argument]) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params,
            construct: Some(Arc::new(move |args| Ok(ServiceObject::resettable(build(args)?)))),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn is_constructible(&self) -> bool {
        self.construct.is_some()
    }

    #[inline]
    #[must_use]
    pub(crate) fn construct_fn(&self) -> Option<&ConstructFn> {
        self.construct.as_ref()
    }
}

impl fmt::Debug for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSpec")
            .field("name", &self.name)
            .field("constructible", &self.is_constructible())
            .field("params", &self.params)
            .finish()
    }
}

/// Source of constructor metadata the resolver consumes.
///
/// How the metadata is produced is irrelevant to resolution; [`TypeCatalog`]
/// is the in-crate implementation based on explicit registration.
pub trait Introspect: Send + Sync {
    #[must_use]
    fn describe(&self, type_name: &str) -> Option<TypeSpec>;
}

#[derive(Default, Clone)]
pub struct TypeCatalog {
    types: BTreeMap<String, TypeSpec>,
}

impl TypeCatalog {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { types: BTreeMap::new() }
    }

    /// Registers a spec under its own name, replacing any previous one.
    pub fn register(&mut self, spec: TypeSpec) -> Option<TypeSpec> {
        self.types.insert(spec.name.clone(), spec)
    }

    #[must_use]
    pub fn with(mut self, spec: TypeSpec) -> Self {
        self.register(spec);
        self
    }
}

impl Introspect for TypeCatalog {
    fn describe(&self, type_name: &str) -> Option<TypeSpec> {
        self.types.get(type_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::{Argument, Introspect as _, ParamSpec, ParamType, PrimitiveKind, TypeCatalog, TypeSpec, Value};

    #[test]
    fn test_union_prefers_first_non_primitive() {
        let ty = ParamType::Union(vec![
            ParamType::Primitive(PrimitiveKind::Int),
            ParamType::Named("Logger".into()),
            ParamType::Named("Writer".into()),
        ]);

        assert_eq!(ty.first_named(), Some("Logger"));
        assert_eq!(ParamType::Primitive(PrimitiveKind::Str).first_named(), None);
        assert_eq!(ParamType::Untyped.first_named(), None);
    }

    #[test]
    fn test_catalog_describe() {
        struct Unit;

        let catalog = TypeCatalog::new()
            .with(TypeSpec::interface("LoggerInterface"))
            .with(TypeSpec::concrete::<Unit, _>("Unit", vec![], |_| Ok(Unit)));

        assert!(!catalog.describe("LoggerInterface").unwrap().is_constructible());
        assert!(catalog.describe("Unit").unwrap().is_constructible());
        assert!(catalog.describe("Missing").is_none());
    }

    #[test]
    fn test_argument_accessors() {
        let argument = Argument::Value(Value::Int(7));

        assert!(argument.service::<u8>().is_none());
        assert_eq!(argument.value(), Some(&Value::Int(7)));
        assert!(!argument.is_null());
        assert!(argument.expect_service::<u8>("Unit", 0).is_err());

        let spec = ParamSpec::new("id", ParamType::Primitive(PrimitiveKind::Int)).with_default(Value::Int(1));
        assert_eq!(spec.name(), "id");
        assert_eq!(spec.default, Some(Value::Int(1)));
    }
}
