#[derive(thiserror::Error, Debug)]
pub enum RegistryErrorKind {
    #[error("Service {0} already in registry")]
    DuplicateService(String),
    #[error("Cannot add abstract type without concrete type: {0}")]
    MissingConcreteType(String),
}
