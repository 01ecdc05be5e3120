mod instantiate;
mod provide;
mod registry;

pub use instantiate::InstantiateErrorKind;
pub use provide::ProvideErrorKind;
pub use registry::RegistryErrorKind;
