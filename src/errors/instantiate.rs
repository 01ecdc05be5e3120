#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Constructor argument {index} for type {type_name} has an unexpected kind")]
    ArgumentMismatch { type_name: String, index: usize },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
