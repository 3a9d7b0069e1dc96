use thiserror::Error;
use xmodel_path::PathError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error(transparent)]
    InvalidPath(#[from] PathError),
    #[error("Child keys must be strings.")]
    InvalidKey,
    #[error("invalid child: {0}")]
    InvalidChild(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Subscriptions are not allowed on children.")]
    NotRoot,
    #[error("not supported: {0}")]
    NotSupported(&'static str),
}
