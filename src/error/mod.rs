use crate::config::ConfigError;
use thiserror::Error;

pub type MdaResult<T> = std::result::Result<T, MdaError>;

#[derive(Debug, Error)]
pub enum MdaError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("image target not found: {0}")]
    TargetNotFound(String),
    #[error("failed to parse replay script")]
    Script(#[source] serde_json::Error),
}
