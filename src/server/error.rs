use crate::middleware::MiddlewareError;
use crate::settings::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config Error: {0}")]
    ConfigError(#[from] SettingsError),

    #[error("Middleware Error: {0}")]
    MiddlewareError(#[from] MiddlewareError),

    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Connection Error: {0}")]
    ConnectionError(#[from] hyper::Error),
}
