//! Top-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::mint::MintError;
use crate::template::CatalogError;

/// Errors that can occur anywhere between loading a catalog and minting
#[derive(Debug, Error)]
pub enum MemeError {
    /// Catalog could not be loaded or resolved against
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration is unreadable or inconsistent
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Mint request or submission failed
    #[error("mint error: {0}")]
    Mint(#[from] MintError),
}
