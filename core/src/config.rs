// core/src/config.rs

use crate::error::ConfigError;
use dotenvy::dotenv;
use std::env;

/// Deployment-specific endpoints for the two remote services.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
  /// Base URL of the document store, e.g. `https://myapp.firebaseio.com`.
  pub store_url: String,
  /// Full upload endpoint of the image host.
  pub upload_url: String,
  /// Fixed upload-preset parameter sent with every image.
  pub upload_preset: String,
}

impl CatalogConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var: &str| {
      env::var(var).map_err(|_| ConfigError::MissingVar {
        var: var.to_string(),
      })
    };

    let store_url = get_env("SOKONI_STORE_URL")?;
    let upload_url = get_env("SOKONI_UPLOAD_URL")?;
    let upload_preset = get_env("SOKONI_UPLOAD_PRESET")?;

    tracing::info!("Catalog configuration loaded.");
    Ok(Self {
      store_url,
      upload_url,
      upload_preset,
    })
  }
}
