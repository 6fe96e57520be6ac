use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and:
/// - Creates an initial `config.json` file using `core_url` along with default settings
/// - Creates the report database
///
/// # Arguments
/// - `famibank_home` - The directory that will be the root of data directory, e.g. `$HOME/famibank`
/// - `core_url` - The base URL of the Core banking service.
///
/// # Errors
/// - Returns an error if the directory is already initialized or any file operation fails.
pub async fn init(famibank_home: &Path, core_url: &str) -> Result<Out<()>> {
    let config = Config::create(famibank_home, core_url)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the famibank directory at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("famibank");
        let out = init(&home, "http://localhost:8081").await.unwrap();
        assert!(out.message().contains("Successfully created"));
        assert!(Config::load(&home).await.is_ok());

        let err = init(&home, "http://localhost:8081").await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
    }
}
