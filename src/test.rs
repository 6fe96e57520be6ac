//! Shared test utilities. Only compiled for tests.

use crate::Config;
use tempfile::TempDir;

/// A famibank home in a temporary directory with a config file and an initialized database. The
/// Core URL points at nothing; tests use `Mode::Testing`.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("famibank");
        let config = Config::create(&root, "http://localhost:8081")
            .await
            .unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    pub fn config(&self) -> Config {
        self.config.clone()
    }
}
