//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use saree_auth::AuthService;
use saree_commerce::{Latency, Timer};
use saree_store::{FileStorage, SharedStore};

use crate::config::CliConfig;
use crate::output::Output;

/// Sleeps on the tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Where the config was found, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Store backed by the configured JSON file.
    pub store: SharedStore,
    pub timer: TokioTimer,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };
        let config = match env {
            Some(env) => config.for_environment(env),
            None => config,
        };

        let store_path = resolve_path(&cwd, &config.store.path);
        let storage = FileStorage::open(&store_path)
            .with_context(|| format!("Failed to open store: {}", store_path.display()))?;

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            store: SharedStore::new(storage),
            timer: TokioTimer,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let config_names = ["saree.toml", ".saree.toml", "saree.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// In-memory store, no delays and quiet output.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            config: CliConfig {
                latency: Latency::instant(),
                ..CliConfig::default()
            },
            output: Output::new(true),
            cwd: PathBuf::from("."),
            config_path: None,
            store: SharedStore::in_memory(),
            timer: TokioTimer,
        }
    }

    pub fn latency(&self) -> &Latency {
        &self.config.latency
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.store.clone(), self.config.latency.clone())
    }
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("saree.toml"), "[store]\npath = \"s.json\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.store.path, "s.json");
        assert_eq!(path, dir.path().join("saree.toml"));
    }

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(cwd, "/tmp/s.json"), PathBuf::from("/tmp/s.json"));
        assert_eq!(resolve_path(cwd, ".saree/store.json"), cwd.join(".saree/store.json"));
    }
}
