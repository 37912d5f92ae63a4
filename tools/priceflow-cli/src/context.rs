//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use priceflow_auth::{FileStore, Session};
use priceflow_commerce::storefront::Storefront;
use priceflow_data::{ApiClient, HttpStorefront};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Request pipeline bound to the stored session.
    pub client: ApiClient,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
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

        let state_path = config.state_path();
        tracing::debug!(path = %state_path.display(), "session state");
        let session = Session::new(FileStore::open(state_path));
        let client = ApiClient::new(config.api_config()?, session)
            .context("Failed to create HTTP client")?;
        tracing::debug!(
            base_url = client.config().base_url(),
            config = ?config_path,
            "backend configured"
        );

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            client,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
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

    /// The stored session.
    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// A storefront over the backend.
    pub fn storefront(&self) -> Storefront<HttpStorefront> {
        Storefront::new(HttpStorefront::new(self.client.clone()))
    }

    /// Load products and discounts, with a spinner.
    pub async fn loaded_storefront(&self) -> Result<Storefront<HttpStorefront>> {
        let storefront = self.storefront();
        let spinner = self.output.spinner("Loading storefront...");
        let result = storefront.refresh().await;
        spinner.finish_and_clear();
        result.context("Failed to load storefront")?;
        Ok(storefront)
    }
}
