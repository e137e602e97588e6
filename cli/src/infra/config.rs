//! Infrastructure implementation of the `ConfigStore` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::SlipwayConfig;

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
///
/// Resolution order: `SLIPWAY_CONFIG` env var, then `slipway.yaml` in the
/// working directory, then `~/.slipway/config.yaml`. A `SLIPWAY_PASSWORD`
/// env var overrides the stored password so the file can be committed
/// without credentials.
pub struct YamlConfigStore;

impl YamlConfigStore {
    /// Write raw settings text to `path`, creating parent directories.
    /// Used by `slipway config init` so the sample file's comments survive
    /// instead of being lost to a parse/serialize round trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        // The file holds the account password.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        Ok(())
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<SlipwayConfig> {
        let path = self.path()?;
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?
        } else {
            SlipwayConfig::default()
        };
        if let Ok(password) = std::env::var("SLIPWAY_PASSWORD") {
            config.password = password;
        }
        Ok(config)
    }

    fn save(&self, config: &SlipwayConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        // The file holds the account password.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("SLIPWAY_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let local = PathBuf::from("slipway.yaml");
        if local.exists() {
            return Ok(local);
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".slipway").join("config.yaml"))
    }
}
