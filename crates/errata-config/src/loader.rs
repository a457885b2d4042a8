use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint path is malformed, two endpoints
    /// share a path, or the health path is nested under the status path
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_paths()?;
        Ok(())
    }

    fn validate_paths(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        let status = &self.server.status;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{}`", health.path);
        }

        if status.enabled {
            if !status.path.starts_with('/') {
                anyhow::bail!("server.status.path must start with '/': `{}`", status.path);
            }

            if status.path.trim_end_matches('/').is_empty() {
                anyhow::bail!("server.status.path must not be the root path");
            }

            let status_root = status.path.trim_end_matches('/');
            if health.enabled {
                let health_path = health.path.trim_end_matches('/');
                if health_path == status_root {
                    anyhow::bail!("server.health.path and server.status.path must differ");
                }

                if health_path.starts_with(&format!("{status_root}/")) {
                    anyhow::bail!(
                        "server.health.path `{}` must not be nested under server.status.path `{}`",
                        health.path,
                        status.path
                    );
                }
            }
        }

        Ok(())
    }
}
