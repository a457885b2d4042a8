//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use errata_config::{Config, HealthConfig, ServerConfig, StatusConfig, TelemetryConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with the health endpoint on and the status
    /// endpoint off
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    status: StatusConfig::default(),
                },
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Enable the status endpoint under `path`
    pub fn with_status(mut self, path: &str) -> Self {
        self.config.server.status = StatusConfig {
            enabled: true,
            path: path.to_owned(),
        };
        self
    }

    /// Serve the health endpoint at `path`
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
