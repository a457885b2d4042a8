use serde::Deserialize;

/// Status endpoint configuration
///
/// When enabled, `GET {path}/{kind}` responds with the named catalog error,
/// e.g. `/status/TooManyRequests`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "/status".to_string()
}
