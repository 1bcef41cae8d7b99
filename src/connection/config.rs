use std::collections::HashMap;

use config::{ConfigError, Environment};
use log::info;
use serde::Deserialize;

use crate::validation::{check_not_empty, check_positive, ValidationError};

/// Configuration for a connection with a gRPC service.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Name of the connection, for user information only.
    #[serde(default)]
    pub name: String,
    /// Host name or address of the target gRPC server.
    #[serde(default)]
    pub server_address: String,
    /// Port of the target gRPC server.
    #[serde(default)]
    pub server_port: u16,
    /// Whether requests are expected to carry authentication.
    #[serde(default)]
    pub auth_enable: bool,
    /// Whether a TLS connection is expected with the service.
    #[serde(default)]
    pub use_tls: bool,
    /// Requests skipping validation of the certificate presented by the
    /// server. Not supported by the underlying TLS stack, see `connect`.
    #[serde(default)]
    pub skip_cert_validation: bool,
    /// Base64 encoded PEM of an additional trusted CA.
    #[serde(default)]
    pub client_ca: Option<String>,
}

impl ConnectionConfig {
    /// Loads the configuration from `CONNECTION_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    fn load(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(
                Environment::with_prefix("CONNECTION")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// Checks that the configuration options are valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_not_empty(&self.server_address, "serverAddress")?;
        check_positive(i64::from(self.server_port), "serverPort")?;
        Ok(())
    }

    /// Logs the effective connection options.
    pub fn print(&self) {
        info!(
            "connection options: name={} server={} port={} authEnable={} useTLS={} skipCertValidation={}",
            self.name,
            self.server_address,
            self.server_port,
            self.auth_enable,
            self.use_tls,
            self.skip_cert_validation
        );
    }

    /// Returns an `address:port` string for the target server.
    pub fn effective_address(&self) -> String {
        format!("{}:{}", self.server_address, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn load_empty() {
        let env = HashMap::from([]);
        let config = ConnectionConfig::load(Some(env)).unwrap();
        assert_eq!(config, ConnectionConfig::default());
    }

    #[test]
    fn load_environment() {
        let env = HashMap::from([
            (
                "CONNECTION_SERVER_ADDRESS".to_owned(),
                "api.example.com".to_owned(),
            ),
            ("CONNECTION_SERVER_PORT".to_owned(), "7060".to_owned()),
            ("CONNECTION_USE_TLS".to_owned(), "true".to_owned()),
        ]);
        let config = ConnectionConfig::load(Some(env)).unwrap();
        assert_eq!(
            config,
            ConnectionConfig {
                server_address: "api.example.com".to_owned(),
                server_port: 7060,
                use_tls: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn validate_rejects_empty_address() {
        let config = ConnectionConfig {
            server_port: 7060,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_port() {
        let config = ConnectionConfig {
            server_address: "api.example.com".to_owned(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn effective_address_joins_host_and_port() {
        let config = ConnectionConfig {
            server_address: "api.example.com".to_owned(),
            server_port: 7060,
            ..Default::default()
        };
        assert_eq!(config.effective_address(), "api.example.com:7060");
        config.validate().unwrap();
    }
}
