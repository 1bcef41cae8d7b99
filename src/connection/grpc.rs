use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::warn;
use thiserror::Error;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};

use super::ConnectionConfig;

/// Timeout applied to every request sent over the channel.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5 * 60);

#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("invalid endpoint uri {uri}: {source}")]
    InvalidUri {
        uri: String,
        source: tonic::transport::Error,
    },
    #[error("error decoding CA certificate: {0}")]
    CaDecode(#[from] base64::DecodeError),
    #[error("error configuring TLS: {0}")]
    Tls(#[source] tonic::transport::Error),
    #[error("error connecting to {address}: {source}")]
    Connect {
        address: String,
        source: tonic::transport::Error,
    },
}

/// Establishes a channel with the gRPC server described by `config`.
pub async fn connect(config: &ConnectionConfig) -> Result<Channel, ConnectionError> {
    let endpoint = build_endpoint(config)?;
    endpoint
        .connect()
        .await
        .map_err(|source| ConnectionError::Connect {
            address: config.effective_address(),
            source,
        })
}

/// Creates a channel without establishing the connection immediately; the
/// connection is attempted on first use.
pub fn connect_lazy(config: &ConnectionConfig) -> Result<Channel, ConnectionError> {
    Ok(build_endpoint(config)?.connect_lazy())
}

fn build_endpoint(config: &ConnectionConfig) -> Result<Endpoint, ConnectionError> {
    let uri = endpoint_uri(config);
    let mut endpoint = Endpoint::from_shared(uri.clone())
        .map_err(|source| ConnectionError::InvalidUri { uri, source })?
        .timeout(REQUEST_TIMEOUT);

    if config.use_tls {
        if config.skip_cert_validation {
            // rustls offers no way to disable server certificate validation.
            warn!("skipping server certificate validation is not supported, certificates will be verified");
        }
        let mut tls = ClientTlsConfig::new().with_native_roots();
        if let Some(ca) = &config.client_ca {
            let decoded = STANDARD.decode(ca)?;
            tls = tls.ca_certificate(Certificate::from_pem(decoded));
        }
        endpoint = endpoint.tls_config(tls).map_err(ConnectionError::Tls)?;
    } else {
        warn!(
            "using insecure connection to {}",
            config.effective_address()
        );
    }

    Ok(endpoint)
}

fn endpoint_uri(config: &ConnectionConfig) -> String {
    let scheme = if config.use_tls { "https" } else { "http" };
    format!("{}://{}", scheme, config.effective_address())
}
