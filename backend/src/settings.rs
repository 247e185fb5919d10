//! Server settings loaded via OrthoConfig.
//!
//! Vendor credentials are deliberately absent: they are read from the
//! environment on every request so a restart is not needed to rotate them.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::vendor::VendorBaseUrl;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Startup configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Host and port could not be resolved to a socket address.
    #[error("cannot resolve bind address {host}:{port}: {source}")]
    BindAddress {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
        /// Resolver failure.
        #[source]
        source: std::io::Error,
    },
    /// Resolution succeeded but yielded no address.
    #[error("bind address {host}:{port} resolved to nothing")]
    NoBindAddress {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
    },
    /// The vendor base URL override is not an absolute http(s) URL.
    #[error("invalid vendor base URL {url:?}: {reason}")]
    VendorBaseUrl {
        /// Rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Listener, asset, and vendor endpoint settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RELAY")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Directory holding `index.html` and the page scripts.
    pub public_dir: Option<PathBuf>,
    /// Replace `https://{region}.api.clevertap.com` (staging or a local stub).
    pub vendor_base_url: Option<String>,
}

impl ServerSettings {
    /// Return the configured host, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the public asset directory.
    #[must_use]
    pub fn public_dir(&self) -> PathBuf {
        self.public_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR))
    }

    /// Resolve host and port into the socket address to bind.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the host cannot be resolved.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let (host, port) = (self.host(), self.port);
        (host, port)
            .to_socket_addrs()
            .map_err(|source| SettingsError::BindAddress {
                host: host.to_owned(),
                port,
                source,
            })?
            .next()
            .ok_or_else(|| SettingsError::NoBindAddress {
                host: host.to_owned(),
                port,
            })
    }

    /// Decide where vendor requests go.
    ///
    /// # Errors
    /// Returns [`SettingsError::VendorBaseUrl`] unless the override is an
    /// absolute `http` or `https` URL.
    pub fn vendor_base(&self) -> Result<VendorBaseUrl, SettingsError> {
        let Some(raw) = self.vendor_base_url.as_deref() else {
            return Ok(VendorBaseUrl::Regional);
        };
        let invalid = |reason: String| SettingsError::VendorBaseUrl {
            url: raw.to_owned(),
            reason,
        };
        let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(VendorBaseUrl::Fixed(url)),
            "http" | "https" => Err(invalid("missing host".to_owned())),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }
}
