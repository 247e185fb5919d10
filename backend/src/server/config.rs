//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::outbound::vendor::VendorBaseUrl;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) public_dir: PathBuf,
    pub(crate) vendor_base: VendorBaseUrl,
}

impl ServerConfig {
    /// Construct a configuration bound to `bind_addr`, serving `public_dir`
    /// and calling the regional vendor endpoint.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            public_dir: public_dir.into(),
            vendor_base: VendorBaseUrl::Regional,
        }
    }

    /// Send vendor requests to a fixed origin instead of the regional host.
    #[must_use]
    pub fn with_vendor_base(mut self, base: VendorBaseUrl) -> Self {
        self.vendor_base = base;
        self
    }
}
