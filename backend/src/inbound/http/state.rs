//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the relay use-case and remain testable without I/O.

use crate::domain::VendorRelay;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Relay use-case shared by the vendor endpoints.
    pub relay: VendorRelay,
}

impl HttpState {
    /// Construct state around the relay use-case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use engage_relay::domain::ports::FixtureVendorApi;
    /// use engage_relay::domain::{EnvCredentialResolver, VendorRelay};
    /// use engage_relay::inbound::http::state::HttpState;
    /// use mockable::DefaultEnv;
    ///
    /// let relay = VendorRelay::new(
    ///     Arc::new(EnvCredentialResolver::new(DefaultEnv::new())),
    ///     Arc::new(FixtureVendorApi),
    /// );
    /// let _state = HttpState::new(relay);
    /// ```
    #[must_use]
    pub const fn new(relay: VendorRelay) -> Self {
        Self { relay }
    }
}
