//! Driven port for the vendor's read-only REST lookups.
//!
//! The adapter owns transport details; the domain only sees the relayed JSON
//! value or one of three failure shapes.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::define_port_error;
use crate::domain::{Credentials, Identity};

/// Which vendor lookup to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorLookup {
    /// `GET /1/profile.json?identity=...`
    Profile,
    /// `GET /1/inbox.json?identity=...`
    Inbox,
}

impl VendorLookup {
    /// Path segment under the vendor's `/1/` API root.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Profile => "profile.json",
            Self::Inbox => "inbox.json",
        }
    }

    /// Noun phrase used in log lines and error messages.
    #[must_use]
    pub const fn subject(self) -> &'static str {
        match self {
            Self::Profile => "user data",
            Self::Inbox => "inbox messages",
        }
    }
}

define_port_error! {
    /// Ways a vendor lookup can fail.
    pub enum VendorApiError {
        /// The vendor answered with a non-success status; `body` is its payload.
        Rejected {
            /// Vendor HTTP status.
            status: u16,
            /// Vendor response body.
            body: Value,
        } =>
            "vendor rejected request with status {status}",
        /// The request went out but no response came back.
        Unreachable {
            /// Transport failure summary.
            message: String,
        } =>
            "no response from vendor: {message}",
        /// The request could not be built or sent, or the response was cut off.
        Unexpected {
            /// Failure summary.
            message: String,
        } =>
            "vendor request failed: {message}",
    }
}

/// Port for vendor profile and inbox lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorApi: Send + Sync {
    /// Perform one lookup for `identity` and return the vendor's JSON body.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use engage_relay::domain::ports::{FixtureVendorApi, VendorApi, VendorLookup};
    ///
    /// let body = FixtureVendorApi
    ///     .fetch(VendorLookup::Profile, &identity, &credentials)
    ///     .await?;
    /// assert_eq!(body["status"], "success");
    /// ```
    async fn fetch(
        &self,
        lookup: VendorLookup,
        identity: &Identity,
        credentials: &Credentials,
    ) -> Result<Value, VendorApiError>;
}

/// Fixture implementation echoing a canned success envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureVendorApi;

#[async_trait]
impl VendorApi for FixtureVendorApi {
    async fn fetch(
        &self,
        lookup: VendorLookup,
        identity: &Identity,
        _credentials: &Credentials,
    ) -> Result<Value, VendorApiError> {
        let body = match lookup {
            VendorLookup::Profile => json!({
                "status": "success",
                "record": { "identity": identity.as_str() },
            }),
            VendorLookup::Inbox => json!({ "status": "success", "messages": [] }),
        };
        Ok(body)
    }
}
