//! Vendor relay use-case: resolve credentials, call the vendor once, classify.
//!
//! Every failure is converted into a [`ProxyError`] here, so inbound adapters
//! never see a raw transport error. There are no retries: each inbound
//! request maps to at most one outbound call.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::domain::ports::{VendorApi, VendorApiError, VendorLookup};
use crate::domain::{CredentialResolver, Identity, ProxyError, TraceId};

/// Message returned when credentials are not configured.
pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "Missing credentials. Please set VENDOR_PROJECT_ID and VENDOR_PASSCODE.";
/// Message returned when the vendor never answered.
pub const NO_RESPONSE_MESSAGE: &str =
    "No response from vendor API. Please check your network connection.";

/// Account details the browser page needs to bootstrap the vendor SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
    /// Vendor account identifier.
    #[schema(example = "8R7-Z6K-4W7Z")]
    pub account_id: String,
    /// Vendor region subdomain.
    #[schema(example = "eu1")]
    pub region: String,
}

/// Relay service shared by the profile and inbox endpoints.
#[derive(Clone)]
pub struct VendorRelay {
    credentials: Arc<dyn CredentialResolver>,
    vendor: Arc<dyn VendorApi>,
}

impl VendorRelay {
    /// Build a relay over the given ports.
    #[must_use]
    pub const fn new(credentials: Arc<dyn CredentialResolver>, vendor: Arc<dyn VendorApi>) -> Self {
        Self {
            credentials,
            vendor,
        }
    }

    /// Relay one lookup for the caller-supplied identity `raw`.
    ///
    /// # Errors
    /// Returns a [`ProxyError`] for an empty identity, missing credentials, or
    /// any classified vendor failure.
    pub async fn relay(&self, lookup: VendorLookup, raw: &str) -> Result<Value, ProxyError> {
        let identity = Identity::new(raw)
            .map_err(|err| ProxyError::invalid_request(err.to_string()))?;
        let trace_id = TraceId::current().map(|id| id.to_string());
        let credentials = self.credentials.resolve().map_err(|err| {
            error!(
                trace_id = trace_id.as_deref(),
                missing = ?err.missing(),
                "vendor credentials are not configured"
            );
            ProxyError::configuration(MISSING_CREDENTIALS_MESSAGE)
        })?;

        info!(
            trace_id = trace_id.as_deref(),
            identity = %identity,
            lookup = lookup.subject(),
            "fetching {} from vendor",
            lookup.subject()
        );

        self.vendor
            .fetch(lookup, &identity, &credentials)
            .await
            .map_err(|err| classify(lookup, &identity, trace_id.as_deref(), err))
    }

    /// Report the public account details used by the SDK bootstrap script.
    ///
    /// # Errors
    /// Returns a configuration [`ProxyError`] when credentials are missing.
    pub fn sdk_config(&self) -> Result<SdkConfig, ProxyError> {
        let credentials = self
            .credentials
            .resolve()
            .map_err(|_| ProxyError::configuration(MISSING_CREDENTIALS_MESSAGE))?;
        Ok(SdkConfig {
            account_id: credentials.account_id().to_string(),
            region: credentials.region().to_owned(),
        })
    }
}

fn classify(
    lookup: VendorLookup,
    identity: &Identity,
    trace_id: Option<&str>,
    err: VendorApiError,
) -> ProxyError {
    let subject = lookup.subject();
    match err {
        VendorApiError::Rejected { status, body } => {
            warn!(
                trace_id,
                identity = %identity,
                status,
                body = %body,
                "vendor rejected {subject} lookup"
            );
            ProxyError::vendor_rejected(format!("Failed to fetch {subject} from vendor"), status, body)
        }
        VendorApiError::Unreachable { message } => {
            error!(trace_id, identity = %identity, error = %message, "no response from vendor");
            ProxyError::network_unreachable(NO_RESPONSE_MESSAGE)
        }
        VendorApiError::Unexpected { message } => {
            error!(trace_id, identity = %identity, error = %message, "vendor call failed");
            ProxyError::unexpected(format!("Error fetching {subject}"), message)
        }
    }
}
