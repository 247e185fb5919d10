//! Relay error payload.
//!
//! These errors are transport agnostic. The inbound HTTP adapter picks the
//! status code from [`ProxyError::kind`] and serialises the payload as
//! `{"error": ..., "details": ..., "status": ...}`.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Failure category. Drives the HTTP status chosen by inbound adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ProxyErrorKind {
    /// The inbound request was malformed (e.g. empty identity).
    InvalidRequest,
    /// Vendor credentials are not configured.
    Configuration,
    /// The vendor answered with a non-success status.
    VendorRejected,
    /// The request was sent but no response arrived (timeout, DNS, connect).
    NetworkUnreachable,
    /// Anything else that went wrong while building or sending the request.
    Unexpected,
}

/// Error body relayed to the browser.
///
/// `status` is only populated for [`ProxyErrorKind::VendorRejected`], where
/// it echoes the vendor's HTTP status.
///
/// # Examples
/// ```
/// use engage_relay::domain::{ProxyError, ProxyErrorKind};
/// use serde_json::json;
///
/// let err = ProxyError::vendor_rejected("lookup failed", 404, json!({"status": "fail"}));
/// assert_eq!(err.kind(), ProxyErrorKind::VendorRejected);
/// assert_eq!(err.vendor_status(), Some(404));
/// assert_eq!(
///     serde_json::to_value(&err).unwrap(),
///     json!({"error": "lookup failed", "details": {"status": "fail"}, "status": 404}),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProxyError {
    #[serde(skip)]
    kind: ProxyErrorKind,
    #[serde(rename = "error")]
    #[schema(example = "No response from vendor API. Please check your network connection.")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 404)]
    status: Option<u16>,
}

impl ProxyError {
    fn new(kind: ProxyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            status: None,
        }
    }

    /// Malformed inbound request.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProxyErrorKind::InvalidRequest, message)
    }

    /// Credentials missing from configuration.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProxyErrorKind::Configuration, message)
    }

    /// Vendor responded with `status`; `body` is relayed as `details`.
    #[must_use]
    pub fn vendor_rejected(message: impl Into<String>, status: u16, body: Value) -> Self {
        Self {
            details: Some(body),
            status: Some(status),
            ..Self::new(ProxyErrorKind::VendorRejected, message)
        }
    }

    /// No response from the vendor.
    #[must_use]
    pub fn network_unreachable(message: impl Into<String>) -> Self {
        Self::new(ProxyErrorKind::NetworkUnreachable, message)
    }

    /// Any other failure; `detail` is a summary of the underlying cause.
    #[must_use]
    pub fn unexpected(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ProxyErrorKind::Unexpected, message).with_details(Value::String(detail.into()))
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> ProxyErrorKind {
        self.kind
    }

    /// Human-readable message, serialised as `error`.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Supplementary details.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Vendor HTTP status for rejected calls.
    #[must_use]
    pub const fn vendor_status(&self) -> Option<u16> {
        self.status
    }
}

impl std::fmt::Display for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProxyError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn configuration_error_serialises_message_only() {
        let err = ProxyError::configuration("Missing credentials.");
        assert_eq!(
            serde_json::to_value(&err).expect("serialise"),
            json!({"error": "Missing credentials."})
        );
    }

    #[rstest]
    fn unexpected_error_carries_detail_string() {
        let err = ProxyError::unexpected("Error fetching inbox messages", "builder error");
        assert_eq!(err.kind(), ProxyErrorKind::Unexpected);
        assert_eq!(
            serde_json::to_value(&err).expect("serialise"),
            json!({"error": "Error fetching inbox messages", "details": "builder error"})
        );
    }

    #[rstest]
    fn vendor_rejection_keeps_body_and_status() {
        let body = json!({"status": "fail", "msg": "identity not found"});
        let err = ProxyError::vendor_rejected("Failed", 404, body.clone());
        assert_eq!(err.details(), Some(&body));
        assert_eq!(err.vendor_status(), Some(404));
    }

    #[rstest]
    fn display_uses_message() {
        let err = ProxyError::network_unreachable("No response");
        assert_eq!(err.to_string(), "No response");
    }
}
