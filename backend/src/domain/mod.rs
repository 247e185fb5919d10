//! Domain primitives, ports, and the vendor relay use-case.
//!
//! Purpose: keep vendor credential handling and failure classification free
//! of HTTP framework types so the relay can be exercised with port doubles.
//!
//! Public surface:
//! - [`Credentials`] and [`CredentialResolver`]: vendor credentials sourced
//!   from the process environment.
//! - [`Identity`]: the vendor's end-user key.
//! - [`ProxyError`] and [`ProxyErrorKind`]: the error body relayed to callers.
//! - [`VendorRelay`]: resolve, call, classify.

pub mod credentials;
pub mod error;
pub mod identity;
pub mod ports;
pub mod relay;
pub mod trace_id;

pub use self::credentials::{
    AccountId, CredentialResolver, Credentials, DEFAULT_REGION, EnvCredentialResolver,
    MissingCredentialsError, PASSCODE_ENV, Passcode, PROJECT_ID_ENV, REGION_ENV,
};
pub use self::error::{ProxyError, ProxyErrorKind};
pub use self::identity::{Identity, IdentityValidationError};
pub use self::relay::{MISSING_CREDENTIALS_MESSAGE, NO_RESPONSE_MESSAGE, SdkConfig, VendorRelay};
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
