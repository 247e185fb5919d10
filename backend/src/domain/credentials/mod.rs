//! Vendor credentials and the environment-backed resolver.
//!
//! Credentials are read on every relayed request; a missing variable is a
//! per-request configuration error, not a boot failure. The passcode never
//! leaves this module in printable form: its `Debug` output is redacted and
//! the backing buffer is zeroed on drop.

use std::fmt;

use mockable::Env;
use zeroize::Zeroizing;

/// Environment variable holding the vendor account (project) identifier.
pub const PROJECT_ID_ENV: &str = "VENDOR_PROJECT_ID";
/// Environment variable holding the vendor passcode.
pub const PASSCODE_ENV: &str = "VENDOR_PASSCODE";
/// Environment variable selecting the vendor API region.
pub const REGION_ENV: &str = "VENDOR_REGION";
/// Region used when [`REGION_ENV`] is unset or blank.
pub const DEFAULT_REGION: &str = "eu1";

const REDACTED: &str = "***REDACTED***";

/// Vendor account identifier sent as the account-id header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId(String);

impl AccountId {
    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vendor passcode. Redacted in `Debug` and wiped on drop.
#[derive(Clone)]
pub struct Passcode(Zeroizing<String>);

impl Passcode {
    /// Expose the secret for header construction.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Passcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl PartialEq for Passcode {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Passcode {}

/// Credentials used to authenticate against the vendor REST API.
///
/// ## Invariants
/// - `account_id` and `passcode` are non-empty once trimmed.
/// - `region` is non-empty; it defaults to [`DEFAULT_REGION`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    account_id: AccountId,
    passcode: Passcode,
    region: String,
}

impl Credentials {
    /// Build credentials from raw values, applying the same checks as the
    /// environment resolver.
    ///
    /// # Examples
    /// ```
    /// use engage_relay::domain::Credentials;
    ///
    /// let creds = Credentials::try_new("ACC-123", "s3cret", None).unwrap();
    /// assert_eq!(creds.region(), "eu1");
    /// assert!(!format!("{creds:?}").contains("s3cret"));
    /// ```
    ///
    /// # Errors
    /// Returns [`MissingCredentialsError`] naming every blank required value.
    pub fn try_new(
        account_id: &str,
        passcode: &str,
        region: Option<&str>,
    ) -> Result<Self, MissingCredentialsError> {
        Self::from_parts(
            non_blank(Some(account_id)),
            non_blank(Some(passcode)),
            non_blank(region),
        )
    }

    fn from_parts(
        account_id: Option<String>,
        passcode: Option<String>,
        region: Option<String>,
    ) -> Result<Self, MissingCredentialsError> {
        match (account_id, passcode) {
            (Some(id), Some(secret)) => Ok(Self {
                account_id: AccountId(id),
                passcode: Passcode(Zeroizing::new(secret)),
                region: region.unwrap_or_else(|| DEFAULT_REGION.to_owned()),
            }),
            (id, secret) => {
                let mut missing = Vec::with_capacity(2);
                if id.is_none() {
                    missing.push(PROJECT_ID_ENV);
                }
                if secret.is_none() {
                    missing.push(PASSCODE_ENV);
                }
                Err(MissingCredentialsError { missing })
            }
        }
    }

    /// Vendor account identifier.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Vendor passcode.
    #[must_use]
    pub const fn passcode(&self) -> &Passcode {
        &self.passcode
    }

    /// API region subdomain, e.g. `eu1`.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

/// Raised when a required credential is absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing vendor credentials: {}", .missing.join(", "))]
pub struct MissingCredentialsError {
    missing: Vec<&'static str>,
}

impl MissingCredentialsError {
    /// Names of the environment variables that were missing or blank.
    #[must_use]
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }
}

/// Port resolving vendor credentials for a single request.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialResolver: Send + Sync {
    /// Resolve credentials, failing when a required value is absent.
    ///
    /// # Errors
    /// Returns [`MissingCredentialsError`] when the account identifier or
    /// passcode is unavailable.
    fn resolve(&self) -> Result<Credentials, MissingCredentialsError>;
}

/// Resolver reading [`PROJECT_ID_ENV`], [`PASSCODE_ENV`], and [`REGION_ENV`].
///
/// # Examples
/// ```
/// use engage_relay::domain::{CredentialResolver, EnvCredentialResolver};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "VENDOR_PROJECT_ID" => Some("ACC-123".to_owned()),
///     "VENDOR_PASSCODE" => Some("s3cret".to_owned()),
///     _ => None,
/// });
///
/// let creds = EnvCredentialResolver::new(env).resolve().unwrap();
/// assert_eq!(creds.account_id().as_str(), "ACC-123");
/// ```
pub struct EnvCredentialResolver<E> {
    env: E,
}

impl<E> EnvCredentialResolver<E> {
    /// Wrap an environment source.
    #[must_use]
    pub const fn new(env: E) -> Self {
        Self { env }
    }
}

impl<E> CredentialResolver for EnvCredentialResolver<E>
where
    E: Env + Send + Sync,
{
    fn resolve(&self) -> Result<Credentials, MissingCredentialsError> {
        let read = |name: &str| non_blank(self.env.string(name).as_deref());
        Credentials::from_parts(read(PROJECT_ID_ENV), read(PASSCODE_ENV), read(REGION_ENV))
    }
}
