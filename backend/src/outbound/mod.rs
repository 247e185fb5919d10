//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and the wire format of
//! the system they talk to. They contain no relay logic.
//!
//! - **vendor**: reqwest client for the CleverTap profile and inbox REST API.

pub mod vendor;
