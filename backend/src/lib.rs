//! Relay backend for the CleverTap profile and Web Inbox demo page.
//!
//! The crate follows a hexagonal layout: [`domain`] owns credentials,
//! identities, the relay use-case, and the vendor port; [`outbound`] holds the
//! reqwest adapter for the vendor REST API; [`inbound`] exposes the Actix
//! handlers; [`server`] wires everything into an `HttpServer`.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
