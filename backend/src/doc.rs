//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the relay endpoints, the health probes, and the
//! response schemas. Swagger UI serves it at `/docs` in debug builds.

use crate::domain::{ProxyError, SdkConfig};
use utoipa::OpenApi;

/// OpenAPI document for the relay API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "engage-relay API",
        description = "Server-side relay for vendor profile and inbox lookups, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::relay::get_user,
        crate::inbound::http::relay::get_inbox,
        crate::inbound::http::relay::sdk_config,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ProxyError, SdkConfig)),
    tags(
        (name = "relay", description = "Vendor lookups relayed with server-held credentials"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
