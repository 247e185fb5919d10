//! Vendor relay endpoints.
//!
//! ```text
//! GET /api/user/{user_id}
//! GET /api/inbox/{user_id}
//! GET /api/sdk-config
//! ```
//!
//! Successful vendor bodies are passed through untouched with status 200.
//! Failures are already classified by the relay; the [`ProxyError`]
//! `ResponseError` impl picks the status.

use actix_web::{get, web};
use serde_json::Value;

use crate::domain::ports::VendorLookup;
use crate::domain::{ProxyError, SdkConfig};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

async fn relay_lookup(
    state: &HttpState,
    lookup: VendorLookup,
    path: web::Path<String>,
) -> ApiResult<web::Json<Value>> {
    let identity = path.into_inner();
    state.relay.relay(lookup, &identity).await.map(web::Json)
}

/// Fetch the vendor profile for `user_id`.
#[utoipa::path(
    get,
    path = "/api/user/{user_id}",
    description = "Relay a vendor profile lookup. Example request: GET /api/user/jane%40example.com",
    params(("user_id" = String, Path, description = "Vendor identity of the end user")),
    responses(
        (status = 200, description = "Vendor profile body, relayed verbatim", body = serde_json::Value),
        (status = 400, description = "Empty identity", body = ProxyError),
        (status = 500, description = "Missing credentials, no vendor response, or unexpected failure", body = ProxyError),
        (status = "4XX", description = "Vendor rejected the lookup; its status and body are echoed", body = ProxyError)
    ),
    tags = ["relay"],
    operation_id = "getUser"
)]
#[get("/api/user/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Value>> {
    relay_lookup(&state, VendorLookup::Profile, path).await
}

/// Fetch the vendor inbox messages for `user_id`.
#[utoipa::path(
    get,
    path = "/api/inbox/{user_id}",
    description = "Relay a vendor inbox lookup. Example request: GET /api/inbox/jane%40example.com",
    params(("user_id" = String, Path, description = "Vendor identity of the end user")),
    responses(
        (status = 200, description = "Vendor inbox body, relayed verbatim", body = serde_json::Value),
        (status = 400, description = "Empty identity", body = ProxyError),
        (status = 500, description = "Missing credentials, no vendor response, or unexpected failure", body = ProxyError),
        (status = "4XX", description = "Vendor rejected the lookup; its status and body are echoed", body = ProxyError)
    ),
    tags = ["relay"],
    operation_id = "getInbox"
)]
#[get("/api/inbox/{user_id}")]
pub async fn get_inbox(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Value>> {
    relay_lookup(&state, VendorLookup::Inbox, path).await
}

/// Public account details for the browser SDK bootstrap.
#[utoipa::path(
    get,
    path = "/api/sdk-config",
    responses(
        (status = 200, description = "Vendor account and region", body = SdkConfig),
        (status = 500, description = "Missing credentials", body = ProxyError)
    ),
    tags = ["relay"],
    operation_id = "getSdkConfig"
)]
#[get("/api/sdk-config")]
pub async fn sdk_config(state: web::Data<HttpState>) -> ApiResult<web::Json<SdkConfig>> {
    state.relay.sdk_config().map(web::Json)
}
