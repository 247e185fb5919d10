//! HTTP adapter mapping for relay errors.
//!
//! Purpose: keep [`ProxyError`] HTTP-agnostic while letting Actix handlers
//! return it directly. The body is always the `{error, details?, status?}`
//! payload; the trace identifier travels in a header so the body shape stays
//! exactly what the browser page expects.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{ProxyError, ProxyErrorKind, TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ProxyError>;

fn status_for(error: &ProxyError) -> StatusCode {
    match error.kind() {
        ProxyErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ProxyErrorKind::VendorRejected => error
            .vendor_status()
            .and_then(|status| StatusCode::from_u16(status).ok())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        ProxyErrorKind::Configuration
        | ProxyErrorKind::NetworkUnreachable
        | ProxyErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = TraceId::current() {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        builder.json(self)
    }
}
