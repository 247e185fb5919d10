//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultEnv;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{EnvCredentialResolver, VendorRelay};
use crate::inbound::http::assets::{PublicDir, favicon, index, static_files};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::relay::{get_inbox, get_user, sdk_config};
use crate::inbound::http::state::HttpState;
use crate::outbound::vendor::{VENDOR_TIMEOUT, VendorHttpClient};

/// Shared state handed to every worker's `App`.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags.
    pub health_state: web::Data<HealthState>,
    /// Relay handed to the vendor endpoints.
    pub http_state: web::Data<HttpState>,
    /// Root of `index.html` and the page scripts.
    pub public_dir: web::Data<PublicDir>,
}

/// Assemble the application: relay endpoints, probes, docs, then static files.
#[must_use]
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        public_dir,
    } = deps;
    let files = static_files(&public_dir);

    let routed = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(public_dir)
        .wrap(Trace)
        .service(get_user)
        .service(get_inbox)
        .service(sdk_config)
        .service(ready)
        .service(live)
        .service(index)
        .service(favicon);

    #[cfg(debug_assertions)]
    let app = routed.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = routed;

    // Registered last: the file service claims every remaining path.
    app.service(files)
}

/// Build the relay over the process environment and the reqwest adapter.
///
/// # Errors
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub fn build_relay(config: &ServerConfig) -> std::io::Result<VendorRelay> {
    let vendor = VendorHttpClient::new(config.vendor_base.clone(), VENDOR_TIMEOUT)
        .map_err(|e| std::io::Error::other(format!("vendor client construction failed: {e}")))?;
    Ok(VendorRelay::new(
        Arc::new(EnvCredentialResolver::new(DefaultEnv::new())),
        Arc::new(vendor),
    ))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the vendor client, binding the
/// socket, or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(HttpState::new(build_relay(&config)?)),
        public_dir: web::Data::new(PublicDir::new(config.public_dir.clone())),
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
