//! End-to-end relay behaviour against a stubbed vendor API.
//!
//! The full application from `server::build_app` is driven through Actix's
//! test harness while `httpmock` plays the vendor, so URL layout, headers,
//! hit counts, timeouts, and status relaying are all observed on the wire.

use std::io::{self, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::web;
use engage_relay::domain::{
    EnvCredentialResolver, MISSING_CREDENTIALS_MESSAGE, NO_RESPONSE_MESSAGE, PASSCODE_ENV,
    PROJECT_ID_ENV, REGION_ENV, TRACE_ID_HEADER, VendorRelay,
};
use engage_relay::inbound::http::assets::PublicDir;
use engage_relay::inbound::http::health::HealthState;
use engage_relay::inbound::http::state::HttpState;
use engage_relay::outbound::vendor::{
    ACCOUNT_ID_HEADER, PASSCODE_HEADER, VENDOR_TIMEOUT, VendorBaseUrl, VendorHttpClient,
};
use engage_relay::server::{AppDependencies, build_app};
use httpmock::{Method::GET, MockServer};
use mockable::MockEnv;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;
use url::Url;

const ACCOUNT_ID: &str = "TEST-ACC-123";
const PASSCODE: &str = "s3cr3t-passcode";

fn env_with(account: Option<&'static str>, passcode: Option<&'static str>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string().returning(move |name| match name {
        PROJECT_ID_ENV => account.map(str::to_owned),
        PASSCODE_ENV => passcode.map(str::to_owned),
        REGION_ENV => Some("us1".to_owned()),
        _ => None,
    });
    env
}

fn configured_env() -> MockEnv {
    env_with(Some(ACCOUNT_ID), Some(PASSCODE))
}

#[fixture]
fn public_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("index.html"), "<title>engage-relay</title>")
        .expect("write index");
    dir
}

fn deps(vendor: &MockServer, env: MockEnv, timeout: Duration, public: &Path) -> AppDependencies {
    let base = Url::parse(&vendor.base_url()).expect("stub base url");
    let client =
        VendorHttpClient::new(VendorBaseUrl::Fixed(base), timeout).expect("vendor client");
    let relay = VendorRelay::new(
        Arc::new(EnvCredentialResolver::new(env)),
        Arc::new(client),
    );
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::new(relay)),
        public_dir: web::Data::new(PublicDir::new(public)),
    }
}

/// Shared in-memory sink for formatted log lines.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock").clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[rstest]
#[actix_web::test]
async fn profile_lookup_makes_one_call_and_never_logs_the_passcode(public_dir: TempDir) {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(logs.clone())
        .json()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let vendor = MockServer::start_async().await;
    let profile = vendor
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/profile.json")
                .query_param("identity", "jane@example.com")
                .header(ACCOUNT_ID_HEADER.to_ascii_lowercase(), ACCOUNT_ID)
                .header(PASSCODE_HEADER.to_ascii_lowercase(), PASSCODE)
                .header("content-type", "application/json");
            then.status(200)
                .json_body(json!({"status": "success", "record": {"name": "Jane"}}));
        })
        .await;

    let app = test::init_service(build_app(deps(
        &vendor,
        configured_env(),
        VENDOR_TIMEOUT,
        public_dir.path(),
    )))
    .await;
    let request = TestRequest::get()
        .uri("/api/user/jane@example.com")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    profile.assert_hits_async(1).await;

    let captured = logs.contents();
    assert!(captured.contains("calling vendor API"), "vendor call not logged: {captured}");
    assert!(captured.contains(ACCOUNT_ID));
    assert!(captured.contains("***REDACTED***"));
    assert!(!captured.contains(PASSCODE), "passcode leaked into logs");
}

#[rstest]
#[actix_web::test]
async fn success_body_is_relayed_exactly(public_dir: TempDir) {
    let body = json!({
        "status": "success",
        "messages": [
            {"id": "m1", "title": "Welcome", "isRead": false, "meta": {"tags": ["a", "b"]}},
            {"id": "m2", "title": null, "isRead": true}
        ],
        "count": 2
    });
    let vendor = MockServer::start_async().await;
    let inbox = vendor
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/inbox.json")
                .query_param("identity", "u-42");
            then.status(200).json_body(body.clone());
        })
        .await;

    let app = test::init_service(build_app(deps(
        &vendor,
        configured_env(),
        VENDOR_TIMEOUT,
        public_dir.path(),
    )))
    .await;
    let response =
        test::call_service(&app, TestRequest::get().uri("/api/inbox/u-42").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let relayed: Value = test::read_body_json(response).await;
    assert_eq!(relayed, body);
    inbox.assert_hits_async(1).await;
}

#[rstest]
#[case(None, Some(PASSCODE))]
#[case(Some(ACCOUNT_ID), None)]
#[case(None, None)]
#[actix_web::test]
async fn missing_credentials_never_reach_the_vendor(
    public_dir: TempDir,
    #[case] account: Option<&'static str>,
    #[case] passcode: Option<&'static str>,
) {
    let vendor = MockServer::start_async().await;
    let any = vendor
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!({"status": "success"}));
        })
        .await;

    let app = test::init_service(build_app(deps(
        &vendor,
        env_with(account, passcode),
        VENDOR_TIMEOUT,
        public_dir.path(),
    )))
    .await;
    let response =
        test::call_service(&app, TestRequest::get().uri("/api/user/jane").to_request()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({"error": MISSING_CREDENTIALS_MESSAGE}));
    assert_eq!(any.hits_async().await, 0);
}

#[rstest]
#[actix_web::test]
async fn vendor_not_found_is_relayed_with_details(public_dir: TempDir) {
    let vendor_body = json!({"status": "fail", "msg": "identity not found"});
    let vendor = MockServer::start_async().await;
    vendor
        .mock_async(|when, then| {
            when.method(GET).path("/1/profile.json");
            then.status(404).json_body(vendor_body.clone());
        })
        .await;

    let app = test::init_service(build_app(deps(
        &vendor,
        configured_env(),
        VENDOR_TIMEOUT,
        public_dir.path(),
    )))
    .await;
    let response =
        test::call_service(&app, TestRequest::get().uri("/api/user/ghost").to_request()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "error": "Failed to fetch user data from vendor",
            "details": vendor_body,
            "status": 404,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn non_json_vendor_error_body_is_relayed_as_text(public_dir: TempDir) {
    let vendor = MockServer::start_async().await;
    vendor
        .mock_async(|when, then| {
            when.method(GET).path("/1/inbox.json");
            then.status(503).body("Service Unavailable");
        })
        .await;

    let app = test::init_service(build_app(deps(
        &vendor,
        configured_env(),
        VENDOR_TIMEOUT,
        public_dir.path(),
    )))
    .await;
    let response =
        test::call_service(&app, TestRequest::get().uri("/api/inbox/jane").to_request()).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "error": "Failed to fetch inbox messages from vendor",
            "details": "Service Unavailable",
            "status": 503,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn vendor_timeout_is_network_unreachable(public_dir: TempDir) {
    let vendor = MockServer::start_async().await;
    vendor
        .mock_async(|when, then| {
            when.method(GET).path("/1/profile.json");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({"status": "success"}));
        })
        .await;

    let app = test::init_service(build_app(deps(
        &vendor,
        configured_env(),
        Duration::from_millis(200),
        public_dir.path(),
    )))
    .await;
    let response =
        test::call_service(&app, TestRequest::get().uri("/api/user/slow").to_request()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({"error": NO_RESPONSE_MESSAGE}));
}

#[rstest]
#[actix_web::test]
async fn unreachable_vendor_is_network_unreachable(public_dir: TempDir) {
    // Bind then drop a listener so the port is known to be closed.
    let closed = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = closed.local_addr().expect("local addr").port();
    drop(closed);

    let base = Url::parse(&format!("http://127.0.0.1:{port}/")).expect("url");
    let client = VendorHttpClient::new(VendorBaseUrl::Fixed(base), VENDOR_TIMEOUT)
        .expect("vendor client");
    let relay = VendorRelay::new(
        Arc::new(EnvCredentialResolver::new(configured_env())),
        Arc::new(client),
    );
    let app = test::init_service(build_app(AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::new(relay)),
        public_dir: web::Data::new(PublicDir::new(public_dir.path())),
    }))
    .await;
    let response =
        test::call_service(&app, TestRequest::get().uri("/api/user/jane").to_request()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({"error": NO_RESPONSE_MESSAGE}));
}

/// Answer one request with a complete status line and headers, then hang up
/// before the promised body length has been written.
fn truncating_vendor() -> (Url, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut chunk = [0_u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = stream.read(&mut chunk).expect("read request");
            if read == 0 {
                break;
            }
            request.extend_from_slice(chunk.get(..read).expect("read fits buffer"));
        }
        stream
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 64\r\n\r\n{\"status\":",
            )
            .expect("write head");
    });
    let base = Url::parse(&format!("http://{addr}/")).expect("url");
    (base, handle)
}

#[rstest]
#[actix_web::test]
async fn body_cut_off_after_status_is_unexpected(public_dir: TempDir) {
    let (base, vendor) = truncating_vendor();
    let client = VendorHttpClient::new(VendorBaseUrl::Fixed(base), VENDOR_TIMEOUT)
        .expect("vendor client");
    let relay = VendorRelay::new(
        Arc::new(EnvCredentialResolver::new(configured_env())),
        Arc::new(client),
    );
    let app = test::init_service(build_app(AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::new(relay)),
        public_dir: web::Data::new(PublicDir::new(public_dir.path())),
    }))
    .await;
    let response =
        test::call_service(&app, TestRequest::get().uri("/api/user/jane").to_request()).await;
    vendor.join().expect("stub vendor thread");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Error fetching user data");
    assert_ne!(body["error"], NO_RESPONSE_MESSAGE);
    assert!(body["details"].is_string(), "missing failure summary: {body}");
}

#[rstest]
#[actix_web::test]
async fn concurrent_lookups_complete_independently(public_dir: TempDir) {
    const SLOW: Duration = Duration::from_millis(1500);
    let vendor = MockServer::start_async().await;
    vendor
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/profile.json")
                .query_param("identity", "slow");
            then.status(200).delay(SLOW).json_body(json!({"who": "slow"}));
        })
        .await;
    vendor
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/profile.json")
                .query_param("identity", "fast");
            then.status(200).json_body(json!({"who": "fast"}));
        })
        .await;

    let app = test::init_service(build_app(deps(
        &vendor,
        configured_env(),
        VENDOR_TIMEOUT,
        public_dir.path(),
    )))
    .await;

    let started = Instant::now();
    let app = &app;
    let timed = move |uri: &'static str| {
        async move {
            let response = test::call_service(app, TestRequest::get().uri(uri).to_request()).await;
            let status = response.status();
            let body: Value = test::read_body_json(response).await;
            (status, body, started.elapsed())
        }
    };
    let (slow, fast) = futures::join!(timed("/api/user/slow"), timed("/api/user/fast"));

    assert_eq!(slow.0, StatusCode::OK);
    assert_eq!(fast.0, StatusCode::OK);
    assert_eq!(slow.1, json!({"who": "slow"}));
    assert_eq!(fast.1, json!({"who": "fast"}));
    assert!(slow.2 >= SLOW);
    assert!(fast.2 < SLOW, "fast lookup waited for the slow one: {:?}", fast.2);
}

#[rstest]
#[case(configured_env())]
#[case(env_with(None, None))]
#[actix_web::test]
async fn favicon_is_always_no_content(public_dir: TempDir, #[case] env: MockEnv) {
    let vendor = MockServer::start_async().await;
    let app = test::init_service(build_app(deps(
        &vendor,
        env,
        VENDOR_TIMEOUT,
        public_dir.path(),
    )))
    .await;
    let response =
        test::call_service(&app, TestRequest::get().uri("/favicon.ico").to_request()).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(response).await.is_empty());
}

#[rstest]
#[actix_web::test]
async fn root_serves_the_page(public_dir: TempDir) {
    let vendor = MockServer::start_async().await;
    let app = test::init_service(build_app(deps(
        &vendor,
        configured_env(),
        VENDOR_TIMEOUT,
        public_dir.path(),
    )))
    .await;
    let response = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = test::read_body(response).await;
    assert_eq!(body.as_ref(), b"<title>engage-relay</title>");
}

#[rstest]
#[actix_web::test]
async fn sdk_config_reflects_environment(public_dir: TempDir) {
    let vendor = MockServer::start_async().await;
    let app = test::init_service(build_app(deps(
        &vendor,
        configured_env(),
        VENDOR_TIMEOUT,
        public_dir.path(),
    )))
    .await;
    let response =
        test::call_service(&app, TestRequest::get().uri("/api/sdk-config").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({"accountId": ACCOUNT_ID, "region": "us1"}));
}
