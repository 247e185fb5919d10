//! Static page and asset serving.
//!
//! `GET /` answers with `index.html` from the public directory,
//! `GET /favicon.ico` is always an empty 204, and every other path falls
//! through to [`static_files`], which must be registered last.

use std::path::{Path, PathBuf};

use actix_files::{Files, NamedFile};
use actix_web::{HttpResponse, get, web};

const INDEX_FILE: &str = "index.html";

/// Directory holding the browser page and its scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicDir(PathBuf);

impl PublicDir {
    /// Wrap a directory path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Borrow the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Serve the demo page.
#[get("/")]
pub async fn index(dir: web::Data<PublicDir>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(dir.path().join(INDEX_FILE)).await?)
}

/// Browsers ask for a favicon on every page load; answer without touching disk.
#[get("/favicon.ico")]
pub async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Catch-all file service rooted at the public directory.
#[must_use]
pub fn static_files(dir: &PublicDir) -> Files {
    Files::new("/", dir.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn public_dir() -> TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join(INDEX_FILE), "<h1>relay</h1>").expect("write index");
        std::fs::create_dir(dir.path().join("js")).expect("create js dir");
        std::fs::write(dir.path().join("js").join("app.js"), "console.log('ok');")
            .expect("write script");
        dir
    }

    async fn fetch(dir: &TempDir, uri: &str) -> (StatusCode, web::Bytes) {
        let public = PublicDir::new(dir.path());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(public.clone()))
                .service(index)
                .service(favicon)
                .service(static_files(&public)),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        (status, test::read_body(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn root_serves_index(public_dir: TempDir) {
        let (status, body) = fetch(&public_dir, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_ref(), b"<h1>relay</h1>");
    }

    #[rstest]
    #[actix_web::test]
    async fn scripts_are_served_from_public_dir(public_dir: TempDir) {
        let (status, body) = fetch(&public_dir, "/js/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_ref(), b"console.log('ok');");
    }

    #[rstest]
    #[actix_web::test]
    async fn favicon_is_empty_no_content(public_dir: TempDir) {
        std::fs::write(public_dir.path().join("favicon.ico"), [0_u8, 1, 2]).expect("write icon");
        let (status, body) = fetch(&public_dir, "/favicon.ico").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_asset_is_not_found(public_dir: TempDir) {
        let (status, _) = fetch(&public_dir, "/js/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn missing_index_is_not_found() {
        let empty = tempfile::tempdir().expect("temp dir");
        let (status, _) = fetch(&empty, "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
