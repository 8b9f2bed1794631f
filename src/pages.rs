//! Delivery of the web front end: HTML pages, the PWA manifest, the service
//! worker and static files.
//!
//! The files are produced elsewhere and are sent exactly as they are on disk.

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::{AppState, endpoints};

/// Routes serving the files under `asset_dir`, laid out as:
///
/// ```text
/// asset_dir/
/// ├── manifest.json
/// ├── service-worker.js
/// ├── static/
/// └── templates/
///     ├── index.html
///     ├── login.html
///     └── operaciones.html
/// ```
pub fn page_routes(asset_dir: &Path) -> Router<AppState> {
    let templates = asset_dir.join("templates");

    Router::new()
        .route_service(endpoints::ROOT, ServeFile::new(templates.join("index.html")))
        .route_service(
            endpoints::LOG_IN_VIEW,
            ServeFile::new(templates.join("login.html")),
        )
        .route_service(
            endpoints::OPERATIONS_VIEW,
            ServeFile::new(templates.join("operaciones.html")),
        )
        .route_service(
            endpoints::MANIFEST,
            ServeFile::new(asset_dir.join("manifest.json")),
        )
        .route_service(
            endpoints::SERVICE_WORKER,
            ServeFile::new(asset_dir.join("service-worker.js")),
        )
        .nest_service(endpoints::STATIC, ServeDir::new(asset_dir.join("static")))
}
