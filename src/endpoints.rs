//! The route URIs served by the application.
//!
//! For endpoints that take a parameter, e.g., '/api/operaciones/{operation_id}', use [format_endpoint].

/// The landing page.
pub const ROOT: &str = "/";
/// The log in page.
pub const LOG_IN_VIEW: &str = "/login";
/// The page for managing operations.
pub const OPERATIONS_VIEW: &str = "/operaciones";
/// The web app manifest.
pub const MANIFEST: &str = "/manifest.json";
/// The service worker script.
pub const SERVICE_WORKER: &str = "/service-worker.js";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to list and create operations.
pub const OPERATIONS_API: &str = "/api/operaciones";
/// The route to update or soft-delete a single operation.
pub const OPERATION: &str = "/api/operaciones/{operation_id}";
/// The route to download every stored row as a backup.
pub const BACKUP_EXPORT: &str = "/api/backup/export";
/// The route to restore a backup.
pub const BACKUP_IMPORT: &str = "/api/backup/import";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace and ends with a right brace.
/// For example, in the endpoint path '/api/operaciones/{operation_id}', '{operation_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
