//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    backup::{export_backup_endpoint, import_backup_endpoint},
    endpoints,
    not_found::get_404_not_found,
    operation::{
        create_operation_endpoint, delete_operation_endpoint, edit_operation_endpoint,
        list_operations_endpoint,
    },
    pages::page_routes,
};

/// Return a router with all the app's routes.
///
/// Requests from any origin are allowed so the front end can be hosted separately.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            endpoints::OPERATIONS_API,
            get(list_operations_endpoint).post(create_operation_endpoint),
        )
        .route(
            endpoints::OPERATION,
            put(edit_operation_endpoint).delete(delete_operation_endpoint),
        )
        .route(endpoints::BACKUP_EXPORT, get(export_backup_endpoint))
        .route(endpoints::BACKUP_IMPORT, post(import_backup_endpoint));

    api_routes
        .merge(page_routes(&state.asset_dir))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        build_router,
        endpoints::{self, format_endpoint},
        operation::{DEFAULT_STATUS, DELETED_STATUS, Operation},
        test_utils::must_create_test_state,
    };

    fn must_create_test_server() -> (tempfile::TempDir, TestServer) {
        let (dir, state) = must_create_test_state();
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        (dir, server)
    }

    #[tokio::test]
    async fn create_then_list() {
        let (_dir, server) = must_create_test_server();

        let response = server
            .post(endpoints::OPERATIONS_API)
            .json(&json!({"tipo": "Compra", "cliente": "Ana", "importe": 100.0, "usdt": 98.5}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["message"], "Operación añadida");
        let id = created["id"].as_i64().expect("id should be an integer");

        let operations: Vec<Operation> = server.get(endpoints::OPERATIONS_API).await.json();
        assert_eq!(operations.len(), 1);
        let first = &operations[0];
        assert_eq!(first.id, id);
        assert_eq!(first.tipo, "Compra");
        assert_eq!(first.cliente, "Ana");
        assert_eq!(first.importe, 100.0);
        assert_eq!(first.usdt, 98.5);
        assert_eq!(first.estado, DEFAULT_STATUS);
    }

    #[tokio::test]
    async fn update_and_delete_by_id() {
        let (_dir, server) = must_create_test_server();
        let created: Value = server
            .post(endpoints::OPERATIONS_API)
            .json(&json!({"tipo": "Compra", "cliente": "Ana", "importe": 1, "usdt": 1}))
            .await
            .json();
        let id = created["id"].as_i64().unwrap();
        let path = format_endpoint(endpoints::OPERATION, id);

        server
            .put(&path)
            .json(&json!({"tipo": "Venta", "cliente": "Ana", "importe": 2, "usdt": 2, "estado": "Pendiente"}))
            .await
            .assert_json(&json!({"message": format!("Operación {id} actualizada")}));
        server
            .delete(&path)
            .await
            .assert_json(&json!({"message": format!("Operación {id} marcada como eliminada")}));

        let operations: Vec<Operation> = server.get(endpoints::OPERATIONS_API).await.json();
        assert_eq!(operations[0].tipo, "Venta");
        assert_eq!(operations[0].estado, DELETED_STATUS);
    }

    #[tokio::test]
    async fn export_then_import_round_trip() {
        let (_dir, server) = must_create_test_server();
        server
            .post(endpoints::OPERATIONS_API)
            .json(&json!({"tipo": "Compra", "cliente": "Ana", "importe": 10, "usdt": 9.5}))
            .await
            .assert_status(StatusCode::CREATED);

        let exported: Value = server.get(endpoints::BACKUP_EXPORT).await.json();
        assert_eq!(exported.as_array().map(Vec::len), Some(1));

        server
            .post(endpoints::BACKUP_IMPORT)
            .json(&json!({"operaciones": exported}))
            .await
            .assert_json(&json!({"message": "Backup importado"}));

        let operations: Vec<Operation> = server.get(endpoints::OPERATIONS_API).await.json();
        assert_eq!(operations.len(), 2);
        assert_ne!(operations[0].id, operations[1].id);
        for operation in &operations {
            assert_eq!(operation.tipo, "Compra");
            assert_eq!(operation.cliente, "Ana");
            assert_eq!(operation.importe, 10.0);
            assert_eq!(operation.usdt, 9.5);
            assert_eq!(operation.estado, DEFAULT_STATUS);
        }
    }

    #[tokio::test]
    async fn non_numeric_amount_is_bad_request() {
        let (_dir, server) = must_create_test_server();

        let response = server
            .post(endpoints::OPERATIONS_API)
            .json(&json!({"tipo": "Compra", "importe": "mucho"}))
            .expect_failure()
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (_dir, server) = must_create_test_server();

        let response = server
            .post(endpoints::BACKUP_IMPORT)
            .text("{not json")
            .content_type("application/json")
            .expect_failure()
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let (_dir, server) = must_create_test_server();

        let response = server.get("/api/nada").expect_failure().await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn non_integer_id_is_json_not_found() {
        let (_dir, server) = must_create_test_server();

        let update = server
            .put("/api/operaciones/abc")
            .json(&json!({"tipo": "Compra"}))
            .expect_failure()
            .await;
        let delete = server
            .delete("/api/operaciones/abc")
            .expect_failure()
            .await;

        for response in [update, delete] {
            response.assert_status_not_found();
            let body: Value = response.json();
            assert!(body["message"].is_string());
        }
    }
}
