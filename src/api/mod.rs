//! API layer - REST interface over the core services.
//!
//! Thin HTTP-to-service glue: each handler extracts its input, calls one
//! `core` function, and maps the outcome onto a status code and JSON body.
//! All routes except `/api/auth/login` require a bearer token, enforced by
//! the [`AuthUser`] extractor.

/// Combined archive listing with tagged-variant records
pub mod archive;
/// Login handler and the bearer-token request extractor
pub mod auth;
/// Error-to-response mapping and the `{message, detail}` body
pub mod error;
/// Inventory CRUD and archive handlers
pub mod inventory;
/// Retention-policy maintenance handlers
pub mod maintenance;
/// Requisition CRUD, archive, and purge handlers
pub mod requisition;
/// User management handlers
pub mod users;

use crate::config::{RetentionPolicy, Settings};
use crate::state::StateCell;
use axum::{
    Router,
    routing::{delete, get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared context available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all data access
    pub db: DatabaseConnection,
    /// Immutable application settings
    pub settings: Arc<Settings>,
    /// Runtime-adjustable requisition-archive retention policy.
    /// Single writer: the maintenance endpoint.
    pub retention: StateCell<RetentionPolicy>,
}

impl AppState {
    /// Builds the application state from a connection and settings.
    #[must_use]
    pub fn new(db: DatabaseConnection, settings: Settings) -> Self {
        let retention = StateCell::new(settings.retention_policy());
        Self {
            db,
            settings: Arc::new(settings),
            retention,
        }
    }
}

/// Builds the complete application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/inventory",
            get(inventory::list_items).post(inventory::create_item),
        )
        .route("/api/inventory/bulk-archive", post(inventory::bulk_archive))
        .route("/api/inventory/archive", get(inventory::list_archive))
        .route(
            "/api/inventory/archive/:id",
            delete(inventory::delete_archive_entry),
        )
        .route(
            "/api/inventory/:id",
            get(inventory::get_item)
                .put(inventory::update_item)
                .delete(inventory::archive_item),
        )
        .route(
            "/api/Requisition",
            get(requisition::search_forms).post(requisition::create_form),
        )
        .route(
            "/api/Requisition/bulk-archive",
            post(requisition::bulk_archive),
        )
        .route("/api/Requisition/archive", get(requisition::list_archive))
        .route(
            "/api/Requisition/archive/purge",
            post(requisition::purge_archive),
        )
        .route(
            "/api/Requisition/archive/:id",
            delete(requisition::delete_archive_entry),
        )
        .route(
            "/api/Requisition/:id",
            get(requisition::get_form)
                .put(requisition::update_form)
                .delete(requisition::archive_form),
        )
        .route("/api/archive", get(archive::list_combined))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/bulk-delete", post(users::bulk_delete))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/maintenance/retention",
            get(maintenance::get_retention).put(maintenance::put_retention),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::user;
    use crate::test_utils::{setup_test_db, test_user_input};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Builds an app with one seeded user ("admin") and logs in.
    async fn setup_app() -> (Router, String) {
        let db = setup_test_db().await.unwrap();
        let mut input = test_user_input("admin");
        input.role = "Admin".to_string();
        user::create_user(&db, input).await.unwrap();

        let app = router(AppState::new(db, Settings::default()));
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": "admin", "password": "correct-horse"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let token = body["token"].as_str().unwrap().to_string();
        (app, token)
    }

    fn laptop_body() -> Value {
        json!({
            "name": "Laptop",
            "category": "electronics",
            "quantity": 5,
            "unit": "pcs",
            "location": "Main store",
            "status": "available",
            "stockThreshold": 10
        })
    }

    #[tokio::test]
    async fn test_login_returns_token_and_user() {
        let (_, token) = setup_app().await;
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_401() {
        let (app, _) = setup_app().await;
        let response = app
            .oneshot(request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": "admin", "password": "wrong"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert!(body.get("token").is_none());
        assert_eq!(body["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_login_user_payload_has_no_hash() {
        let db = setup_test_db().await.unwrap();
        user::create_user(&db, test_user_input("admin"))
            .await
            .unwrap();
        let app = router(AppState::new(db, Settings::default()));

        let response = app
            .oneshot(request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": "admin", "password": "correct-horse"})),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["user"]["username"], "admin");
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let (app, _) = setup_app().await;

        let response = app
            .clone()
            .oneshot(request("GET", "/api/inventory", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(request("GET", "/api/inventory", Some("not-a-token"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_inventory_lifecycle_scenario() {
        let (app, token) = setup_app().await;
        let token = token.as_str();

        // Create: generated id, retrievable immediately
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/inventory",
                Some(token),
                Some(laptop_body()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["name"], "Laptop");

        let response = app
            .clone()
            .oneshot(request("GET", "/api/inventory", Some(token), None))
            .await
            .unwrap();
        let list = body_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        // Archive with reason "damaged"
        let response = app
            .clone()
            .oneshot(request(
                "DELETE",
                &format!("/api/inventory/{id}"),
                Some(token),
                Some(json!({"reason": "damaged"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Gone from active, present in archive with metadata
        let response = app
            .clone()
            .oneshot(request(
                "GET",
                &format!("/api/inventory/{id}"),
                Some(token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(request("GET", "/api/inventory/archive", Some(token), None))
            .await
            .unwrap();
        let archive = body_json(response).await;
        let entries = archive.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["archivedReason"], "damaged");
        assert_eq!(entries[0]["archivedBy"], "admin");
        assert_eq!(entries[0]["itemId"], id);
        let archive_id = entries[0]["id"].as_i64().unwrap();

        // Hard delete the archive entry
        let response = app
            .clone()
            .oneshot(request(
                "DELETE",
                &format!("/api/inventory/archive/{archive_id}"),
                Some(token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(request("GET", "/api/inventory/archive", Some(token), None))
            .await
            .unwrap();
        assert!(body_json(response).await.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_item_validation_is_400() {
        let (app, token) = setup_app().await;
        let mut body = laptop_body();
        body["quantity"] = json!(-2);

        let response = app
            .oneshot(request("POST", "/api/inventory", Some(&token), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Validation failed");
    }

    #[tokio::test]
    async fn test_duplicate_user_is_409() {
        let (app, token) = setup_app().await;
        let body = json!({
            "username": "Admin",
            "email": "second@example.com",
            "password": "long-enough-pw",
            "role": "Manager",
            "fullName": "Second Admin"
        });

        let response = app
            .oneshot(request("POST", "/api/users", Some(&token), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_requisition_update_missing_is_404() {
        let (app, token) = setup_app().await;
        let body = json!({
            "requester": "Alice",
            "department": "IT",
            "purpose": "Cables"
        });

        let response = app
            .oneshot(request(
                "PUT",
                "/api/Requisition/REQ-00000000-deadbeef",
                Some(&token),
                Some(body),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_combined_archive_is_tagged() {
        let (app, token) = setup_app().await;
        let token = token.as_str();

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/inventory",
                Some(token),
                Some(laptop_body()),
            ))
            .await
            .unwrap();
        let item_id = body_json(response).await["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/Requisition",
                Some(token),
                Some(json!({"requester": "Alice", "department": "IT", "purpose": "Cables"})),
            ))
            .await
            .unwrap();
        let form_id = body_json(response).await["id"].as_str().unwrap().to_string();

        let archive_body = Some(json!({"reason": "cleanup"}));
        app.clone()
            .oneshot(request(
                "DELETE",
                &format!("/api/inventory/{item_id}"),
                Some(token),
                archive_body.clone(),
            ))
            .await
            .unwrap();
        app.clone()
            .oneshot(request(
                "DELETE",
                &format!("/api/Requisition/{form_id}"),
                Some(token),
                archive_body,
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(request("GET", "/api/archive", Some(token), None))
            .await
            .unwrap();
        let records = body_json(response).await;
        let kinds: Vec<&str> = records
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&"inventory"));
        assert!(kinds.contains(&"requisition"));
    }

    #[tokio::test]
    async fn test_retention_roundtrip_and_validation() {
        let (app, token) = setup_app().await;
        let token = token.as_str();

        let response = app
            .clone()
            .oneshot(request("GET", "/api/maintenance/retention", Some(token), None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["days"], 365);

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/api/maintenance/retention",
                Some(token),
                Some(json!({"days": 30})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(request("GET", "/api/maintenance/retention", Some(token), None))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["days"], 30);

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/api/maintenance/retention",
                Some(token),
                Some(json!({"days": 0})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Values past the validated range would overflow the cutoff math
        let response = app
            .oneshot(request(
                "PUT",
                "/api/maintenance/retention",
                Some(token),
                Some(json!({"days": i64::MAX})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_body_keeps_error_shape() {
        let (app, token) = setup_app().await;

        // DELETE requires a JSON reason body; sending none must still
        // produce the standard {message, detail} JSON error
        let response = app
            .oneshot(request("DELETE", "/api/inventory/1", Some(&token), None))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
        let body = body_json(response).await;
        assert_eq!(body["message"], "Malformed request body");
        assert!(body["detail"].is_string());
    }
}
