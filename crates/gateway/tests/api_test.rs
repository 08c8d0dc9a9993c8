//! Integration tests for the HTTP surface.
//!
//! These drive the full router with real services over in-memory stores,
//! so no database or Redis is needed.

mod support;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use gateway_lib::probes::HealthProbe;

use support::{body_text, location, session_cookie, TestApp};

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_then_duplicate_is_rejected() {
    let app = TestApp::new();
    app.register("ana@example.com", "secret1", "editor").await;

    let response = app
        .post_form(
            "/register",
            "user=ANA@example.com&name=Ana&apellidos=Ruiz&rol=editor&pass=secret1",
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Ese email ya está registrado"));
    assert_eq!(app.users.count(), 1);
}

#[tokio::test]
async fn test_register_does_not_log_in() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/register",
            "user=ana@example.com&name=Ana&apellidos=Ruiz&rol=admin&pass=secret1",
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert!(body_text(response).await.contains("registrado"));
}

#[tokio::test]
async fn test_register_invalid_fields() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/register",
            "user=ana&name=A&apellidos=Ruiz&rol=root&pass=123",
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("El email debe contener @"));
    assert!(body.contains("El nombre debe tener al menos 2 caracteres"));
    assert!(body.contains("Rol inválido"));
    assert!(body.contains("La contraseña debe tener al menos 6 caracteres"));
    assert_eq!(app.users.count(), 0);
}

// =============================================================================
// Login & logout
// =============================================================================

#[tokio::test]
async fn test_editor_login_redirects_to_editor_page() {
    let app = TestApp::new();
    app.register("ed@example.com", "secret1", "editor").await;

    let response = app
        .post_form("/auth", "email=ED@example.com&pass=secret1", None)
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/editor");
    let cookie = session_cookie(&response).unwrap();

    let page = app.get("/editor", Some(&cookie)).await;
    assert_eq!(page.status(), StatusCode::OK);
    assert!(body_text(page).await.contains("Ana"));
}

#[tokio::test]
async fn test_admin_login_redirects_to_admin_page() {
    let app = TestApp::new();
    app.register("boss@example.com", "secret1", "admin").await;

    let response = app
        .post_form("/auth", "email=boss@example.com&pass=secret1", None)
        .await;

    assert_eq!(location(&response), "/admin");
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::new();
    app.register("ana@example.com", "secret1", "editor").await;

    let wrong_password = app
        .post_form("/auth", "email=ana@example.com&pass=wrong-pass", None)
        .await;
    let unknown_email = app
        .post_form("/auth", "email=nobody@example.com&pass=secret1", None)
        .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&wrong_password).is_none());
    assert!(session_cookie(&unknown_email).is_none());

    let wrong_password = body_text(wrong_password).await;
    let unknown_email = body_text(unknown_email).await;
    assert_eq!(wrong_password, unknown_email);
    assert!(wrong_password.contains("Correo o contraseña incorrectos"));
}

#[tokio::test]
async fn test_login_validation_reports_both_fields() {
    let app = TestApp::new();
    let response = app.post_form("/auth", "email=nope&pass=123", None).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("Introduce un email válido"));
    assert!(body.contains("La contraseña debe tener al menos 6 caracteres"));
}

#[tokio::test]
async fn test_logout_makes_session_anonymous() {
    let app = TestApp::new();
    let cookie = app.login_as("editor").await;

    let response = app.get("/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    // Even replaying the old cookie, the session is gone
    let home = app.get("/", Some(&cookie)).await;
    assert!(body_text(home).await.contains("Invitado"));
    let page = app.get("/editor", Some(&cookie)).await;
    assert_eq!(location(&page), "/login");
}

#[tokio::test]
async fn test_tampered_cookie_is_anonymous() {
    let app = TestApp::new();
    let cookie = app.login_as("admin").await;
    let tampered = format!("{}x", cookie);

    let response = app.get("/admin", Some(&tampered)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

// =============================================================================
// Authorization gate
// =============================================================================

#[tokio::test]
async fn test_anonymous_is_redirected_to_login() {
    let app = TestApp::new();

    for uri in ["/admin", "/editor", "/productos", "/productos/nuevo"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), "/login", "{}", uri);
    }
}

#[tokio::test]
async fn test_editor_on_admin_page_is_forbidden() {
    let app = TestApp::new();
    let cookie = app.login_as("editor").await;

    let response = app.get("/admin", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(response).await, "Prohibido");
}

#[tokio::test]
async fn test_admin_on_editor_page_is_forbidden() {
    let app = TestApp::new();
    let cookie = app.login_as("admin").await;

    let response = app.get("/editor", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Product catalog
// =============================================================================

#[tokio::test]
async fn test_editor_can_list_but_not_create() {
    let app = TestApp::new();
    let cookie = app.login_as("editor").await;

    let list = app.get("/productos", Some(&cookie)).await;
    assert_eq!(list.status(), StatusCode::OK);

    let create = app
        .post_form("/productos", "nombre=Xbox&precio=299&stock=3", Some(&cookie))
        .await;
    assert_eq!(create.status(), StatusCode::FORBIDDEN);
    assert!(app.products.all().is_empty());
}

#[tokio::test]
async fn test_editor_cannot_submit_invalid_product_either() {
    let app = TestApp::new();
    let cookie = app.login_as("editor").await;

    // The gate runs before validation, so this is 403 and not 422
    let create = app
        .post_form("/productos", "nombre=X&precio=-1", Some(&cookie))
        .await;

    assert_eq!(create.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_creates_product() {
    let app = TestApp::new();
    let cookie = app.login_as("admin").await;

    let response = app
        .post_form(
            "/productos",
            "nombre=Xbox&descripcion=Consola&precio=299.90&stock=3",
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/productos");

    let products = app.products.all();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Xbox");
    assert_eq!(products[0].stock, 3);

    let list = app.get("/productos", Some(&cookie)).await;
    assert!(body_text(list).await.contains("Xbox"));
}

#[tokio::test]
async fn test_admin_short_product_name_is_rejected() {
    let app = TestApp::new();
    let cookie = app.login_as("admin").await;

    let response = app
        .post_form("/productos", "nombre=X&precio=10&stock=1", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("Nuevo producto"));
    assert!(body.contains("El nombre debe tener al menos 2 caracteres"));
    assert!(app.products.all().is_empty());
}

#[tokio::test]
async fn test_admin_edits_and_deletes_product() {
    let app = TestApp::new();
    let cookie = app.login_as("admin").await;
    app.post_form("/productos", "nombre=Xbox&precio=299&stock=3", Some(&cookie))
        .await;
    let id = app.products.all()[0].id;

    let form = app
        .get(&format!("/productos/{}/editar", id), Some(&cookie))
        .await;
    assert_eq!(form.status(), StatusCode::OK);
    assert!(body_text(form).await.contains("value=\"Xbox\""));

    let update = app
        .post_form(
            &format!("/productos/{}/editar", id),
            "nombre=Xbox+Series&precio=349&stock=0",
            Some(&cookie),
        )
        .await;
    assert_eq!(update.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.products.all()[0].name, "Xbox Series");

    let delete = app
        .post_form(&format!("/productos/{}/borrar", id), "", Some(&cookie))
        .await;
    assert_eq!(delete.status(), StatusCode::SEE_OTHER);
    assert!(app.products.all().is_empty());
}

#[tokio::test]
async fn test_admin_invalid_update_keeps_product() {
    let app = TestApp::new();
    let cookie = app.login_as("admin").await;
    app.post_form("/productos", "nombre=Xbox&precio=299&stock=3", Some(&cookie))
        .await;
    let id = app.products.all()[0].id;

    let response = app
        .post_form(
            &format!("/productos/{}/editar", id),
            "nombre=Xbox&precio=abc&stock=3",
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("Editar producto"));
    assert!(body.contains(&format!("action=\"/productos/{}/editar\"", id)));
    assert!(body.contains("El precio debe ser un número ≥ 0"));
    assert_eq!(app.products.all()[0].price, 299.0);
}

#[tokio::test]
async fn test_edit_missing_product_is_not_found() {
    let app = TestApp::new();
    let cookie = app.login_as("admin").await;

    let response = app.get("/productos/999/editar", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// JSON endpoints
// =============================================================================

#[tokio::test]
async fn test_user_list_never_contains_hashes() {
    let app = TestApp::new();
    app.register("ana@example.com", "secret1", "editor").await;

    let response = app.get("/usuarios", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("ana@example.com"));
    assert!(!body.contains("password"));
    assert!(!body.contains("$argon2"));
}

#[tokio::test]
async fn test_health_without_probes_is_healthy() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("healthy"));
}

struct UnreachableStore;

#[async_trait]
impl HealthProbe for UnreachableStore {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        Err("Connection Error: tcp connect to 10.0.0.7:5432: Connection refused (os error 111)".to_string())
    }
}

#[tokio::test]
async fn test_health_hides_store_diagnostics() {
    let app = TestApp::with_probes(vec![Arc::new(UnreachableStore)]);

    let response = app.get("/health", None).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_text(response).await;
    assert!(body.contains("degraded"));
    assert!(body.contains("unhealthy"));
    assert!(!body.contains("10.0.0.7"));
    assert!(!body.contains("Connection refused"));
    assert!(!body.contains("error"));
}

#[tokio::test]
async fn test_home_greets_guest() {
    let app = TestApp::new();

    let response = app.get("/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Invitado"));
}
