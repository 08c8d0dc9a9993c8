//! Shared fixtures: the full router over in-memory stores.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use axum_extra::extract::cookie::Key;
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use auth_service_lib::service::Authenticator;
use auth_service_lib::session::{MemorySessionStore, SessionManager};
use common::{AppError, AppResult};
use domain::{NewUser, Product, ProductDraft, User};
use gateway_lib::config::GatewayConfig;
use gateway_lib::probes::HealthProbe;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;
use store_service_lib::repository::{ProductRepository, UserRepository};
use store_service_lib::service::{CatalogManager, UserManager};

pub const SECRET: &str = "integration-test-session-secret-0123456789";

/// Credential store with the same uniqueness rule as the database.
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Email"));
        }
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            surname: user.surname,
            role: user.role,
            created_at: Utc::now(),
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct InMemoryProducts {
    rows: Mutex<Vec<Product>>,
}

impl InMemoryProducts {
    pub fn all(&self) -> Vec<Product> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn list(&self) -> AppResult<Vec<Product>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = Product {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            created_at: Utc::now(),
        };
        rows.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, draft: ProductDraft) -> AppResult<Product> {
        let mut rows = self.rows.lock().unwrap();
        let product = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        product.name = draft.name;
        product.description = draft.description;
        product.price = draft.price;
        product.stock = draft.stock;
        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUsers>,
    pub products: Arc<InMemoryProducts>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_probes(Vec::new())
    }

    pub fn with_probes(probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let products = Arc::new(InMemoryProducts::default());
        let sessions = SessionManager::new(
            Arc::new(MemorySessionStore::new()),
            std::time::Duration::from_secs(3600),
        );

        let state = AppState::new(
            Arc::new(Authenticator::new(users.clone(), sessions)),
            Arc::new(UserManager::new(users.clone())),
            Arc::new(CatalogManager::new(products.clone())),
            probes,
            Key::derive_from(SECRET.as_bytes()),
            GatewayConfig::default(),
        );

        Self {
            router: create_router(state),
            users,
            products,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn register(&self, email: &str, password: &str, role: &str) {
        let body = format!(
            "user={}&name=Ana&apellidos=Ruiz&rol={}&pass={}",
            email, role, password
        );
        let response = self.post_form("/register", &body, None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    /// Log in and return the `name=value` pair to send back as a cookie.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = format!("email={}&pass={}", email, password);
        let response = self.post_form("/auth", &body, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("login sets a session cookie")
    }

    /// Register a user with the given role and log in as them.
    pub async fn login_as(&self, role: &str) -> String {
        let email = format!("{}@example.com", role);
        self.register(&email, "secret1", role).await;
        self.login(&email, "secret1").await
    }
}

/// The session cookie set by a response, as `name=value`.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(domain::SESSION_COOKIE_NAME))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
