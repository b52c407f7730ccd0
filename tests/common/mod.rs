#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::{TestResponse, TestServer};
use chrono::Utc;
use jtrac::application::services::{AuthService, PasswordEncoder};
use jtrac::domain::entities::{NewUser, User};
use jtrac::domain::repositories::UserRepository;
use jtrac::error::AppError;
use jtrac::infrastructure::session::{SessionBackend, session_layer};
use jtrac::state::AppState;
use jtrac::web::messages::Localizer;
use jtrac::web::routes::{protected_routes, public_routes};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_sessions::MemoryStore;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Idle timeout used unless a test needs a short one.
pub const DEFAULT_IDLE_TIMEOUT: time::Duration = time::Duration::minutes(30);

/// Process-local user store standing in for PostgreSQL.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    healthy: bool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            healthy: true,
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            healthy: false,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_login_name(&self, login_name: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.login_name == login_name).cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.login_name == user.login_name) {
            return Err(AppError::conflict("Login name taken", serde_json::json!({})));
        }

        let created = User {
            id: users.len() as i64 + 1,
            login_name: user.login_name.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().await.clone())
    }

    async fn update_password(
        &self,
        login_name: &str,
        encoded_password: &str,
    ) -> Result<bool, AppError> {
        let mut users = self.users.lock().await;
        match users.iter_mut().find(|u| u.login_name == login_name) {
            Some(user) => {
                user.password = encoded_password.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

/// User store whose every lookup fails, as when the database is down.
pub struct FailingUserRepository;

fn store_down() -> AppError {
    AppError::internal("Database error", serde_json::json!({}))
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn find_by_login_name(&self, _login_name: &str) -> Result<Option<User>, AppError> {
        Err(store_down())
    }

    async fn create_user(&self, _user: &NewUser) -> Result<User, AppError> {
        Err(store_down())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Err(store_down())
    }

    async fn update_password(
        &self,
        _login_name: &str,
        _encoded_password: &str,
    ) -> Result<bool, AppError> {
        Err(store_down())
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn encode(password: &str) -> String {
    PasswordEncoder::new(TEST_SECRET).encode(password)
}

/// State backed by in-memory users and sessions.
pub fn create_test_state(repository: impl UserRepository + 'static) -> AppState {
    let repository: Arc<dyn UserRepository> = Arc::new(repository);
    let auth_service = Arc::new(AuthService::new(
        repository,
        PasswordEncoder::new(TEST_SECRET),
    ));

    AppState::new(
        auth_service,
        SessionBackend::Memory(MemoryStore::default()),
        Arc::new(Localizer::default()),
        false,
    )
}

/// State with a single user `alice` whose password is `pw1`.
pub async fn create_state_with_alice() -> AppState {
    let repository = InMemoryUserRepository::new();
    repository
        .create_user(&NewUser {
            login_name: "alice".to_string(),
            name: "Alice".to_string(),
            email: None,
            password: encode("pw1"),
        })
        .await
        .unwrap();
    create_test_state(repository)
}

/// Web routes wired as in production, minus rate limiting (which needs the
/// peer address) and static files.
pub fn create_test_app(state: AppState, idle_timeout: time::Duration) -> Router {
    let sessions = session_layer(state.sessions.clone(), idle_timeout, false);

    Router::new()
        .merge(protected_routes())
        .merge(public_routes())
        .with_state(state)
        .layer(sessions)
}

pub async fn create_test_server() -> TestServer {
    create_test_server_with_idle_timeout(DEFAULT_IDLE_TIMEOUT).await
}

pub async fn create_test_server_with_idle_timeout(idle_timeout: time::Duration) -> TestServer {
    let state = create_state_with_alice().await;
    TestServer::new(create_test_app(state, idle_timeout)).unwrap()
}

/// Server whose user store is unreachable.
pub fn create_failing_test_server() -> TestServer {
    let state = create_test_state(FailingUserRepository);
    TestServer::new(create_test_app(state, DEFAULT_IDLE_TIMEOUT)).unwrap()
}

/// All `Set-Cookie` headers of a response.
pub fn set_cookies(response: &TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// The `Set-Cookie` header for `name`, if the response sets it.
pub fn set_cookie_named(response: &TestResponse, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&prefix))
}

/// The value part of the `Set-Cookie` header for `name`.
pub fn cookie_value(response: &TestResponse, name: &str) -> Option<String> {
    let header = set_cookie_named(response, name)?;
    let (pair, _) = header.split_once(';').unwrap_or((&header, ""));
    pair.split_once('=').map(|(_, v)| v.to_string())
}

pub fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
