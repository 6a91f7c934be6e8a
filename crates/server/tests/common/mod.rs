use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use classroom_core::domain::{Caller, CourseId, Role};
use classroom_server::{
    api::{AppState, create_router},
    config::ServerConfig,
    db::connect_and_migrate,
    entity::course,
    repository::{NewUser, SeaOrmUserRepository, UserRecord, UserRepository},
    session::JwtSessions,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret";
pub const MAX_UPLOAD_BYTES: usize = 4096;
const BOUNDARY: &str = "classroom-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    sessions: JwtSessions,
}

/// A seeded user plus a bearer token for them.
pub struct Account {
    pub user: UserRecord,
    pub token: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let upload_dir = std::env::temp_dir().join(format!("classroom-it-{}", uuid::Uuid::new_v4()));
        let config = ServerConfig::from_str(&format!(
            r#"
database_url = "sqlite::memory:"
public_base_url = "https://lms.example.edu"
upload_dir = "{}"
session_secret = "{SECRET}"
max_upload_bytes = {MAX_UPLOAD_BYTES}
"#,
            upload_dir.display()
        ))
        .expect("test config should parse");

        let db = connect_and_migrate(&config.database_url)
            .await
            .expect("in-memory database should migrate");
        let state = Arc::new(AppState::from_config(config, db.clone()));

        Self {
            router: create_router(state),
            db,
            sessions: JwtSessions::new(SECRET, 1),
        }
    }

    pub async fn account(&self, name: &str, email: &str, role: Role) -> Account {
        let user = SeaOrmUserRepository::new(self.db.clone())
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                role,
            })
            .await
            .expect("user should be created");
        let token = self
            .sessions
            .issue(Caller::new(user.id, user.role))
            .expect("token should be issued");

        Account { user, token }
    }

    /// Inserts a course with a chosen id, bypassing the API.
    pub async fn course_with_id(&self, id: &str, name: &str, teacher: &Account) -> CourseId {
        let now = Utc::now().naive_utc();
        course::ActiveModel {
            id: Set(id.to_string()),
            name: Set(name.to_string()),
            description: Set(None),
            thumbnail: Set(None),
            teacher_id: Set(teacher.user.id.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .expect("course should be inserted");

        id.parse().expect("course id should be a uuid")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let (status, bytes) = self.dispatch(request).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be json")
        };

        (status, json)
    }

    /// Posts a multipart form with one part per `(field, file name, content type, bytes)`.
    pub async fn upload(
        &self,
        uri: &str,
        account: &Account,
        parts: &[(&str, &str, &str, &[u8])],
    ) -> (StatusCode, Value) {
        let mut body = Vec::new();
        for (field, file_name, content_type, bytes) in parts {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", account.token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request should build");

        let (status, bytes) = self.dispatch(request).await;
        let json = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        });

        (status, json)
    }

    /// Fetches a path without a session and returns the raw body.
    pub async fn fetch(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request should build");
        let (status, bytes) = self.dispatch(request).await;
        (status, bytes.to_vec())
    }

    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, axum::body::Bytes) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router should respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        (status, bytes)
    }

    pub async fn get(&self, uri: &str, account: &Account) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(&account.token), None).await
    }

    pub async fn post(&self, uri: &str, account: &Account, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(&account.token), Some(body))
            .await
    }
}
