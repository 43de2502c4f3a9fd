//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use examhall_api::{AppState, build_app};
use examhall_core::config::{AppConfig, StorageBackend};
use examhall_core::types::{DepartmentId, ExamId, StudentId};
use examhall_database::{MemoryDatabase, RepositorySet, SeedData};
use examhall_entity::student::Student;

const SEED_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/seed.json");

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory database behind the router
    pub db: MemoryDatabase,
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body as JSON
    pub body: Value,
}

impl TestResponse {
    /// The `reason` field of an error body.
    pub fn reason(&self) -> Option<&str> {
        self.body.get("reason").and_then(Value::as_str)
    }
}

fn test_config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Memory;
    config.storage.seed_file = Some(SEED_FILE.to_string());
    config.allotment.shuffle_seed = Some(seed);
    config
}

impl TestApp {
    /// Create a test application over the seed fixture
    pub async fn new() -> Self {
        Self::with_seed(42).await
    }

    /// Create a test application with a specific shuffle seed
    pub async fn with_seed(seed: u64) -> Self {
        let db = MemoryDatabase::load_seed_file(SEED_FILE)
            .await
            .expect("Failed to load seed file");
        Self::from_db(db, seed)
    }

    /// Create a test application whose staff directory is empty
    pub async fn without_staff() -> Self {
        let raw = tokio::fs::read_to_string(SEED_FILE)
            .await
            .expect("Failed to read seed file");
        let mut seed: SeedData = serde_json::from_str(&raw).expect("Failed to parse seed file");
        seed.staff.clear();
        Self::from_db(MemoryDatabase::from_seed(seed), 42)
    }

    fn from_db(db: MemoryDatabase, seed: u64) -> Self {
        let state = AppState::new(test_config(seed), RepositorySet::memory(db.clone()), None);
        Self {
            router: build_app(state),
            db,
        }
    }

    /// Register students for an exam, creating them as needed
    pub async fn register(&self, exam_id: i32, students: &[(&str, i32)]) {
        for &(id, department) in students {
            self.db
                .insert_student(Student {
                    student_id: StudentId::from(id),
                    student_name: format!("Student {id}"),
                    department_id: DepartmentId(department),
                })
                .await;
            self.db.register(ExamId(exam_id), StudentId::from(id)).await;
        }
    }

    /// Register `count` students for an exam, cycling through departments 1 to 3
    pub async fn register_many(&self, exam_id: i32, count: usize) -> Vec<String> {
        let ids: Vec<String> = (0..count).map(|i| format!("21CS{i:03}")).collect();
        let students: Vec<(&str, i32)> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), (i % 3) as i32 + 1))
            .collect();
        self.register(exam_id, &students).await;
        ids
    }

    /// POST /api/allotments
    pub async fn generate(&self, body: Value) -> TestResponse {
        self.request("POST", "/api/allotments", Some(body)).await
    }

    /// GET /api/allotments/{exam_id}
    pub async fn find(&self, exam_id: i32) -> TestResponse {
        self.request("GET", &format!("/api/allotments/{exam_id}"), None)
            .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.raw_request(method, path, body_str).await
    }

    /// Make an HTTP request with a raw body
    pub async fn raw_request(&self, method: &str, path: &str, body: String) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
