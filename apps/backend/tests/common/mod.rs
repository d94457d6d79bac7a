//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up an in-memory application
//! - Learner header helpers

pub mod fixtures;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use bahasa_backend::routes::{self, learner::LEARNER_HEADER};
use bahasa_backend::AppState;
use bahasa_core::{MorphologyContext, StudySettings};

/// Test context holding the shared state and router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Fresh application with the built-in dictionary and default settings.
    pub fn new() -> Self {
        Self::with_settings(StudySettings::default())
    }

    pub fn with_settings(settings: StudySettings) -> Self {
        let state = AppState::new(MorphologyContext::indonesian(), settings);
        let app = routes::router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Import the standard fixture vocabulary.
    pub async fn seed(&self, server: &TestServer) {
        server
            .post("/api/catalog/import")
            .json(&fixtures::import_request(fixtures::SAMPLE_VOCAB, None))
            .await
            .assert_status_ok();
    }

    /// Learner header name and a value for a new learner.
    pub fn new_learner() -> (HeaderName, HeaderValue) {
        Self::learner_header(Uuid::new_v4())
    }

    pub fn learner_header(id: Uuid) -> (HeaderName, HeaderValue) {
        (
            LEARNER_HEADER,
            HeaderValue::from_str(&id.to_string()).unwrap(),
        )
    }
}
