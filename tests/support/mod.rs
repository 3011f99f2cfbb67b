#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use project_catalog::api::{self, AppState};
use project_catalog::db::Database;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub db: Database,
    pub router: Router,
    _dir: TempDir,
}

/// Fresh SQLite file in a temp dir, initialized with the seed rows.
pub async fn seeded_app() -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("catalog.db").display());
    let db = Database::connect(&url).await.expect("connect");
    db.initialize().await.expect("initialize");

    let router = api::router(AppState::new(db.clone()));
    TestApp {
        db,
        router,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&bytes).expect("json body");
        (status, json)
    }

    pub async fn set_status(&self, id: i64, status: &str) {
        sqlx::query("UPDATE projects SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(self.db.get_pool())
            .await
            .expect("update status");
    }
}

pub fn ids(body: &Value) -> Vec<i64> {
    body["projetos"]
        .as_array()
        .expect("projetos array")
        .iter()
        .map(|p| p["id"].as_i64().expect("id"))
        .collect()
}
