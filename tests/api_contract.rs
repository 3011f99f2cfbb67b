mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::{ids, seeded_app};

#[tokio::test]
async fn status_reports_online_with_counts() {
    let app = seeded_app().await;

    let (status, body) = app.get("/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["database"], "SQLite");
    assert_eq!(body["projetos_total"], 12);
    assert_eq!(
        body["estatisticas"],
        json!({"comercial": 4, "publico": 4, "secreto": 4})
    );
    assert!(body["mensagem"].is_string());
}

#[tokio::test]
async fn status_counts_inactive_rows_while_listing_hides_them() {
    let app = seeded_app().await;
    app.set_status(6, "inativo").await;

    let (_, status) = app.get("/api/status").await;
    assert_eq!(status["projetos_total"], 12);
    assert_eq!(status["estatisticas"]["secreto"], 4);

    let (_, listed) = app.get("/api/projetos?tipo=secreto").await;
    assert_eq!(listed["count"], 3);
}

#[tokio::test]
async fn list_defaults_to_every_active_project() {
    let app = seeded_app().await;
    app.set_status(2, "inativo").await;

    let (status, body) = app.get("/api/projetos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 11);
    assert!(!ids(&body).contains(&2));

    let (_, explicit) = app.get("/api/projetos?tipo=all").await;
    assert_eq!(ids(&explicit), ids(&body));
}

#[tokio::test]
async fn list_by_category_matches_both_predicates() {
    let app = seeded_app().await;
    app.set_status(1, "inativo").await;

    let (_, body) = app.get("/api/projetos?tipo=comercial").await;
    assert_eq!(body["count"], 3);
    for project in body["projetos"].as_array().expect("array") {
        assert_eq!(project["tipo"], "comercial");
        assert_eq!(project["status"], "ativo");
    }
}

#[tokio::test]
async fn unknown_category_is_an_empty_success() {
    let app = seeded_app().await;

    let (status, body) = app.get("/api/projetos?tipo=militar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "count": 0, "projetos": []}));
}

#[tokio::test]
async fn todos_and_empty_category_are_exact_tags() {
    let app = seeded_app().await;
    let payload = r#"{"nome":"Arquivo Geral","descricao":"Rótulo literal","tipo":"todos","nivel_acesso":"publico"}"#;
    let (status, created) = app.post_json("/api/projetos", payload).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["projeto"]["id"].as_i64().expect("id");

    let (status, todos) = app.get("/api/projetos?tipo=todos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&todos), vec![id]);
    assert_eq!(todos["count"], 1);

    let (status, empty) = app.get("/api/projetos?tipo=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["count"], 0);
    assert!(ids(&empty).is_empty());

    let (_, all) = app.get("/api/projetos?tipo=all").await;
    assert_eq!(all["count"], 13);
}

#[tokio::test]
async fn empty_search_matches_full_listing() {
    let app = seeded_app().await;
    app.set_status(9, "inativo").await;

    let (_, searched) = app.get("/api/projetos/buscar?termo=").await;
    let (_, without_term) = app.get("/api/projetos/buscar").await;
    let (_, listed) = app.get("/api/projetos?tipo=all").await;

    assert_eq!(ids(&searched), ids(&listed));
    assert_eq!(ids(&without_term), ids(&listed));
}

#[tokio::test]
async fn search_matches_name_or_description() {
    let app = seeded_app().await;

    let (_, body) = app.get("/api/projetos/buscar?termo=Gotham").await;
    assert_eq!(body["success"], true);
    let count = body["count"].as_u64().expect("count");
    assert!(count >= 3, "expected several matches, got {count}");
    for project in body["projetos"].as_array().expect("array") {
        let name = project["nome"].as_str().expect("nome");
        let description = project["descricao"].as_str().expect("descricao");
        assert!(name.contains("Gotham") || description.contains("Gotham"));
    }
}

#[tokio::test]
async fn search_without_match_is_an_empty_success() {
    let app = seeded_app().await;

    let (status, body) = app.get("/api/projetos/buscar?termo=Coringa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert_eq!(body["projetos"], json!([]));
}

#[tokio::test]
async fn first_seeded_project_is_served_by_id() {
    let app = seeded_app().await;

    let (status, body) = app.get("/api/projetos/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["projeto"]["id"], 1);
    assert_eq!(body["projeto"]["nome"], "Sistema de Vigilância Urbana GCPD");
}

#[tokio::test]
async fn lookup_ignores_status() {
    let app = seeded_app().await;
    app.set_status(4, "inativo").await;

    let (status, body) = app.get("/api/projetos/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projeto"]["status"], "inativo");
}

#[tokio::test]
async fn missing_id_is_not_found() {
    let app = seeded_app().await;

    let (status, body) = app.get("/api/projetos/13").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let (status, body) = app.get("/api/projetos/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_route_is_a_json_not_found() {
    let app = seeded_app().await;

    let (status, body) = app.get("/api/desconhecido").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn created_project_gets_a_fresh_stable_id() {
    let app = seeded_app().await;

    let payload = r#"{"nome":"Satélite Meteorológico","descricao":"Previsão para a baía de Gotham","tipo":"publico","nivel_acesso":"publico"}"#;
    let (status, created) = app.post_json("/api/projetos", payload).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    let id = created["projeto"]["id"].as_i64().expect("id");
    assert!(id > 12);
    assert_eq!(created["projeto"]["status"], "ativo");

    let (_, second) = app.post_json("/api/projetos", payload).await;
    assert_ne!(second["projeto"]["id"].as_i64().expect("id"), id);

    let (status, fetched) = app.get(&format!("/api/projetos/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["projeto"], created["projeto"]);

    let (_, listed) = app.get("/api/projetos?tipo=publico").await;
    assert!(ids(&listed).contains(&id));
}

#[tokio::test]
async fn schema_violation_is_a_server_error() {
    let app = seeded_app().await;

    let payload = r#"{"nome":"","descricao":"Sem nome","tipo":"publico","nivel_acesso":"publico"}"#;
    let (status, body) = app.post_json("/api/projetos", payload).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().expect("error").contains("CHECK"));
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let app = seeded_app().await;

    let (status, body) = app.post_json("/api/projetos", r#"{"nome": 1}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn store_failure_surfaces_as_error_envelopes() {
    let app = seeded_app().await;
    sqlx::query("DROP TABLE projects")
        .execute(app.db.get_pool())
        .await
        .expect("drop table");

    let (status, body) = app.get("/api/projetos").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().expect("error").contains("no such table"));

    let (status, body) = app.get("/api/status").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert!(body["error"].is_string());
}
