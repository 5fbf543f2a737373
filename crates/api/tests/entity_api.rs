//! HTTP-level integration tests for users, condominiums and TVs.
//!
//! Uses `tower::ServiceExt` to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_condominium, create_id, create_manager, delete, get, post_empty, post_json,
    put_json,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_applies_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users",
        json!({"name": "Joana", "email": "joana@example.com"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "manager");
    assert_eq!(json["data"]["notice_limit"], 10);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_rejects_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users",
        json!({"name": "Joana", "email": "not-an-email"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_email_returns_409(pool: PgPool) {
    create_manager(&pool, "same@example.com", 10).await;
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users",
        json!({"name": "Other", "email": "same@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users_by_role(pool: PgPool) {
    create_manager(&pool, "m@example.com", 10).await;
    create_id(
        &pool,
        "/api/v1/users",
        json!({"name": "Admin", "email": "a@example.com", "role": "admin"}),
    )
    .await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/users?role=admin").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["email"], "a@example.com");

    let response = get(common::build_test_app(pool), "/api/v1/users?role=owner").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_and_delete_user(pool: PgPool) {
    let id = create_manager(&pool, "u@example.com", 10).await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/users/{id}"),
        json!({"notice_limit": 2}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["notice_limit"], 2);

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/users/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &format!("/api/v1/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Condominiums
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_condominium_cep_is_normalized_and_formatted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/condominiums",
        json!({"name": "Solar", "cep": "01.310-100", "location": "Rua A, 10"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["cep"], "01310-100");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_condominium_bad_cep_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/condominiums",
        json!({"name": "Solar", "cep": "1234", "location": "Rua A, 10"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_condominium_unknown_manager_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/condominiums",
        json!({"name": "Solar", "cep": "01310100", "location": "Rua A", "manager_id": 999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_condominium_list_and_detail(pool: PgPool) {
    let manager_id = create_manager(&pool, "sindico@example.com", 10).await;
    let condo_id = create_id(
        &pool,
        "/api/v1/condominiums",
        json!({"name": "Solar", "cep": "01310100", "location": "Rua A", "manager_id": manager_id}),
    )
    .await;
    create_id(
        &pool,
        "/api/v1/tvs",
        json!({"condominium_id": condo_id, "name": "Lobby"}),
    )
    .await;
    create_id(
        &pool,
        "/api/v1/ads",
        json!({
            "name": "Promo",
            "advertiser_name": "Padaria",
            "advertiser_phone": "11999990000",
            "condominium_ids": condo_id.to_string(),
            "expires_on": "2025-12-31"
        }),
    )
    .await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/condominiums").await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["tv_count"], 1);
    assert_eq!(json["data"][0]["cep"], "01310-100");

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/condominiums/{condo_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["condominium"]["name"], "Solar");
    assert_eq!(json["data"]["manager"]["id"], manager_id);
    assert_eq!(json["data"]["tvs"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["ads"][0]["status"], "active");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_condominiums_of_manager(pool: PgPool) {
    let manager_id = create_manager(&pool, "sindico@example.com", 10).await;
    for name in ["Solar", "Lunar"] {
        create_id(
            &pool,
            "/api/v1/condominiums",
            json!({"name": name, "cep": "01310100", "location": "Rua A", "manager_id": manager_id}),
        )
        .await;
    }
    create_condominium(&pool, "Unmanaged").await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/users/{manager_id}/condominiums"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Lunar", "Solar"]);
    assert_eq!(json["data"][0]["cep"], "01310-100");

    let response = get(
        common::build_test_app(pool),
        "/api/v1/users/424242/condominiums",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deleting_condominium_removes_its_tvs(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let tv_id = create_id(
        &pool,
        "/api/v1/tvs",
        json!({"condominium_id": condo_id, "name": "Lobby"}),
    )
    .await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/condominiums/{condo_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &format!("/api/v1/tvs/{tv_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// TVs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_tv_applies_defaults(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/tvs",
        json!({"condominium_id": condo_id, "name": "Lobby"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let tv = &json["data"];
    assert_eq!(tv["template"], "Template 1");
    assert_eq!(tv["connectivity"], "offline");
    assert_eq!(tv["notice_quota"], 1);
    assert_eq!(tv["ad_quota"], 5);
    assert_eq!(tv["news_quota"], 3);

    let code: u32 = tv["connection_code"].as_str().unwrap().parse().unwrap();
    assert!((10_000..=99_999).contains(&code));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_tv_for_missing_condominium_returns_404(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/tvs",
        json!({"condominium_id": 777, "name": "Lobby"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_tv_code_rules(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/tvs",
        json!({"condominium_id": condo_id, "name": "A", "connection_code": "12ab5"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    create_id(
        &pool,
        "/api/v1/tvs",
        json!({"condominium_id": condo_id, "name": "A", "connection_code": "54321"}),
    )
    .await;
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/tvs",
        json!({"condominium_id": condo_id, "name": "B", "connection_code": "54321"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_regenerate_connection_code(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let tv_id = create_id(
        &pool,
        "/api/v1/tvs",
        json!({"condominium_id": condo_id, "name": "Lobby", "connection_code": "11111"}),
    )
    .await;

    let response = post_empty(
        common::build_test_app(pool),
        &format!("/api/v1/tvs/{tv_id}/connection-code"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let code = json["data"]["connection_code"].as_str().unwrap();
    assert_eq!(code.len(), 5);
    assert_ne!(code, "11111");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_tvs_by_condominium(pool: PgPool) {
    let a = create_condominium(&pool, "A").await;
    let b = create_condominium(&pool, "B").await;
    for (condo, name) in [(a, "A1"), (a, "A2"), (b, "B1")] {
        create_id(
            &pool,
            "/api/v1/tvs",
            json!({"condominium_id": condo, "name": name}),
        )
        .await;
    }

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tvs?condominium_id={a}"),
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = get(common::build_test_app(pool), "/api/v1/tvs").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_tv_template(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let tv_id = create_id(
        &pool,
        "/api/v1/tvs",
        json!({"condominium_id": condo_id, "name": "Lobby"}),
    )
    .await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tvs/{tv_id}"),
        json!({"template": "Template 2", "connectivity": "online"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["template"], "Template 2");
    assert_eq!(json["data"]["connectivity"], "online");

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/tvs/{tv_id}"),
        json!({"template": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
