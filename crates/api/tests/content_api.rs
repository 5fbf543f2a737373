//! HTTP-level tests for ads, notices and the dashboard.
//!
//! The test clock is pinned to 2025-06-15.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_condominium, create_id, create_manager, delete, get, post_json, put_json,
};
use serde_json::json;
use sqlx::PgPool;

fn ad_body(condominium_ids: serde_json::Value, expires_on: &str) -> serde_json::Value {
    json!({
        "name": "Promo",
        "advertiser_name": "Padaria Central",
        "advertiser_phone": "11999990000",
        "condominium_ids": condominium_ids,
        "expires_on": expires_on
    })
}

async fn insert_expired_ad(pool: &PgPool, condominium_id: i64) {
    sqlx::query(
        "INSERT INTO ads (name, advertiser_name, advertiser_phone, condominium_ids, expires_on)
         VALUES ('Old', 'X', '1', ARRAY[$1]::BIGINT[], '2025-06-14')",
    )
    .bind(condominium_id)
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Ads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ad_reports_derived_status(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let mut body = ad_body(json!(format!("{condo_id}")), "2025-06-15");
    body["status"] = json!("inactive");

    let response = post_json(common::build_test_app(pool), "/api/v1/ads", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["display_seconds"], 10);
    assert_eq!(json["data"]["condominium_ids"], json!([condo_id]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ad_with_past_date_returns_400(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/ads",
        ad_body(json!([condo_id]), "2025-06-14"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ad_rejects_missing_or_malformed_date(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    for expires_on in ["", "31/12/2025"] {
        let response = post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/ads",
            ad_body(json!([condo_id]), expires_on),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{expires_on:?}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ad_requires_known_condominiums(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/ads",
        ad_body(json!([]), "2025-12-31"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/ads",
        ad_body(json!("[404]"), "2025-12-31"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_ads_filters_by_status(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    create_id(&pool, "/api/v1/ads", ad_body(json!([condo_id]), "2025-07-01")).await;
    insert_expired_ad(&pool, condo_id).await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/ads").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/ads?status=inactive",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Old");
    assert_eq!(json["data"][0]["status"], "inactive");

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/ads?status=active&condominium_id={condo_id}"),
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = get(common::build_test_app(pool), "/api/v1/ads?status=expired").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_ad(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let ad_id = create_id(&pool, "/api/v1/ads", ad_body(json!([condo_id]), "2025-07-01")).await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/ads/{ad_id}"),
        json!({"expires_on": "2025-08-01T10:00", "display_seconds": 20}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["expires_on"], "2025-08-01");
    assert_eq!(json["data"]["display_seconds"], 20);
    assert_eq!(json["data"]["name"], "Promo");

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/ads/{ad_id}"),
        json!({"expires_on": "2024-01-01"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/ads/{ad_id}"),
        json!({"display_seconds": 0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_ad_edit_after_condominium_delete(pool: PgPool) {
    let gone_id = create_condominium(&pool, "Solar").await;
    let kept_id = create_condominium(&pool, "Lunar").await;
    let ad_id = create_id(
        &pool,
        "/api/v1/ads",
        ad_body(json!([gone_id, kept_id]), "2025-07-01"),
    )
    .await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/condominiums/{gone_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/ads/{ad_id}"),
    )
    .await;
    let ad = body_json(response).await["data"].clone();
    assert_eq!(ad["condominium_ids"], json!([kept_id]));

    // The console resends the list it just read.
    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/ads/{ad_id}"),
        json!({"name": "Renamed", "condominium_ids": ad["condominium_ids"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Renamed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_ad(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let ad_id = create_id(&pool, "/api/v1/ads", ad_body(json!([condo_id]), "2025-07-01")).await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/ads/{ad_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(common::build_test_app(pool), &format!("/api/v1/ads/{ad_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_notice_without_expiration_is_active(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/notices",
        json!({
            "name": "Pool",
            "message": "Closed for cleaning",
            "condominium_ids": condo_id.to_string(),
            "expires_on": ""
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["expires_on"], serde_json::Value::Null);
    assert_eq!(json["data"]["status"], "active");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_notice_limit_returns_409(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let manager_id = create_manager(&pool, "limit@example.com", 2).await;
    let body = json!({
        "manager_id": manager_id,
        "name": "Notice",
        "message": "Body",
        "condominium_ids": [condo_id]
    });

    create_id(&pool, "/api/v1/notices", body.clone()).await;
    let second = create_id(&pool, "/api/v1/notices", body.clone()).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/notices",
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    // Deleting one frees a slot.
    delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notices/{second}"),
    )
    .await;
    let response = post_json(common::build_test_app(pool), "/api/v1/notices", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_concurrent_notice_creates_respect_limit(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let manager_id = create_manager(&pool, "race@example.com", 1).await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let app = common::build_test_app(pool.clone());
        let body = json!({
            "manager_id": manager_id,
            "name": format!("Notice {i}"),
            "message": "Body",
            "condominium_ids": [condo_id]
        });
        handles.push(tokio::spawn(async move {
            post_json(app, "/api/v1/notices", body).await.status()
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            status => assert_eq!(status, StatusCode::CONFLICT),
        }
    }
    assert_eq!(created, 1);

    let (owned,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM notices WHERE manager_id = $1 AND deleted_at IS NULL",
    )
    .bind(manager_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(owned, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reassigning_notice_to_full_manager_returns_409(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let full_id = create_manager(&pool, "full@example.com", 1).await;
    let other_id = create_manager(&pool, "other@example.com", 5).await;
    let full_notice_id = create_id(
        &pool,
        "/api/v1/notices",
        json!({"manager_id": full_id, "name": "N", "message": "M", "condominium_ids": [condo_id]}),
    )
    .await;
    let notice_id = create_id(
        &pool,
        "/api/v1/notices",
        json!({"manager_id": other_id, "name": "N", "message": "M", "condominium_ids": [condo_id]}),
    )
    .await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notices/{notice_id}"),
        json!({"manager_id": full_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notices/{notice_id}"),
        json!({"manager_id": 424242}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Re-sending the current manager is not a reassignment, even at the limit.
    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/notices/{full_notice_id}"),
        json!({"manager_id": full_id, "name": "Kept"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["manager_id"], full_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_notices_by_manager(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let manager_id = create_manager(&pool, "a@example.com", 10).await;
    let other_id = create_manager(&pool, "b@example.com", 10).await;
    for owner in [manager_id, manager_id, other_id] {
        create_id(
            &pool,
            "/api/v1/notices",
            json!({"manager_id": owner, "name": "N", "message": "M", "condominium_ids": [condo_id]}),
        )
        .await;
    }

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notices/manager/{manager_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"][0]["status"], "active");

    let response = get(common::build_test_app(pool), "/api/v1/notices/manager/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_notice_expiration_update_and_clear(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    let notice_id = create_id(
        &pool,
        "/api/v1/notices",
        json!({"name": "N", "message": "M", "condominium_ids": [condo_id], "expires_on": "2025-06-20"}),
    )
    .await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notices/{notice_id}"),
        json!({"expires_on": "2025-06-01"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notices/{notice_id}"),
        json!({"message": "Updated"}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["expires_on"], "2025-06-20");
    assert_eq!(json["data"]["message"], "Updated");

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/notices/{notice_id}"),
        json!({"expires_on": ""}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["expires_on"], serde_json::Value::Null);
    assert_eq!(json["data"]["status"], "active");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_notices_by_status(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    create_id(
        &pool,
        "/api/v1/notices",
        json!({"name": "Live", "message": "M", "condominium_ids": [condo_id]}),
    )
    .await;
    sqlx::query(
        "INSERT INTO notices (name, message, condominium_ids, expires_on)
         VALUES ('Gone', 'M', ARRAY[$1]::BIGINT[], '2025-05-01')",
    )
    .bind(condo_id)
    .execute(&pool)
    .await
    .unwrap();

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/notices?status=active",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Live");

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/notices?condominium_id={condo_id}"),
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_dashboard_stats(pool: PgPool) {
    let condo_id = create_condominium(&pool, "Solar").await;
    create_condominium(&pool, "Aurora").await;
    create_id(&pool, "/api/v1/ads", ad_body(json!([condo_id]), "2025-06-15")).await;
    create_id(&pool, "/api/v1/ads", ad_body(json!([condo_id]), "2026-01-01")).await;
    insert_expired_ad(&pool, condo_id).await;

    let response = get(common::build_test_app(pool), "/api/v1/dashboard/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        json!({"total_condominiums": 2, "total_ads": 3, "active_ads": 2, "expired_ads": 1})
    );
}
