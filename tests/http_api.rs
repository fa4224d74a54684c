mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{mock_service, RecordingSheets};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use tuition_payments::http::routes::router;
use tuition_payments::AppState;

fn app() -> axum::Router {
    router(AppState {
        payment_service: mock_service(Arc::new(RecordingSheets::default())),
    })
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/payments")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn valid_payload() -> Value {
    json!({
        "nama": "Budi Santoso",
        "email": "budi@example.com",
        "nim": "2021001",
        "prodi": "Informatika",
        "semester": "3",
        "kode_unik": "123",
        "jumlah_pembayaran": "1500000"
    })
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = send(&app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn generated_code_is_three_digits() {
    let (status, body) = send(&app(), get("/api/generate-code")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let code = body["data"]["kode_unik"].as_str().unwrap();
    assert_eq!(code.len(), 3);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn create_fetch_and_list_agree() {
    let app = app();
    let (status, created) = send(&app, post_json(valid_payload())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "Pembayaran berhasil direkam");

    let data = &created["data"];
    let id = data["id"].as_str().unwrap().to_string();
    assert_eq!(data["kodeUnik"], "123");
    assert_eq!(data["total_pembayaran"], 1_500_123);
    assert_eq!(data["jumlah_pembayaran_formatted"], "Rp 1.500.000");
    assert_eq!(data["total_pembayaran_formatted"], "Rp 1.500.123");
    assert_eq!(data["notification_status"], "sent");
    assert_eq!(data["redirect_url"], format!("/success.html?id={id}"));

    let (status, fetched) = send(&app, get(&format!("/api/payments/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["total_pembayaran_formatted"], "Rp 1.500.123");
    assert_eq!(fetched["data"]["kodeUnik"], "123");
    assert!(fetched["data"].get("redirect_url").is_none());

    let (status, listed) = send(&app, get("/api/payments")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["data"][0]["id"], id.as_str());
    assert_eq!(listed["data"][0]["kodeUnik"], "123");
    assert_eq!(listed["data"][0]["jumlah_pembayaran_formatted"], "Rp 1.500.000");
}

#[tokio::test]
async fn client_total_is_ignored() {
    let mut payload = valid_payload();
    payload["total_pembayaran"] = json!(1);
    let (status, body) = send(&app(), post_json(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_pembayaran"], 1_500_123);
}

#[tokio::test]
async fn form_encoded_submission_is_accepted() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/payments")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(
            "nama=Siti+Aminah&email=siti%40example.ac.id&nim=2022017&prodi=Hukum&semester=5&kode_unik=042&jumlah_pembayaran=2500000",
        ))
        .unwrap();
    let (status, body) = send(&app(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["nama"], "Siti Aminah");
    assert_eq!(body["data"]["kodeUnik"], "042");
    assert_eq!(body["data"]["total_pembayaran"], 2_500_042);
}

#[tokio::test]
async fn validation_errors_are_itemized() {
    let payload = json!({
        "nama": "",
        "email": "bad",
        "nim": "2021001",
        "prodi": "Informatika",
        "semester": 0,
        "kode_unik": "123",
        "jumlah_pembayaran": 1500000
    });
    let (status, body) = send(&app(), post_json(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validasi gagal");
    assert_eq!(
        body["errors"],
        json!(["Nama minimal 3 karakter", "Email tidak valid", "Semester harus 1–8"])
    );
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/payments")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = app();
    let (status, body) = send(&app, get("/api/payments/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Data pembayaran tidak ditemukan");

    let missing = uuid::Uuid::new_v4();
    let (status, _) = send(&app, delete(&format!("/api/payments/{missing}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_one_then_clear_all() {
    let app = app();
    let (_, first) = send(&app, post_json(valid_payload())).await;
    send(&app, post_json(valid_payload())).await;
    let id = first["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, delete(&format!("/api/payments/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data pembayaran berhasil dihapus");

    let (_, listed) = send(&app, get("/api/payments")).await;
    assert_eq!(listed["count"], 1);

    let (status, body) = send(&app, delete("/api/payments")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Berhasil menghapus 1 data pembayaran");

    let (_, listed) = send(&app, get("/api/payments")).await;
    assert_eq!(listed["count"], 0);
}

#[tokio::test]
async fn cors_headers_and_preflight() {
    let app = app();
    let resp = app.clone().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/payments")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(preflight).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp
        .headers()
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("DELETE"));
}
