#![allow(dead_code)]

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use megagen_crm::api::ApiClient;
use megagen_session::{MemoryStorage, Role, Session, SessionStore};
use serde_json::{Value, json};

pub const TOKEN: &str = "tok-123";
pub const PASSWORD: &str = "secret";

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "bad creds" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "token": TOKEN,
            "user": { "email": body["email"], "role": "vendedor", "roles": ["supervisor"] }
        })),
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TOKEN}"))
}

async fn quotes(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "missing token" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!([
            {
                "id": 309,
                "codigo": "COT-309",
                "cliente": "Clínica Dental Sonrisa",
                "total": "$1.250.000",
                "etapa": "Despacho",
                "historico": [
                    { "fecha": "2025-03-01T10:00:00Z", "nota": "Etapa cambiada a Despacho" }
                ]
            },
            { "id": 308, "codigo": "COT-308", "cliente": "Centro Médico Norte" }
        ])),
    )
}

async fn clients() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "boom" })),
    )
}

async fn visits() -> Json<Value> {
    Json(json!([{ "client": "Centro Médico Norte", "address": "Av. Central 100" }]))
}

async fn admin_dashboard() -> Json<Value> {
    Json(json!({ "quotes": 12, "ready": 3 }))
}

async fn meetings() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn record_visit() -> StatusCode {
    StatusCode::CREATED
}

/// Starts a stand-in for the CRM REST API and returns its base URL.
pub async fn stub_api() -> anyhow::Result<String> {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/quotes", get(quotes))
        .route("/clients", get(clients))
        .route("/terrain/visits", get(visits).post(record_visit))
        .route("/dashboard/admin", get(admin_dashboard))
        .route("/meetings", post(meetings));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{addr}"))
}

pub async fn client() -> anyhow::Result<ApiClient> {
    Ok(ApiClient::new(&stub_api().await?)?)
}

pub fn session(roles: impl IntoIterator<Item = Role>) -> Session {
    Session::new("ana@megagen.cl", roles.into_iter().collect(), TOKEN)
}

pub fn signed_in(
    roles: impl IntoIterator<Item = Role>,
) -> anyhow::Result<SessionStore<MemoryStorage>> {
    let mut store = SessionStore::open(MemoryStorage::new())?;
    store.set_session(session(roles))?;

    Ok(store)
}
