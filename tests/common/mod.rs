//! Shared helpers for HTTP-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::Router;
use record_service::http_server::{HttpServer, HttpServerConfig, RecordState};
use record_service::schema::{cars_schema, users_schema, Schema};
use record_service::store::{parse_seed, IdPolicy, RecordStore};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const USER_COUNT: i64 = 1000;
pub const CAR_COUNT: i64 = 1000;

pub fn user_json(id: i64) -> Value {
    match id {
        1 => json!({
            "id": 1, "first_name": "Sterne", "last_name": "Gell",
            "bitcoin_address": "15czwRiYGZ6PGM8EjkMS38XBNmkiohSExs",
            "social_security_number": "283-62-6536"
        }),
        813 => json!({
            "id": 813, "first_name": "Keven", "last_name": "Jirka",
            "bitcoin_address": "1HdhruUcmU1z3fDhz9b6FzajLuE3LrzoB8",
            "social_security_number": "898-62-9881"
        }),
        _ => json!({
            "id": id,
            "first_name": format!("First{}", id),
            "last_name": format!("Last{}", id),
            "bitcoin_address": format!("1Addr{:029}", id),
            "social_security_number": format!("{:03}-00-{:04}", id % 1000, id),
        }),
    }
}

pub fn car_json(id: i64) -> Value {
    match id {
        1 => json!({
            "id": 1, "manufacturer": "Chevrolet", "model": "Equinox",
            "year": 2008, "vin": "1J4PN2GK8BW312399"
        }),
        777 => json!({
            "id": 777, "manufacturer": "Infiniti", "model": "QX",
            "year": 1997, "vin": "2C3CDXEJ2FH079479"
        }),
        _ => json!({
            "id": id,
            "manufacturer": if id % 2 == 0 { "Ford" } else { "Toyota" },
            "model": format!("Model {}", id),
            "year": 1950 + id % 70,
            "vin": format!("VIN{:014}", id),
        }),
    }
}

fn router_for(schema: Schema, seed: Vec<Value>, policy: IdPolicy) -> Router {
    let seed = Value::Array(seed).to_string();
    let records = parse_seed(&seed, "test-seed", &schema).unwrap();
    let store = RecordStore::from_records(records, policy).unwrap();
    let state = Arc::new(RecordState::new(schema, store));
    HttpServer::build_router(&HttpServerConfig::default(), state)
}

pub fn users_app() -> Router {
    let seed = (1..=USER_COUNT).map(user_json).collect();
    router_for(users_schema(), seed, IdPolicy::Monotonic)
}

pub fn cars_app() -> Router {
    let seed = (1..=CAR_COUNT).map(car_json).collect();
    router_for(cars_schema(), seed, IdPolicy::Monotonic)
}

pub fn cars_app_with_policy(count: i64, policy: IdPolicy) -> Router {
    let seed = (1..=count).map(car_json).collect();
    router_for(cars_schema(), seed, policy)
}

async fn dispatch(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(app, req).await
}

pub async fn send_form(app: &Router, method: &str, uri: &str, form: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    dispatch(app, req).await
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    dispatch(app, req).await
}
