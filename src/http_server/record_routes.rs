//! Record HTTP Routes
//!
//! CRUD endpoints for the configured resource, rooted at `/`:
//!
//! - `GET /`          list all records
//! - `POST /`         create (201)
//! - `GET /{id}/`     fetch one
//! - `PUT /{id}/`     replace all fields (id kept)
//! - `DELETE /{id}/`  remove (204)
//!
//! Item paths are accepted with or without the trailing slash.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{FieldErrors, Fields, Schema, SchemaValidator};
use crate::store::{Record, RecordStore, StoreError};

use super::errors::{ApiError, ApiResult};
use super::extract::RawFields;

// ==================
// Shared State
// ==================

/// State shared across record handlers
pub struct RecordState {
    pub schema: Schema,
    pub store: RecordStore,
}

impl RecordState {
    pub fn new(schema: Schema, store: RecordStore) -> Self {
        Self { schema, store }
    }

    fn validate(&self, body: &RawFields) -> ApiResult<Fields> {
        SchemaValidator::new(&self.schema)
            .validate(&body.0)
            .map_err(|errors| {
                log_rejection(&self.schema.name, &errors);
                ApiError::Validation(errors)
            })
    }

    fn not_found(&self) -> ApiError {
        ApiError::NotFound(self.schema.not_found_message.clone())
    }

    fn store_error(&self, err: StoreError) -> ApiError {
        match err {
            StoreError::NotFound(_) => self.not_found(),
            other => {
                let reason = other.to_string();
                log_event_with_fields(
                    Event::StoreFailed,
                    &[("resource", self.schema.name.as_str()), ("reason", reason.as_str())],
                );
                ApiError::Internal(reason)
            }
        }
    }

    /// Parses an id path segment. Anything that is not an integer cannot name a record.
    fn parse_id(&self, raw: &str) -> ApiResult<i64> {
        raw.parse::<i64>().map_err(|_| self.not_found())
    }
}

fn log_rejection(resource: &str, errors: &FieldErrors) {
    let fields = errors.fields().join(",");
    log_event_with_fields(
        Event::ValidationRejected,
        &[("resource", resource), ("fields", fields.as_str())],
    );
}

// ==================
// Record Routes
// ==================

/// Create record routes
pub fn record_routes(state: Arc<RecordState>) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route(
            "/:id/",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route(
            "/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_handler(State(state): State<Arc<RecordState>>) -> Json<Vec<Record>> {
    Json(state.store.list())
}

async fn create_handler(
    State(state): State<Arc<RecordState>>,
    body: RawFields,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let fields = state.validate(&body)?;
    let record = state.store.create(fields).map_err(|e| state.store_error(e))?;

    let id = record.id.to_string();
    log_event_with_fields(
        Event::RecordCreated,
        &[("resource", state.schema.name.as_str()), ("id", id.as_str())],
    );

    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_handler(
    State(state): State<Arc<RecordState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Record>> {
    let id = state.parse_id(&id)?;
    let record = state.store.get(id).map_err(|e| state.store_error(e))?;
    Ok(Json(record))
}

async fn update_handler(
    State(state): State<Arc<RecordState>>,
    Path(id): Path<String>,
    body: RawFields,
) -> ApiResult<Json<Record>> {
    // Body errors take precedence over an unknown id.
    let fields = state.validate(&body)?;
    let id = state.parse_id(&id)?;
    let record = state
        .store
        .update(id, fields)
        .map_err(|e| state.store_error(e))?;

    let id = record.id.to_string();
    log_event_with_fields(
        Event::RecordUpdated,
        &[("resource", state.schema.name.as_str()), ("id", id.as_str())],
    );

    Ok(Json(record))
}

async fn delete_handler(
    State(state): State<Arc<RecordState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = state.parse_id(&id)?;
    state.store.delete(id).map_err(|e| state.store_error(e))?;

    let id = id.to_string();
    log_event_with_fields(
        Event::RecordDeleted,
        &[("resource", state.schema.name.as_str()), ("id", id.as_str())],
    );

    Ok(StatusCode::NO_CONTENT)
}
