//! Request body extraction
//!
//! Record bodies arrive either as a JSON object or as url-encoded form data.
//! Both are decoded into the same untyped field map; typing is left to the
//! schema validator.

use std::collections::HashMap;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use serde_json::{Map, Value};

use super::errors::ApiError;

/// Untyped record body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields(pub Map<String, Value>);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for RawFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(pairs) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
            let map = pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
            return Ok(RawFields(map));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
        parse_json_body(&bytes).map(RawFields)
    }
}

/// Decodes a JSON body. An empty body is an empty field map.
fn parse_json_body(bytes: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::MalformedBody(format!("Invalid JSON body: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::MalformedBody("Request body must be a JSON object.".into())),
    }
}
