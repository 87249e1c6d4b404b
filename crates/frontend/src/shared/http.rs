//! Thin wrapper over `gloo_net` used by every API call.
//!
//! Responses are read as text first so failures keep the backend message and
//! empty bodies (`204`, `DELETE`) do not count as decode errors.

use super::api_utils::{api_url, auth_header};
use contracts::domain::common::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use wasm_bindgen::JsValue;
use web_sys::FormData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// Request body. Content-Type follows the variant: JSON sets it explicitly,
/// multipart leaves it to the browser so the boundary is filled in.
pub enum Body {
    Empty,
    Json(Value),
    Multipart(FormData),
}

fn builder(method: Method, url: &str) -> RequestBuilder {
    let builder = match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    };
    match auth_header() {
        Some(header) => builder.header("Authorization", &header),
        None => builder,
    }
}

/// Query string for `params`; empty when there is nothing to send.
pub fn query_string(params: &BTreeMap<String, String>) -> String {
    if params.is_empty() {
        return String::new();
    }
    serde_qs::to_string(params)
        .map(|qs| format!("?{}", qs))
        .unwrap_or_default()
}

/// Sends a request to `path` (relative to the API root) and returns the
/// parsed JSON body, `Value::Null` for an empty one.
pub async fn send(
    method: Method,
    path: &str,
    params: Option<&BTreeMap<String, String>>,
    body: Body,
) -> Result<Value, ApiError> {
    let url = format!(
        "{}{}",
        api_url(path),
        params.map(query_string).unwrap_or_default()
    );
    log::debug!("{} {}", method, url);

    let request = builder(method, &url);
    let request = match body {
        Body::Empty => request.build(),
        Body::Json(value) => request
            .header("Content-Type", "application/json")
            .json(&value),
        Body::Multipart(form) => request.body(JsValue::from(form)),
    }
    .map_err(|e| ApiError::encode(format!("Failed to build request: {}", e)))?;

    let response = request.send().await.map_err(|e| {
        log::warn!("{} {} failed: {}", method, url, e);
        ApiError::transport(format!("Failed to send request: {}", e))
    })?;

    read_response(method, &url, response).await
}

async fn read_response(method: Method, url: &str, response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to read response: {}", e)))?;

    if !response.ok() {
        let err = ApiError::from_response(status, &text);
        log::warn!("{} {} -> {}: {}", method, url, status, err);
        return Err(err);
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| {
        log::error!("{} {} returned invalid JSON: {}", method, url, e);
        ApiError::decode(format!("Failed to parse response: {}", e))
    })
}

pub async fn get(path: &str, params: Option<&BTreeMap<String, String>>) -> Result<Value, ApiError> {
    send(Method::Get, path, params, Body::Empty).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_encodes_values() {
        let mut params = BTreeMap::new();
        assert_eq!(query_string(&params), "");

        params.insert("page".to_string(), "2".to_string());
        params.insert("diamondType".to_string(), "Lab Grown".to_string());
        let qs = query_string(&params);
        assert!(qs.starts_with('?'));
        assert!(qs.contains("page=2"));
        assert!(qs.contains("diamondType=Lab+Grown") || qs.contains("diamondType=Lab%20Grown"));
    }
}
