//! Shared helpers for router tests

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use campus_server::{build_router, AppState};

pub fn app() -> Router {
    build_router(AppState::in_memory(), false)
}

pub struct Reply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Reply {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw.to_owned())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    Reply {
        status,
        body: body.to_vec(),
    }
}

pub async fn get(app: &Router, uri: &str) -> Reply {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> Reply {
    send(app, "POST", uri, Some(&body.to_string())).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> Reply {
    send(app, "PUT", uri, Some(&body.to_string())).await
}

pub async fn delete(app: &Router, uri: &str) -> Reply {
    send(app, "DELETE", uri, None).await
}
