// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the Kubernetes ConfigMap API.

use http::{Method, Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

const CONFIGMAPS_PREFIX: &str = "/api/v1/namespaces/";

#[derive(Clone)]
enum Canned {
    Reply(u16, String),
    /// Fail at the transport level, before any HTTP response exists
    Unreachable,
}

/// A mock HTTP service acting as an in-memory ConfigMap API server.
///
/// Requests matching a canned route are answered from it; everything else is
/// served from the store: POST creates (409 on duplicates), GET reads
/// (404 when missing) and PATCH applies a JSON merge patch.
#[derive(Clone)]
pub struct MockService {
    routes: Arc<Mutex<HashMap<(String, String), Canned>>>,
    store: Arc<Mutex<HashMap<(String, String), Value>>>,
    requests: Arc<AtomicUsize>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            routes: Arc::new(Mutex::new(HashMap::new())),
            store: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn route(self, method: &str, path: &str, canned: Canned) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), canned);
        self
    }

    /// Add a response for GET requests matching the path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.route("GET", path, Canned::Reply(status, body.to_string()))
    }

    /// Add a response for POST requests matching the path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.route("POST", path, Canned::Reply(status, body.to_string()))
    }

    /// Add a response for PATCH requests matching the path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.route("PATCH", path, Canned::Reply(status, body.to_string()))
    }

    /// Make requests matching the method and path fail without a response
    pub fn unreachable(self, method: &str, path: &str) -> Self {
        self.route(method, path, Canned::Unreachable)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Number of ConfigMaps held in the store
    pub fn stored_count(&self) -> usize {
        self.store.lock().unwrap().len()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn find_route(&self, method: &str, path: &str) -> Option<Canned> {
        let routes = self.routes.lock().unwrap();

        // Try exact match first
        if let Some(canned) = routes.get(&(method.to_string(), path.to_string())) {
            return Some(canned.clone());
        }

        for ((m, p), canned) in routes.iter() {
            if m == method && path.starts_with(p) {
                return Some(canned.clone());
            }
        }

        None
    }

    fn serve(&self, method: &Method, path: &str, body: &[u8]) -> (u16, String) {
        let Some((namespace, name)) = parse_configmap_path(path) else {
            return (404, status_json(404, "NotFound", "the server could not find the requested resource"));
        };
        let mut store = self.store.lock().unwrap();

        match (method.as_str(), name) {
            ("POST", None) => {
                let Ok(mut object) = serde_json::from_slice::<Value>(body) else {
                    return (400, status_json(400, "BadRequest", "invalid body"));
                };
                let name = object["metadata"]["name"].as_str().unwrap_or_default().to_string();
                let key = (namespace.clone(), name.clone());
                if store.contains_key(&key) {
                    return (409, already_exists_json(&name));
                }
                object["metadata"]["namespace"] = Value::String(namespace);
                object["metadata"]["resourceVersion"] = Value::String("1".to_string());
                store.insert(key, object.clone());
                (201, object.to_string())
            }
            ("GET", Some(name)) => match store.get(&(namespace, name.clone())) {
                Some(object) => (200, object.to_string()),
                None => (404, not_found_json(&name)),
            },
            ("PATCH", Some(name)) => {
                let Some(object) = store.get_mut(&(namespace, name.clone())) else {
                    return (404, not_found_json(&name));
                };
                let Ok(patch) = serde_json::from_slice::<Value>(body) else {
                    return (400, status_json(400, "BadRequest", "invalid patch"));
                };
                merge_patch(object, &patch);
                (200, object.to_string())
            }
            _ => (405, status_json(405, "MethodNotAllowed", "method not allowed")),
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let canned = self.find_route(req.method().as_str(), req.uri().path());
        let this = self.clone();

        Box::pin(respond(this, canned, req))
    }
}

async fn respond(
    mock: MockService,
    canned: Option<Canned>,
    req: Request<Body>,
) -> Result<Response<Body>, tower::BoxError> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let (status, body) = match canned {
        Some(Canned::Unreachable) => {
            return Err(format!("connection refused: {} {}", method, path).into())
        }
        Some(Canned::Reply(status, body)) => (status, body),
        None => {
            let bytes = req.into_body().collect().await?.to_bytes();
            mock.serve(&method, &path, &bytes)
        }
    };

    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.into_bytes()))?)
}

/// Split `/api/v1/namespaces/{ns}/configmaps[/{name}]`
fn parse_configmap_path(path: &str) -> Option<(String, Option<String>)> {
    let rest = path.strip_prefix(CONFIGMAPS_PREFIX)?;
    let mut parts = rest.split('/');
    let namespace = parts.next()?.to_string();
    if parts.next()? != "configmaps" {
        return None;
    }
    let name = parts.next().map(str::to_string);
    if parts.next().is_some() {
        return None;
    }
    Some((namespace, name))
}

/// RFC 7386 JSON merge patch
fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Default::default());
    }
    if let Value::Object(target) = target {
        for (key, value) in patch {
            if value.is_null() {
                target.remove(key);
            } else {
                merge_patch(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

/// Create a mock ConfigMap JSON response
pub fn configmap_json(namespace: &str, name: &str, data: &[(&str, &str)]) -> String {
    let data: serde_json::Map<String, Value> = data
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        },
        "data": data
    })
    .to_string()
}

/// Create a Status failure response
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(name: &str) -> String {
    status_json(404, "NotFound", &format!("configmaps \"{}\" not found", name))
}

/// Create a 409 already exists response
pub fn already_exists_json(name: &str) -> String {
    status_json(
        409,
        "AlreadyExists",
        &format!("configmaps \"{}\" already exists", name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_configmap_path() {
        assert_eq!(
            parse_configmap_path("/api/v1/namespaces/default/configmaps"),
            Some(("default".to_string(), None))
        );
        assert_eq!(
            parse_configmap_path("/api/v1/namespaces/default/configmaps/cfg"),
            Some(("default".to_string(), Some("cfg".to_string())))
        );
        assert_eq!(parse_configmap_path("/api/v1/namespaces/default/secrets"), None);
    }

    #[test]
    fn test_merge_patch() {
        let mut target = json!({"data": {"a": "1", "b": "2"}, "kind": "ConfigMap"});
        merge_patch(&mut target, &json!({"data": {"a": "9", "b": null, "c": "3"}}));

        assert_eq!(
            target,
            json!({"data": {"a": "9", "c": "3"}, "kind": "ConfigMap"})
        );
    }
}
