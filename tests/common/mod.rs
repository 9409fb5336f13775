//! Scripted transport that records every request it sees.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use design_client::error::TransportError;
use design_client::transport::{HttpRequest, HttpResponse, Method, Transport};
use design_client::Design;
use serde_json::Value;

pub const DESIGN: &str = "assemblies/shop/design/";

/// Full path under the test assembly's design root.
pub fn path(rest: &str) -> String {
    format!("{}{}", DESIGN, rest)
}

#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with a status and JSON body.
    Json(u16, Value),
    /// Respond with a status and raw text body.
    Text(u16, String),
    /// Respond 200 with the submitted CI object plus the given `ciId`.
    Echo(i64),
    /// Produce no response at all.
    NoResponse,
}

#[derive(Default)]
pub struct SpyTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl SpyTransport {
    /// Queue a reply for `method path`. The last queued reply keeps answering
    /// once earlier ones are used up. Unscripted routes answer 404.
    pub fn on(&self, method: Method, path: impl Into<String>, reply: Reply) -> &Self {
        self.routes
            .lock()
            .expect("routes lock poisoned")
            .entry((method, path.into()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn ok(&self, method: Method, path: impl Into<String>, body: Value) -> &Self {
        self.on(method, path, Reply::Json(200, body))
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }

    /// JSON body of the single call made to `method path`.
    pub fn sent_body(&self, method: Method, path: &str) -> Value {
        let calls = self.calls_to(method, path);
        assert_eq!(calls.len(), 1, "expected one {:?} {}", method, path);
        calls[0].json_body().cloned().expect("request had no JSON body")
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<Reply> {
        let mut routes = self.routes.lock().expect("routes lock poisoned");
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

fn response(status: u16, body: String) -> HttpResponse {
    let reason = match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        _ => "Error",
    };
    HttpResponse {
        status,
        status_line: format!("HTTP/1.1 {} {}", status, reason),
        body,
    }
}

#[async_trait]
impl Transport for SpyTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let reply = self.next_reply(request.method, &request.path);
        let echo_source = request.json_body().cloned();
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(request);

        match reply {
            None => Ok(response(404, String::new())),
            Some(Reply::Json(status, body)) => Ok(response(status, body.to_string())),
            Some(Reply::Text(status, body)) => Ok(response(status, body)),
            Some(Reply::Echo(ci_id)) => {
                let mut ci = echo_source
                    .and_then(|body| body.get("cms_dj_ci").cloned())
                    .unwrap_or_else(|| serde_json::json!({}));
                ci["ciId"] = Value::from(ci_id);
                Ok(response(200, ci.to_string()))
            }
            Some(Reply::NoResponse) => Err(TransportError::Other("connection refused".into())),
        }
    }
}

/// A design client for assembly `shop` wired to a fresh spy.
pub fn setup() -> (Design, Arc<SpyTransport>) {
    let spy = Arc::new(SpyTransport::default());
    let design = Design::new("shop", spy.clone()).expect("Failed to create design client");
    (design, spy)
}
