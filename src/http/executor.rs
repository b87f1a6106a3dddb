//! HTTP call executor
//!
//! Issues exactly one request per call against the API root, prints a
//! one-line trace, and folds transport failures into the returned outcome.

use std::time::Instant;

use colored::Colorize;
use serde_json::Value;

use super::outcome::{Body, Exchange, Outcome};
use super::transport::{ApiRequest, Auth, Method, Transport};

/// Longest body excerpt printed on a status mismatch
const SNIPPET_LEN: usize = 200;

/// One call as described by a step
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub payload: Option<Value>,
    pub auth: Auth,
    pub expected_status: u16,
}

impl Call {
    fn new(method: Method, path: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            payload,
            auth: Auth::None,
            expected_status: 200,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, None)
    }

    pub fn post(path: impl Into<String>, payload: Value) -> Self {
        Self::new(Method::Post, path, Some(payload))
    }

    pub fn put(path: impl Into<String>, payload: Value) -> Self {
        Self::new(Method::Put, path, Some(payload))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, None)
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    pub fn expect(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }
}

/// Executes calls against a fixed API root
pub struct Executor {
    api_url: String,
    transport: Box<dyn Transport>,
}

impl Executor {
    pub fn new(api_url: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { api_url, transport }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Execute a call. Never fails: a transport error becomes
    /// `Outcome::TransportFailure`.
    pub async fn execute(&self, call: Call) -> Exchange {
        let request = ApiRequest {
            method: call.method,
            url: format!("{}{}", self.api_url, call.path),
            payload: call.payload,
            auth: call.auth,
        };

        let started = Instant::now();
        let outcome = match self.transport.send(&request).await {
            Ok(raw) => Outcome::Response {
                status: raw.status,
                body: Body::parse(raw.text),
            },
            Err(e) => {
                tracing::warn!(method = %call.method, path = %call.path, error = %e, "Transport failure");
                Outcome::TransportFailure {
                    error: e.to_string(),
                }
            }
        };

        tracing::debug!(
            method = %call.method,
            path = %call.path,
            status = ?outcome.status(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Call finished"
        );

        let exchange = Exchange {
            expected_status: call.expected_status,
            outcome,
        };
        print_trace(call.method, &call.path, &exchange);
        exchange
    }
}

fn print_trace(method: Method, path: &str, exchange: &Exchange) {
    match exchange.outcome.status() {
        None => {
            let line = format!(
                "  ERROR: {} {} -> {}",
                method,
                path,
                exchange.outcome.snippet(SNIPPET_LEN)
            );
            println!("{}", line.red());
        }
        Some(status) => {
            let line = format!("  {} {} -> {}", method, path, status);
            if exchange.met() {
                println!("{}", line.green());
            } else {
                println!("{}", line.red());
                println!(
                    "{}",
                    format!("    Expected: {}, Got: {}", exchange.expected_status, status).yellow()
                );
                let snippet = exchange.outcome.snippet(SNIPPET_LEN);
                if !snippet.is_empty() {
                    println!("{}", format!("    Response: {}", snippet).yellow());
                }
            }
        }
    }
}
