//! In-process stand-in for the SecureBank server.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use securebank_dashboard::api::Client;

#[derive(Default)]
struct StubState {
    replies: Mutex<HashMap<String, (StatusCode, Value)>>,
    hits: Mutex<Vec<String>>,
    bodies: Mutex<Vec<(String, Value)>>,
}

/// Answers each `"METHOD /path"` with a canned reply and records every
/// request it sees. Unknown routes get a 404 with an `error` body.
pub struct StubBank {
    pub addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubBank {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> Client {
        Client::new(&self.url()).unwrap()
    }

    pub fn reply(&self, route: &str, status: StatusCode, body: Value) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(route.to_string(), (status, body));
        self
    }

    pub fn ok(&self, route: &str, body: Value) -> &Self {
        self.reply(route, StatusCode::OK, body)
    }

    pub fn hits(&self, route: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .iter()
            .filter(|h| *h == route)
            .count()
    }

    pub fn total_hits(&self) -> usize {
        self.state.hits.lock().unwrap().len()
    }

    pub fn last_body(&self, route: &str) -> Option<Value> {
        self.state
            .bodies
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(r, _)| r == route)
            .map(|(_, b)| b.clone())
    }

    /// Typical multi-account fixtures.
    pub fn with_accounts(&self) -> &Self {
        self.ok(
            "GET /api/account-info",
            json!({
                "accounts": [
                    {
                        "account_id": 7,
                        "account_type": "Checking",
                        "balance": 1500.5,
                        "interest_rate": 0.01,
                        "minimum_balance": 100,
                        "description": "Everyday account"
                    },
                    {
                        "account_id": 8,
                        "account_type": "Savings",
                        "balance": 250
                    }
                ]
            }),
        )
        .ok(
            "GET /api/transactions",
            json!([
                {"id": 1, "type": "DEPOSIT", "amount": 100, "created_at": "2024-01-15 10:30:00"},
                {"id": 2, "type": "WITHDRAW", "amount": 42.5, "created_at": "2024-01-16 08:05:09"}
            ]),
        )
        .ok(
            "GET /api/account-types",
            json!({
                "account_types": [
                    {"name": "Checking", "interest_rate": 0.01, "minimum_balance": 100},
                    {"name": "Savings", "interest_rate": 2.5, "minimum_balance": 500}
                ]
            }),
        )
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let route = format!("{} {}", method, uri.path());
    state.hits.lock().unwrap().push(route.clone());
    if !body.is_empty() {
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        state.bodies.lock().unwrap().push((route.clone(), value));
    }

    let reply = state.replies.lock().unwrap().get(&route).cloned();
    match reply {
        Some((status, body)) => (status, Json(body)),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))),
    }
}

/// Base URL of a port nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Base URL of a server that accepts connections and never answers.
pub async fn silent_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}
