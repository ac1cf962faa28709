//! Shared utilities for integration tests.

#![allow(dead_code)]

use futures_util::future::BoxFuture;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use pelada_client::config::{ApiConfig, ClientConfig};
use pelada_client::error::TransportError;
use pelada_client::http::{ApiRequest, ApiResponse, Transport};
use pelada_client::{ApiClient, ApiRoot, Location, MemoryStore};

type Responder = dyn Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync;

/// Transport that records every request and answers from a closure.
pub struct FakeTransport {
    calls: Mutex<Vec<ApiRequest>>,
    responder: Box<Responder>,
}

impl FakeTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Always answer with the given status and JSON body.
    pub fn replying(status: u16, body: Value) -> Arc<Self> {
        Self::new(move |_| Ok(ApiResponse::json(status, &body)))
    }

    /// Always fail below HTTP.
    pub fn failing(message: &'static str) -> Arc<Self> {
        Self::new(move |_| Err(TransportError::Connect(message.to_string())))
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.calls().pop().expect("no request was sent")
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, TransportError>> {
        let result = (self.responder)(&request);
        self.calls.lock().unwrap().push(request);
        Box::pin(async move { result })
    }
}

/// Everything a test needs to observe side effects.
pub struct Harness {
    pub api: ApiClient,
    pub location: Arc<Location>,
    pub store: Arc<MemoryStore>,
}

pub const API_ROOT: &str = "http://api.test:8000";

/// Client over a fake transport, rooted at [`API_ROOT`], starting at `path`.
pub fn harness(transport: Arc<FakeTransport>, path: &str) -> Harness {
    let root = ApiRoot::resolve(&ApiConfig {
        url: Some(API_ROOT.to_string()),
        ..ApiConfig::default()
    })
    .unwrap();
    let location = Arc::new(Location::new(path));
    let store = Arc::new(MemoryStore::new());
    let api = ApiClient::with_transport(root, transport, store.clone(), location.clone(), "/login");
    Harness { api, location, store }
}

/// Serve an axum router on an ephemeral local port.
pub async fn spawn_api(router: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Client with the real reqwest transport pointed at `addr`.
pub fn http_harness(addr: SocketAddr, request_secs: u64) -> Harness {
    let mut config = ClientConfig::default();
    config.api.url = Some(format!("http://{}", addr));
    config.timeouts.request_secs = request_secs;

    let location = Arc::new(Location::new("/"));
    let store = Arc::new(MemoryStore::new());
    let api = ApiClient::from_config(&config, store.clone(), location.clone()).unwrap();
    Harness { api, location, store }
}
