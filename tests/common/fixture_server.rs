//! Catalog stub served by axum, answering canned bodies by request target.
//!
//! Runs on its own runtime thread so the blocking `Command`-driven tests can
//! talk to it while they wait on the binary.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, mpsc};
use std::thread;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use parking_lot::Mutex;

#[derive(Clone, Default)]
struct FixtureState {
    routes: Arc<Mutex<HashMap<String, (StatusCode, Vec<u8>)>>>,
    hits: Arc<Mutex<Vec<String>>>,
}

pub struct FixtureServer {
    addr: SocketAddr,
    state: FixtureState,
}

async fn serve_fixture(State(state): State<FixtureState>, uri: Uri) -> (StatusCode, Vec<u8>) {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    state.hits.lock().push(target.clone());

    state
        .routes
        .lock()
        .get(&target)
        .cloned()
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, br#"{"detail":"Not found."}"#.to_vec()))
}

impl FixtureServer {
    pub fn start() -> Self {
        let state = FixtureState::default();
        let app = Router::new()
            .fallback(serve_fixture)
            .with_state(state.clone());

        let (addr_tx, addr_rx) = mpsc::channel();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("build fixture runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind listener");
                addr_tx
                    .send(listener.local_addr().expect("local addr"))
                    .expect("report fixture address");
                axum::serve(listener, app).await.expect("serve fixture");
            });
        });

        let addr = addr_rx.recv().expect("fixture server failed to start");
        FixtureServer { addr, state }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Serve `body` with status 200 for an exact path-and-query target
    pub fn route(&self, target: &str, body: impl Into<Vec<u8>>) {
        self.route_status(target, 200, body);
    }

    pub fn route_status(&self, target: &str, status: u16, body: impl Into<Vec<u8>>) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.state
            .routes
            .lock()
            .insert(target.to_string(), (status, body.into()));
    }

    /// Request targets received so far, in arrival order
    pub fn hits(&self) -> Vec<String> {
        self.state.hits.lock().clone()
    }
}
